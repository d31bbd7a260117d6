use std::fmt;
use std::str::FromStr;

use crate::error::InventoryError;
use crate::inventory::types::{VirtualMachineRecord, DEFAULT_GROUP, ROOT_GROUP};

/// Strategy used to place a machine into a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupBy {
    /// Guest OS identifier, falling back to the OS family.
    #[default]
    GuestId,
    /// DNS domain of the guest host name.
    Domain,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::GuestId => "guest_id",
            GroupBy::Domain => "domain",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guest_id" | "guestid" | "byguestid" | "by_guest_id" => Ok(GroupBy::GuestId),
            "domain" | "bydomain" | "by_domain" => Ok(GroupBy::Domain),
            _ => Err(InventoryError::InvalidGroupingPolicy(s.to_string())),
        }
    }
}

/// Domain part of a host name with dots replaced by underscores, so the
/// result is usable as an Ansible group name.
///
/// Returns `None` for names without a dot.
pub fn extract_domain(host_name: &str) -> Option<String> {
    let (_, domain) = host_name.split_once('.')?;
    if domain.is_empty() {
        return None;
    }
    Some(domain.replace('.', "_"))
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Group name for `vm` under `policy`. Never returns the root group name.
pub fn group_key(vm: &VirtualMachineRecord, policy: GroupBy) -> String {
    let key = match policy {
        GroupBy::GuestId => non_empty(&vm.guest_os_id)
            .or_else(|| non_empty(&vm.guest_os_family))
            .map(str::to_string),
        GroupBy::Domain => non_empty(&vm.host_name).and_then(extract_domain),
    };

    match key {
        Some(k) if k != ROOT_GROUP => k,
        _ => DEFAULT_GROUP.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::types::{GuestState, ToolsStatus};

    fn vm(guest_os_id: Option<&str>, family: Option<&str>, host_name: Option<&str>) -> VirtualMachineRecord {
        VirtualMachineRecord {
            name: "vm".to_string(),
            guest_state: GuestState::Running,
            tools_status: ToolsStatus::ToolsOk,
            tools_running_status: None,
            guest_os_id: guest_os_id.map(String::from),
            guest_os_family: family.map(String::from),
            guest_full_name: None,
            host_name: host_name.map(String::from),
            ip_address: None,
        }
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("hostname"), None);
        assert_eq!(extract_domain("example.com"), Some("com".to_string()));
        assert_eq!(extract_domain("hostname.example.com"), Some("example_com".to_string()));
        assert_eq!(extract_domain("hostname.t0.example.com"), Some("t0_example_com".to_string()));
    }

    #[test]
    fn test_extract_domain_degenerate() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("host."), None);
        assert_eq!(extract_domain(".example.com"), Some("example_com".to_string()));
    }

    #[test]
    fn test_guest_id_fallbacks() {
        assert_eq!(group_key(&vm(Some("rhel7"), Some("linux"), None), GroupBy::GuestId), "rhel7");
        assert_eq!(group_key(&vm(None, Some("linux"), None), GroupBy::GuestId), "linux");
        assert_eq!(group_key(&vm(Some(""), Some("linux"), None), GroupBy::GuestId), "linux");
        assert_eq!(group_key(&vm(None, None, None), GroupBy::GuestId), DEFAULT_GROUP);
    }

    #[test]
    fn test_domain_fallbacks() {
        assert_eq!(group_key(&vm(None, None, Some("a.dc1.example.com")), GroupBy::Domain), "dc1_example_com");
        assert_eq!(group_key(&vm(Some("rhel7"), None, Some("a")), GroupBy::Domain), DEFAULT_GROUP);
        assert_eq!(group_key(&vm(Some("rhel7"), None, None), GroupBy::Domain), DEFAULT_GROUP);
        assert_eq!(group_key(&vm(None, None, Some("")), GroupBy::Domain), DEFAULT_GROUP);
    }

    #[test]
    fn test_root_name_is_never_a_child() {
        assert_eq!(group_key(&vm(None, None, Some("a.vcenter")), GroupBy::Domain), DEFAULT_GROUP);
        assert_eq!(group_key(&vm(Some("vcenter"), None, None), GroupBy::GuestId), DEFAULT_GROUP);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("guest_id".parse::<GroupBy>().unwrap(), GroupBy::GuestId);
        assert_eq!("byGuestId".parse::<GroupBy>().unwrap(), GroupBy::GuestId);
        assert_eq!("Domain".parse::<GroupBy>().unwrap(), GroupBy::Domain);
        assert_eq!("byDomain".parse::<GroupBy>().unwrap(), GroupBy::Domain);

        let err = "cluster".parse::<GroupBy>().unwrap_err();
        assert!(matches!(err, InventoryError::InvalidGroupingPolicy(ref v) if v == "cluster"));
    }
}
