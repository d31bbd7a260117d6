use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Name of the group that lists every other group as a child.
pub const ROOT_GROUP: &str = "vcenter";

/// Group used when no key can be derived from a machine's guest data.
pub const DEFAULT_GROUP: &str = "ungrouped";

/// Run state of the guest operating system as reported by vCenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuestState {
    Running,
    NotRunning,
    ShuttingDown,
    Resetting,
    Standby,
    #[serde(other)]
    Unknown,
}

/// Install state of the in-guest VMware Tools agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolsStatus {
    ToolsNotInstalled,
    ToolsNotRunning,
    ToolsOld,
    ToolsOk,
    #[serde(other)]
    Unknown,
}

impl ToolsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolsStatus::ToolsNotInstalled => "toolsNotInstalled",
            ToolsStatus::ToolsNotRunning => "toolsNotRunning",
            ToolsStatus::ToolsOld => "toolsOld",
            ToolsStatus::ToolsOk => "toolsOk",
            ToolsStatus::Unknown => "unknown",
        }
    }
}

/// One virtual machine as seen by the inventory logic. Every guest field
/// is best-effort: machines without running tools report none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineRecord {
    pub name: String,
    pub guest_state: GuestState,
    pub tools_status: ToolsStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_running_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_os_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_os_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Grouped host listing in the shape Ansible expects from `--list`:
///
/// ```json
/// {
///   "vcenter": { "children": ["rhel7", "windows9"] },
///   "rhel7": { "hosts": ["a.example.com"] },
///   "windows9": { "hosts": ["b.example.com"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryDocument {
    groups: IndexMap<String, Vec<String>>,
}

impl InventoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `host` to `group`, registering the group as a root child the
    /// first time it is seen.
    pub fn add_host(&mut self, group: &str, host: String) {
        match self.groups.get_mut(group) {
            Some(hosts) => hosts.push(host),
            None => {
                self.groups.insert(group.to_string(), vec![host]);
            }
        }
    }

    /// Child group names of the root, in first-encounter order.
    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn hosts(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn host_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[derive(Serialize)]
struct RootGroup<'a> {
    children: Vec<&'a str>,
}

#[derive(Serialize)]
struct HostGroup<'a> {
    hosts: &'a [String],
}

impl Serialize for InventoryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        map.serialize_entry(
            ROOT_GROUP,
            &RootGroup {
                children: self.children().collect(),
            },
        )?;
        for (name, hosts) in &self.groups {
            map.serialize_entry(name, &HostGroup { hosts })?;
        }
        map.end()
    }
}

/// Facts returned for a single host by `--host`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostFacts {
    pub vm_name: String,
    pub vm_guest_fullname: String,
    #[serde(rename = "vm_guest_toolsStatus")]
    pub vm_guest_tools_status: String,
    #[serde(rename = "vm_guest_toolsRunningStatus")]
    pub vm_guest_tools_running_status: String,
    #[serde(rename = "vm_guest_guestId")]
    pub vm_guest_guest_id: String,
    #[serde(rename = "vm_guest_hostName")]
    pub vm_guest_host_name: String,
}

impl From<&VirtualMachineRecord> for HostFacts {
    fn from(vm: &VirtualMachineRecord) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();

        HostFacts {
            vm_name: vm.name.clone(),
            vm_guest_fullname: text(&vm.guest_full_name),
            vm_guest_tools_status: vm.tools_status.as_str().to_string(),
            vm_guest_tools_running_status: text(&vm.tools_running_status),
            vm_guest_guest_id: text(&vm.guest_os_id),
            vm_guest_host_name: text(&vm.host_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_shape() {
        let mut doc = InventoryDocument::new();
        doc.add_host("rhel7", "a.example.com".to_string());
        doc.add_host("win2k19", "10.0.0.9".to_string());
        doc.add_host("rhel7", "b.example.com".to_string());

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "vcenter": { "children": ["rhel7", "win2k19"] },
                "rhel7": { "hosts": ["a.example.com", "b.example.com"] },
                "win2k19": { "hosts": ["10.0.0.9"] }
            })
        );
    }

    #[test]
    fn test_root_key_comes_first() {
        let mut doc = InventoryDocument::new();
        doc.add_host("zeta", "z".to_string());
        doc.add_host("alpha", "a".to_string());

        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            text,
            r#"{"vcenter":{"children":["zeta","alpha"]},"zeta":{"hosts":["z"]},"alpha":{"hosts":["a"]}}"#
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = InventoryDocument::new();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value, json!({ "vcenter": { "children": [] } }));
    }

    #[test]
    fn test_record_deserializes_unknown_states() {
        let vm: VirtualMachineRecord = serde_json::from_value(json!({
            "name": "db01",
            "guestState": "migrating",
            "toolsStatus": "toolsSomethingNew"
        }))
        .unwrap();

        assert_eq!(vm.guest_state, GuestState::Unknown);
        assert_eq!(vm.tools_status, ToolsStatus::Unknown);
        assert_eq!(vm.host_name, None);
    }

    #[test]
    fn test_host_facts_keys() {
        let vm = VirtualMachineRecord {
            name: "web01".to_string(),
            guest_state: GuestState::Running,
            tools_status: ToolsStatus::ToolsOk,
            tools_running_status: Some("guestToolsRunning".to_string()),
            guest_os_id: Some("RHEL_7_64".to_string()),
            guest_os_family: Some("LINUX".to_string()),
            guest_full_name: None,
            host_name: Some("web01.example.com".to_string()),
            ip_address: Some("10.0.0.1".to_string()),
        };

        let value = serde_json::to_value(HostFacts::from(&vm)).unwrap();
        assert_eq!(
            value,
            json!({
                "vm_name": "web01",
                "vm_guest_fullname": "",
                "vm_guest_toolsStatus": "toolsOk",
                "vm_guest_toolsRunningStatus": "guestToolsRunning",
                "vm_guest_guestId": "RHEL_7_64",
                "vm_guest_hostName": "web01.example.com"
            })
        );
    }
}
