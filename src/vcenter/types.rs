use serde::{Deserialize, Serialize};

use crate::inventory::{GuestState, ToolsStatus, VirtualMachineRecord};

/// Entry of `GET /api/vcenter/vm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmSummary {
    pub vm: String,
    pub name: String,
    pub power_state: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizableMessage {
    #[serde(default)]
    pub default_message: String,
}

/// Body of `GET /api/vcenter/vm/{vm}/guest/identity`. Only available while
/// VMware Tools runs inside the guest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestIdentity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub full_name: Option<LocalizableMessage>,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Body of `GET /api/vcenter/vm/{vm}/tools`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsInfo {
    #[serde(default)]
    pub run_state: Option<String>,
    #[serde(default)]
    pub version_status: Option<String>,
}

fn tools_running(tools: Option<&ToolsInfo>) -> bool {
    matches!(
        tools.and_then(|t| t.run_state.as_deref()),
        Some("RUNNING") | Some("EXECUTING_SCRIPTS")
    )
}

fn tools_stopped(tools: Option<&ToolsInfo>) -> bool {
    tools.and_then(|t| t.run_state.as_deref()) == Some("NOT_RUNNING")
}

// Mirrors vSphere's guest.guestState: a suspended guest, or one whose tools
// are stopped, reports notRunning.
fn guest_state(summary: &VmSummary, tools: Option<&ToolsInfo>) -> GuestState {
    match summary.power_state.as_str() {
        "POWERED_OFF" | "SUSPENDED" => GuestState::NotRunning,
        "POWERED_ON" if tools_running(tools) => GuestState::Running,
        "POWERED_ON" if tools_stopped(tools) => GuestState::NotRunning,
        _ => GuestState::Unknown,
    }
}

fn tools_status(tools: Option<&ToolsInfo>) -> ToolsStatus {
    let Some(tools) = tools else {
        return ToolsStatus::Unknown;
    };

    match (tools.version_status.as_deref(), tools.run_state.as_deref()) {
        (Some("NOT_INSTALLED"), _) => ToolsStatus::ToolsNotInstalled,
        (_, Some("NOT_RUNNING")) => ToolsStatus::ToolsNotRunning,
        (Some("TOO_OLD_UNSUPPORTED") | Some("SUPPORTED_OLD"), _) => ToolsStatus::ToolsOld,
        (None, None) => ToolsStatus::Unknown,
        _ => ToolsStatus::ToolsOk,
    }
}

fn tools_running_status(tools: Option<&ToolsInfo>) -> Option<String> {
    let status = match tools?.run_state.as_deref()? {
        "RUNNING" => "guestToolsRunning",
        "NOT_RUNNING" => "guestToolsNotRunning",
        "EXECUTING_SCRIPTS" => "guestToolsExecutingScripts",
        other => return Some(other.to_string()),
    };
    Some(status.to_string())
}

impl VirtualMachineRecord {
    /// Combines the three per-VM API views into one record. Missing identity
    /// or tools data leaves the corresponding fields empty.
    pub fn from_api(summary: &VmSummary, identity: Option<&GuestIdentity>, tools: Option<&ToolsInfo>) -> Self {
        VirtualMachineRecord {
            name: summary.name.clone(),
            guest_state: guest_state(summary, tools),
            tools_status: tools_status(tools),
            tools_running_status: tools_running_status(tools),
            guest_os_id: identity.and_then(|i| i.name.clone()),
            guest_os_family: identity.and_then(|i| i.family.clone()),
            guest_full_name: identity
                .and_then(|i| i.full_name.as_ref())
                .map(|m| m.default_message.clone())
                .filter(|m| !m.is_empty()),
            host_name: identity.and_then(|i| i.host_name.clone()),
            ip_address: identity.and_then(|i| i.ip_address.clone()),
        }
    }
}
