use tracing::debug;

use crate::inventory::grouping::{group_key, GroupBy};
use crate::inventory::types::{GuestState, InventoryDocument, ToolsStatus, VirtualMachineRecord};

/// Whether `vm` belongs in the `--list` output. Machines with no host
/// name or address are still listed, with an empty host entry.
pub fn is_eligible(vm: &VirtualMachineRecord) -> bool {
    if vm.guest_state == GuestState::NotRunning {
        return false;
    }
    if vm.tools_status == ToolsStatus::ToolsNotInstalled {
        return false;
    }
    true
}

/// Builds the grouped inventory. Group order follows first appearance in
/// `records`; hosts keep input order, duplicates and empty values included.
pub fn build_inventory(records: &[VirtualMachineRecord], group_by: GroupBy, use_address: bool) -> InventoryDocument {
    let mut inventory = InventoryDocument::new();

    for vm in records {
        if !is_eligible(vm) {
            debug!(vm = %vm.name, state = ?vm.guest_state, tools = ?vm.tools_status, "skipping ineligible VM");
            continue;
        }

        let group = group_key(vm, group_by);
        let host = if use_address { &vm.ip_address } else { &vm.host_name };
        let host = host.clone().unwrap_or_default();

        debug!(vm = %vm.name, %group, %host, "adding host");
        inventory.add_host(&group, host);
    }

    inventory
}
