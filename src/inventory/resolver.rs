use crate::inventory::types::{HostFacts, VirtualMachineRecord};

fn matches(field: &Option<String>, identifier: &str) -> bool {
    field.as_deref() == Some(identifier)
}

/// Facts for the machine whose guest address or host name equals
/// `identifier`. When several machines match, the last one in `records` wins.
pub fn resolve_host(records: &[VirtualMachineRecord], identifier: &str) -> Option<HostFacts> {
    let mut facts = None;

    for vm in records {
        if matches(&vm.ip_address, identifier) || matches(&vm.host_name, identifier) {
            facts = Some(HostFacts::from(vm));
        }
    }

    facts
}
