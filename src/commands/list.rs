use tracing::info;

use crate::config::Config;
use crate::error::InventoryError;
use crate::inventory::{build_inventory, GroupBy, VirtualMachineRecord};
use crate::output::render;
use crate::vcenter;

pub fn handle_list_command(config: &Config, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let records = vcenter::fetch_records(config)?;
    println!("{}", render_list(&records, config.group_by, config.use_address, format)?);
    Ok(())
}

pub fn render_list(
    records: &[VirtualMachineRecord],
    group_by: GroupBy,
    use_address: bool,
    format: &str,
) -> Result<String, InventoryError> {
    let inventory = build_inventory(records, group_by, use_address);
    info!(
        "Built inventory with {} groups and {} hosts",
        inventory.group_count(),
        inventory.host_count()
    );
    render(&inventory, format)
}
