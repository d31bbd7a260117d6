use tracing::info;

use crate::config::Config;
use crate::error::InventoryError;
use crate::inventory::{resolve_host, VirtualMachineRecord};
use crate::output::render;
use crate::vcenter;

pub fn handle_host_command(config: &Config, host: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let records = vcenter::fetch_records(config)?;
    println!("{}", render_host(&records, host, format)?);
    Ok(())
}

/// Facts of the last VM matching `host`, or an empty object when none does.
pub fn render_host(records: &[VirtualMachineRecord], host: &str, format: &str) -> Result<String, InventoryError> {
    match resolve_host(records, host) {
        Some(facts) => render(&facts, format),
        None => {
            // Ansible expects an empty object for unknown hosts
            info!("No VM matches '{}'", host);
            render(&serde_json::Map::new(), format)
        }
    }
}
