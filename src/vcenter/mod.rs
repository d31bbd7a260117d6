// vCenter session and VM retrieval
pub mod types;
pub mod client;

pub use client::VcenterClient;

use tracing::warn;

use crate::config::Config;
use crate::error::InventoryError;
use crate::inventory::VirtualMachineRecord;

/// Opens a session, reads all VM records and closes the session again.
/// Records already read are returned even if closing the session fails.
pub fn fetch_records(config: &Config) -> Result<Vec<VirtualMachineRecord>, InventoryError> {
    let mut client = VcenterClient::connect(config)?;
    read_and_close(&mut client)
}

fn read_and_close(client: &mut VcenterClient) -> Result<Vec<VirtualMachineRecord>, InventoryError> {
    let records = client.fetch_records()?;
    if let Err(e) = client.disconnect() {
        warn!("Failed to close vCenter session: {}", e);
    }
    Ok(records)
}
