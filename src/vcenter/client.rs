use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::InventoryError;
use crate::inventory::VirtualMachineRecord;
use crate::vcenter::types::{GuestIdentity, ToolsInfo, VmSummary};

const SESSION_HEADER: &str = "vmware-api-session-id";

/// Authenticated session against the vSphere Automation REST API. The
/// session is closed on drop.
pub struct VcenterClient {
    client: Client,
    base_url: String,
    session_id: Option<String>,
}

impl VcenterClient {
    pub fn connect(config: &Config) -> Result<Self, InventoryError> {
        config.validate()?;

        let client = Client::builder()
            .danger_accept_invalid_certs(!config.validate_certs)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.base_url();
        let url = format!("{}/api/session", base_url);
        info!("Connecting to vCenter at {}", base_url);

        let response = client
            .post(&url)
            .basic_auth(&config.username, Some(&config.password))
            .send()?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(InventoryError::Authentication(base_url));
        }
        let session_id: String = check(response, &url)?.json()?;
        debug!("vCenter session established");

        Ok(VcenterClient {
            client,
            base_url,
            session_id: Some(session_id),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_session(base_url: &str, session_id: &str) -> Self {
        VcenterClient {
            client: Client::builder().timeout(Duration::from_secs(5)).build().unwrap(),
            base_url: base_url.to_string(),
            session_id: Some(session_id.to_string()),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, InventoryError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(session_id) = &self.session_id {
            request = request.header(SESSION_HEADER, session_id);
        }

        let response = request.send()?;
        Ok(check(response, &url)?.json()?)
    }

    pub fn list_vms(&self) -> Result<Vec<VmSummary>, InventoryError> {
        self.get("/api/vcenter/vm")
    }

    /// Guest identity of `vm`. A VM whose identity cannot be read is still
    /// listed, just without guest data.
    pub fn guest_identity(&self, vm: &str) -> Option<GuestIdentity> {
        identity_or_none(self.get(&format!("/api/vcenter/vm/{}/guest/identity", vm)), vm)
    }

    pub fn tools_info(&self, vm: &str) -> Option<ToolsInfo> {
        match self.get(&format!("/api/vcenter/vm/{}/tools", vm)) {
            Ok(tools) => Some(tools),
            Err(e) => {
                debug!(vm, error = %e, "tools state unavailable");
                None
            }
        }
    }

    /// Fetches every VM with its guest and tools data.
    pub fn fetch_records(&self) -> Result<Vec<VirtualMachineRecord>, InventoryError> {
        let vms = self.list_vms()?;
        info!("Found {} virtual machines", vms.len());

        let mut records = Vec::with_capacity(vms.len());
        for summary in &vms {
            let tools = self.tools_info(&summary.vm);
            let identity = if summary.power_state == "POWERED_ON" {
                self.guest_identity(&summary.vm)
            } else {
                None
            };

            records.push(VirtualMachineRecord::from_api(summary, identity.as_ref(), tools.as_ref()));
        }

        Ok(records)
    }

    pub fn disconnect(&mut self) -> Result<(), InventoryError> {
        let Some(session_id) = self.session_id.take() else {
            return Ok(());
        };

        let url = format!("{}/api/session", self.base_url);
        let response = self
            .client
            .delete(&url)
            .header(SESSION_HEADER, session_id)
            .send()?;
        check(response, &url)?;
        debug!("vCenter session closed");
        Ok(())
    }
}

impl Drop for VcenterClient {
    fn drop(&mut self) {
        if let Err(e) = self.disconnect() {
            warn!("Failed to close vCenter session: {}", e);
        }
    }
}

// 503 means VMware Tools is not running; 404 means the VM went away
// between the listing and this call.
fn identity_or_none(result: Result<GuestIdentity, InventoryError>, vm: &str) -> Option<GuestIdentity> {
    match result {
        Ok(identity) => Some(identity),
        Err(InventoryError::Api { status: 503 | 404, .. }) => {
            debug!(vm, "guest identity unavailable");
            None
        }
        Err(e) => {
            warn!(vm, error = %e, "failed to read guest identity");
            None
        }
    }
}

fn check(response: Response, url: &str) -> Result<Response, InventoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(InventoryError::Api {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}
