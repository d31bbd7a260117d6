//! vCenter connection settings and inventory options.
//!
//! Settings come from a JSON file:
//!
//! ```json
//! {
//!     "server": "vcenter.example.com",
//!     "username": "inventory@vsphere.local",
//!     "password": "secret",
//!     "port": 443,
//!     "group_by": "domain",
//!     "use_address": true
//! }
//! ```
//!
//! `VCENTER_SERVER`, `VCENTER_USERNAME`, `VCENTER_PASSWORD` and `VCENTER_PORT`
//! override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::InventoryError;
use crate::inventory::GroupBy;

pub const CONFIG_ENV: &str = "VCENTER_INVENTORY_CONFIG";
const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "vcenter-inventory";

/// Settings as written in the configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default = "default_port", deserialize_with = "port_from_any")]
    port: u16,
    #[serde(default)]
    group_by: Option<String>,
    #[serde(default)]
    use_address: bool,
    #[serde(default = "default_validate_certs")]
    validate_certs: bool,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub group_by: GroupBy,
    pub use_address: bool,
    pub validate_certs: bool,
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    443
}

fn default_validate_certs() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

/// Accepts the port as a number or as a string (`"443"`).
fn port_from_any<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(p) => Ok(p),
        Port::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl Config {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, InventoryError> {
        let file: ConfigFile = serde_json::from_str(text).map_err(|e| InventoryError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let group_by = match file.group_by.as_deref() {
            Some(policy) => policy.parse()?,
            None => GroupBy::default(),
        };

        Ok(Config {
            server: file.server,
            username: file.username,
            password: file.password,
            port: file.port,
            group_by,
            use_address: file.use_address,
            validate_certs: file.validate_certs,
            timeout_secs: file.timeout_secs,
        })
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        if !path.exists() {
            return Err(InventoryError::ConfigNotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|e| InventoryError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Self::from_json(&text, path)
    }

    /// Applies `VCENTER_*` environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), InventoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup("VCENTER_SERVER") {
            self.server = server;
        }
        if let Some(username) = lookup("VCENTER_USERNAME") {
            self.username = username;
        }
        if let Some(password) = lookup("VCENTER_PASSWORD") {
            self.password = password;
        }
        if let Some(port) = lookup("VCENTER_PORT") {
            self.port = port.trim().parse().map_err(|_| InventoryError::ConfigParse {
                path: PathBuf::from("VCENTER_PORT"),
                message: format!("invalid port '{}'", port),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.server.trim().is_empty() {
            return Err(InventoryError::MissingConfigField("server"));
        }
        if self.username.is_empty() {
            return Err(InventoryError::MissingConfigField("username"));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        let server = self.server.trim().trim_end_matches('/');
        let server = server
            .strip_prefix("https://")
            .or_else(|| server.strip_prefix("http://"))
            .unwrap_or(server);
        format!("https://{}:{}", server, self.port)
    }
}

/// Picks the configuration file: explicit path, then `$VCENTER_INVENTORY_CONFIG`,
/// then `config.json` beside the executable, then the user config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    if beside_exe.exists() {
        return beside_exe;
    }

    match dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)) {
        Some(user) if user.exists() => user,
        _ => beside_exe,
    }
}
