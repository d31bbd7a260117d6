use std::path::PathBuf;

/// Errors raised while loading configuration, talking to vCenter or
/// rendering the inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// `group_by` is neither the guest-id nor the domain policy.
    #[error("invalid grouping policy '{0}' (expected 'guest_id' or 'domain')")]
    InvalidGroupingPolicy(String),

    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to parse configuration {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("configuration is missing required field '{0}'")]
    MissingConfigField(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("vCenter API returned HTTP {status} for {url}: {body}")]
    Api { status: u16, url: String, body: String },

    #[error("authentication to vCenter at {0} failed")]
    Authentication(String),

    #[error("failed to serialize output: {0}")]
    Serialization(String),

    #[error("unsupported output format '{0}' (expected 'json' or 'yaml')")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for InventoryError {
    fn from(e: serde_json::Error) -> Self {
        InventoryError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for InventoryError {
    fn from(e: serde_yaml::Error) -> Self {
        InventoryError::Serialization(e.to_string())
    }
}
