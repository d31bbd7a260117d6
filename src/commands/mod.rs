pub mod list;
pub mod host;

pub use host::handle_host_command;
pub use list::handle_list_command;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{resolve_config_path, Config};
use crate::error::InventoryError;

/// Loads the configuration file, then applies environment and command-line
/// overrides. Fails before any network access on a bad grouping policy.
pub fn load_settings(cli: &Cli) -> Result<Config, InventoryError> {
    let path = resolve_config_path(cli.config.as_deref());
    let mut config = Config::load(&path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    apply_overrides(&mut config, cli)?;

    debug!(
        server = %config.server,
        group_by = %config.group_by,
        use_address = config.use_address,
        "resolved settings"
    );
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<(), InventoryError> {
    if let Some(policy) = &cli.group_by {
        config.group_by = policy.parse()?;
    }
    if cli.use_address {
        config.use_address = true;
    }
    if cli.use_names {
        config.use_address = false;
    }
    Ok(())
}
