use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "vcenter-inventory")]
#[command(about = "Ansible dynamic inventory of the running VMs in a vCenter")]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "host"])))]
pub struct Cli {
    /// List all running VMs, grouped under the root group "vcenter"
    #[arg(long)]
    pub list: bool,

    /// Return guest information for one host (IP address or host name)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Grouping policy: guest_id or domain (overrides the configuration file)
    #[arg(short, long, value_name = "POLICY")]
    pub group_by: Option<String>,

    /// Use guest IP addresses instead of host names as inventory hosts
    #[arg(short = 'a', long)]
    pub use_address: bool,

    /// Use guest host names as inventory hosts, even if the configuration file sets use_address
    #[arg(long, conflicts_with = "use_address")]
    pub use_names: bool,

    /// Output format (json or yaml)
    #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
    pub format: String,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Query requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    List,
    Host(String),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.host {
            Some(host) => Mode::Host(host.clone()),
            None => Mode::List,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_mode() {
        let cli = Cli::try_parse_from(["vcenter-inventory", "--list"]).unwrap();
        assert_eq!(cli.mode(), Mode::List);
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_host_mode() {
        let cli = Cli::try_parse_from(["vcenter-inventory", "--host", "10.0.0.2"]).unwrap();
        assert_eq!(cli.mode(), Mode::Host("10.0.0.2".to_string()));
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["vcenter-inventory", "--list", "--host", "a"]).is_err());
    }

    #[test]
    fn test_mode_required() {
        assert!(Cli::try_parse_from(["vcenter-inventory"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["vcenter-inventory", "--list", "--format", "ini"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "vcenter-inventory",
            "--list",
            "--group-by",
            "domain",
            "--use-address",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.group_by.as_deref(), Some("domain"));
        assert!(cli.use_address);
        assert!(!cli.use_names);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_host_value_flags_are_exclusive() {
        let cli = Cli::try_parse_from(["vcenter-inventory", "--list", "--use-names"]).unwrap();
        assert!(cli.use_names);
        assert!(Cli::try_parse_from(["vcenter-inventory", "--list", "--use-names", "--use-address"]).is_err());
    }
}
