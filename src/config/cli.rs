//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::platform::OsFamily;

use super::defaults;

/// puppetconf: puppet.conf and auth.conf generator
///
/// Resolves class parameters against node facts and a platform profile,
/// then writes the `[main]` settings and the authorization rules.
#[derive(Debug, Parser)]
#[command(name = "puppetconf")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Explicit master name (overrides the global puppetmaster fact)
    #[arg(long)]
    pub puppetmaster: Option<String>,

    /// Discover the master through DNS SRV records
    #[arg(long = "use-srv-records", overrides_with = "no_use_srv_records")]
    pub use_srv_records: bool,

    /// Disable SRV discovery even if the config file enables it
    #[arg(long = "no-use-srv-records", overrides_with = "use_srv_records")]
    pub no_use_srv_records: bool,

    /// Domain to query SRV records under (default: domain fact)
    #[arg(long = "srv-domain")]
    pub srv_domain: Option<String>,

    /// Accept run requests
    #[arg(long, overrides_with = "no_listen")]
    pub listen: bool,

    /// Refuse run requests even if the config file enables them
    #[arg(long = "no-listen", overrides_with = "listen")]
    pub no_listen: bool,

    /// Host allowed to trigger runs (can be specified multiple times)
    #[arg(long = "listen-to", value_name = "HOST")]
    pub listen_to: Vec<String>,

    /// Allow any client to fetch the CRL
    #[arg(long = "allow-any-crl-auth", overrides_with = "no_allow_any_crl_auth")]
    pub allow_any_crl_auth: bool,

    /// Keep the restrictive CRL rule even if the config file opens it
    #[arg(long = "no-allow-any-crl-auth", overrides_with = "allow_any_crl_auth")]
    pub no_allow_any_crl_auth: bool,

    /// Identity for the explicit allow rule (can be specified multiple times)
    #[arg(long = "auth-allowed", value_name = "IDENTITY")]
    pub auth_allowed: Vec<String>,

    /// Alternate DNS name for the agent certificate (can be specified multiple times)
    #[arg(long = "dns-alt-name", value_name = "NAME")]
    pub dns_alt_names: Vec<String>,

    /// Syslog facility
    #[arg(long)]
    pub syslogfacility: Option<String>,

    /// Module forge URL
    #[arg(long = "module-repository", value_name = "URL")]
    pub module_repository: Option<String>,

    /// Log diffs of changed files
    #[arg(long = "show-diff", overrides_with = "no_show_diff")]
    pub show_diff: bool,

    /// Do not log diffs even if the config file enables it
    #[arg(long = "no-show-diff", overrides_with = "show_diff")]
    pub no_show_diff: bool,

    /// Additional [main] setting in 'name=value' format (can be specified multiple times)
    #[arg(long = "setting", value_name = "NAME=VALUE")]
    pub settings: Vec<String>,

    /// Path to a facts file (`facter --json` output)
    #[arg(long = "facts", value_name = "PATH")]
    pub facts_file: Option<PathBuf>,

    /// Fully-qualified host name (overrides facts)
    #[arg(long)]
    pub fqdn: Option<String>,

    /// Host domain (overrides facts)
    #[arg(long)]
    pub domain: Option<String>,

    /// Site-wide master name (overrides the puppetmaster fact)
    #[arg(long = "global-puppetmaster")]
    pub global_puppetmaster: Option<String>,

    /// OS family selecting the platform profile
    #[arg(long = "os-family", value_enum)]
    pub os_family: Option<OsFamilyArg>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Directory to write puppet.conf and auth.conf (default: platform confdir)
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for puppetconf
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// OS family argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OsFamilyArg {
    /// Linux AIO layout
    #[value(name = "linux")]
    Linux,
    /// FreeBSD ports layout
    #[value(name = "freebsd")]
    FreeBsd,
    /// Windows layout
    #[value(name = "windows")]
    Windows,
}

impl From<OsFamilyArg> for OsFamily {
    fn from(arg: OsFamilyArg) -> Self {
        match arg {
            OsFamilyArg::Linux => Self::Linux,
            OsFamilyArg::FreeBsd => Self::FreeBsd,
            OsFamilyArg::Windows => Self::Windows,
        }
    }
}

/// Output format for dry runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The rendered puppet.conf and auth.conf
    #[default]
    Text,
    /// Settings and rules as JSON
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
