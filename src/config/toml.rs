//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Class parameters
    #[serde(default)]
    pub puppet: PuppetSection,

    /// Free-form `[main]` settings, kept in declaration order
    #[serde(default)]
    pub additional_settings: toml::Table,

    /// Fact overrides
    #[serde(default)]
    pub facts: FactsSection,

    /// Platform profile selection and path overrides
    #[serde(default)]
    pub platform: PlatformSection,

    /// Output location
    #[serde(default)]
    pub output: OutputSection,
}

/// Class parameter section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct PuppetSection {
    /// Explicit master name
    pub puppetmaster: Option<String>,

    /// Discover the master through SRV records
    #[serde(default)]
    pub use_srv_records: bool,

    /// SRV lookup domain
    pub srv_domain: Option<String>,

    /// Accept run requests
    #[serde(default)]
    pub listen: bool,

    /// Hosts allowed to trigger runs
    #[serde(default)]
    pub listen_to: Vec<String>,

    /// Allow any client to fetch the CRL
    #[serde(default)]
    pub allow_any_crl_auth: bool,

    /// Identities for the explicit allow rule
    #[serde(default)]
    pub auth_allowed: Vec<String>,

    /// Certificate alternate DNS names
    #[serde(default)]
    pub dns_alt_names: Vec<String>,

    /// Syslog facility
    pub syslogfacility: Option<String>,

    /// Module forge URL
    pub module_repository: Option<String>,

    /// Log diffs of changed files
    #[serde(default)]
    pub show_diff: bool,
}

/// Fact override section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactsSection {
    /// Fully-qualified host name
    pub fqdn: Option<String>,

    /// Host domain
    pub domain: Option<String>,

    /// Site-wide master name
    pub puppetmaster: Option<String>,
}

/// Platform section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformSection {
    /// OS family: "linux", "freebsd", or "windows" (facter names accepted)
    pub os_family: Option<String>,

    /// Configuration directory owner
    pub dir_owner: Option<String>,

    /// Configuration directory group
    pub dir_group: Option<String>,

    /// Code directory
    pub codedir: Option<String>,

    /// Configuration directory
    pub confdir: Option<String>,

    /// Log directory
    pub logdir: Option<String>,

    /// Run directory
    pub rundir: Option<String>,

    /// SSL directory
    pub ssldir: Option<String>,

    /// Cache directory
    pub vardir: Option<String>,

    /// Shared data directory
    pub sharedir: Option<String>,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Directory to write puppet.conf and auth.conf
    pub dir: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# puppetconf configuration file

[puppet]
# Explicit master name (default: puppetmaster fact, then fqdn)
# puppetmaster = "puppet.example.com"

# Discover the master through DNS SRV records instead of a fixed name.
# Requires srv_domain or a domain fact unless puppetmaster is set.
# use_srv_records = false
# srv_domain = "example.com"

# Accept run requests from these hosts (default: puppetmaster, then fqdn)
# listen = false
# listen_to = ["node1.example.com", "node2.example.com"]

# Let any client fetch the CRL
# allow_any_crl_auth = false

# Identities for the explicit allow rule
# auth_allowed = ["$1", "puppetproxy"]

# dns_alt_names = ["puppet", "puppet.example.com"]
# syslogfacility = "local6"
# module_repository = "https://forgeapi.puppet.com"
# show_diff = false

[additional_settings]
# Extra [main] settings, written in this order.
# A name matching a built-in setting replaces its value.
# disable_warnings = "deprecations"

[facts]
# Overrides for facts read from --facts
# fqdn = "agent01.example.com"
# domain = "example.com"
# puppetmaster = "puppet.example.com"

[platform]
# OS family: "linux", "freebsd", or "windows" (default: osfamily fact, then linux)
# os_family = "linux"

# Individual path overrides
# vardir = "/opt/puppetlabs/puppet/cache"
# ssldir = "/etc/puppetlabs/puppet/ssl"

[output]
# Directory for puppet.conf and auth.conf (default: platform confdir)
# dir = "/etc/puppetlabs/puppet"
"#
    .to_string()
}
