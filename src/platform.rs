//! Platform profiles: per-OS-family default paths.
//!
//! The core never derives these paths; it receives a [`PlatformProfile`]
//! and copies values out of it verbatim. [`PlatformProfile::for_family`]
//! supplies the stock tables for the supported OS families.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Operating system family, as reported by the `osfamily` fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// Any Linux distribution using the AIO package layout.
    #[default]
    Linux,
    /// FreeBSD ports layout.
    FreeBsd,
    /// Windows `ProgramData` layout.
    Windows,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::FreeBsd => write!(f, "freebsd"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Error returned when an OS family string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown OS family '{0}' (expected linux, freebsd or windows)")]
pub struct UnknownOsFamily(pub String);

impl FromStr for OsFamily {
    type Err = UnknownOsFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" | "redhat" | "debian" | "suse" | "archlinux" | "gentoo" => Ok(Self::Linux),
            "freebsd" => Ok(Self::FreeBsd),
            "windows" => Ok(Self::Windows),
            _ => Err(UnknownOsFamily(s.to_string())),
        }
    }
}

/// Filesystem layout and directory ownership for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    /// Owner of the configuration directory, if the platform has one.
    pub dir_owner: Option<String>,
    /// Group of the configuration directory, if the platform has one.
    pub dir_group: Option<String>,
    /// Code directory (environments, modules).
    pub codedir: String,
    /// Configuration directory holding `puppet.conf` and `auth.conf`.
    pub confdir: String,
    /// Log directory.
    pub logdir: String,
    /// Run (pid) directory.
    pub rundir: String,
    /// SSL directory.
    pub ssldir: String,
    /// Cache/state directory.
    pub vardir: String,
    /// Shared data directory.
    pub sharedir: String,
}

const WINDOWS_ROOT: &str = "C:/ProgramData/PuppetLabs/puppet";

impl PlatformProfile {
    /// Returns the stock profile for an OS family.
    #[must_use]
    pub fn for_family(family: OsFamily) -> Self {
        match family {
            OsFamily::Linux => Self {
                dir_owner: Some("root".to_string()),
                dir_group: None,
                codedir: "/etc/puppetlabs/code".to_string(),
                confdir: "/etc/puppetlabs/puppet".to_string(),
                logdir: "/var/log/puppetlabs/puppet".to_string(),
                rundir: "/var/run/puppetlabs".to_string(),
                ssldir: "/etc/puppetlabs/puppet/ssl".to_string(),
                vardir: "/opt/puppetlabs/puppet/cache".to_string(),
                sharedir: "/opt/puppetlabs/puppet".to_string(),
            },
            OsFamily::FreeBsd => Self {
                dir_owner: Some("puppet".to_string()),
                dir_group: Some("puppet".to_string()),
                codedir: "/usr/local/etc/puppet".to_string(),
                confdir: "/usr/local/etc/puppet".to_string(),
                logdir: "/var/log/puppet".to_string(),
                rundir: "/var/run/puppet".to_string(),
                ssldir: "/var/puppet/ssl".to_string(),
                vardir: "/var/puppet".to_string(),
                sharedir: "/usr/local/share/puppet".to_string(),
            },
            OsFamily::Windows => Self {
                dir_owner: None,
                dir_group: None,
                codedir: format!("{WINDOWS_ROOT}/etc"),
                confdir: format!("{WINDOWS_ROOT}/etc"),
                logdir: format!("{WINDOWS_ROOT}/var/log"),
                rundir: format!("{WINDOWS_ROOT}/var/run"),
                ssldir: format!("{WINDOWS_ROOT}/etc/ssl"),
                vardir: format!("{WINDOWS_ROOT}/var"),
                sharedir: format!("{WINDOWS_ROOT}/share"),
            },
        }
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::for_family(OsFamily::default())
    }
}
