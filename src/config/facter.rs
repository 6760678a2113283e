//! Facts file parsing (`facter --json` output).
//!
//! Both legacy flat facts (`fqdn`, `domain`, `osfamily`) and structured
//! facts (`networking.fqdn`, `networking.domain`, `os.family`) are read;
//! a flat fact wins when both are present.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Facts relevant to configuration generation.
///
/// Unknown facts are ignored; facter emits hundreds of them.
#[derive(Debug, Default, Deserialize)]
pub struct FacterFacts {
    /// Legacy `fqdn` fact
    pub fqdn: Option<String>,

    /// Legacy `domain` fact
    pub domain: Option<String>,

    /// Site-wide `puppetmaster` fact
    pub puppetmaster: Option<String>,

    /// Legacy `osfamily` fact
    pub osfamily: Option<String>,

    /// Structured `networking` fact
    #[serde(default)]
    pub networking: NetworkingFacts,

    /// Structured `os` fact
    #[serde(default)]
    pub os: OsFacts,
}

/// Structured networking facts.
#[derive(Debug, Default, Deserialize)]
pub struct NetworkingFacts {
    /// Fully-qualified host name
    pub fqdn: Option<String>,

    /// Host domain
    pub domain: Option<String>,
}

/// Structured operating system facts.
#[derive(Debug, Default, Deserialize)]
pub struct OsFacts {
    /// OS family
    pub family: Option<String>,
}

impl FacterFacts {
    /// Loads facts from a JSON file.
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

    /// Parses facts from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Fully-qualified host name, flat fact first.
    #[must_use]
    pub fn fqdn(&self) -> Option<&str> {
        present(self.fqdn.as_deref()).or_else(|| present(self.networking.fqdn.as_deref()))
    }

    /// Host domain, flat fact first.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        present(self.domain.as_deref()).or_else(|| present(self.networking.domain.as_deref()))
    }

    /// Site-wide master name.
    #[must_use]
    pub fn puppetmaster(&self) -> Option<&str> {
        present(self.puppetmaster.as_deref())
    }

    /// OS family, flat fact first.
    #[must_use]
    pub fn os_family(&self) -> Option<&str> {
        present(self.osfamily.as_deref()).or_else(|| present(self.os.family.as_deref()))
    }
}

/// Facter reports unset facts as `""` on some platforms.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
