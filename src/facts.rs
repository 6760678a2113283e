//! Ambient facts about the node being configured.

use serde::Serialize;

/// Facts consulted by the parameter resolver.
///
/// Passed explicitly into [`crate::resolve()`]; nothing is read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facts {
    /// Fully-qualified name of the local host.
    pub fqdn: String,

    /// DNS domain of the local host, used as the SRV lookup domain.
    pub domain: Option<String>,

    /// Site-wide master name (the "global puppetmaster" fact).
    pub puppetmaster: Option<String>,
}

impl Facts {
    /// Creates facts for a host with no domain and no global master.
    #[must_use]
    pub fn new(fqdn: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            domain: None,
            puppetmaster: None,
        }
    }

    /// Sets the domain fact.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the global puppetmaster fact.
    #[must_use]
    pub fn with_puppetmaster(mut self, puppetmaster: impl Into<String>) -> Self {
        self.puppetmaster = Some(puppetmaster.into());
        self
    }
}
