//! Parameter resolution: explicit parameters + facts + platform profile.
//!
//! Every field has its own precedence chain, written out as an ordered list
//! of optional sources. The first non-empty source wins and is recorded in
//! the resulting [`ParameterSet`], so the compilers downstream never look at
//! the raw sources again.
//!
//! # Server Name
//!
//! 1. **Explicit `puppetmaster` parameter**
//! 2. **Global `puppetmaster` fact**
//! 3. **Local fully-qualified host name**
//!
//! # SRV Domain
//!
//! Only resolved when `use_srv_records` is set:
//!
//! 1. **Explicit `srv_domain` parameter**
//! 2. **`domain` fact**
//!
//! If neither yields a value and no explicit server was given, resolution
//! fails with [`ResolveError::MissingRequiredDerivedValue`].

mod error;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::ResolveError;

use serde::Serialize;

use crate::facts::Facts;
use crate::platform::PlatformProfile;
use crate::settings::SettingValue;

/// Well-known field names for [`ResolveError`].
pub mod field {
    /// The SRV lookup domain.
    pub const SRV_DOMAIN: &str = "srv_domain";
    /// The master server name.
    pub const SERVER: &str = "server";
}

/// Parameters given explicitly on the class invocation.
///
/// Everything is optional or defaults to off; absent values simply
/// suppress the corresponding settings and rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // Class parameters are naturally boolean
pub struct ExplicitParams {
    /// Explicit master name, overriding facts.
    pub puppetmaster: Option<String>,
    /// Discover the master through DNS SRV records.
    pub use_srv_records: bool,
    /// Domain to query SRV records under.
    pub srv_domain: Option<String>,
    /// Accept `puppet kick` style run requests.
    pub listen: bool,
    /// Hosts allowed to trigger runs when listening.
    pub listen_to: Vec<String>,
    /// Let any client fetch the CRL without authentication.
    pub allow_any_crl_auth: bool,
    /// Identities granted through the explicit allow rule.
    pub auth_allowed: Vec<String>,
    /// Free-form settings merged after the built-in ones.
    pub additional_settings: Vec<(String, SettingValue)>,
    /// Alternate DNS names for the agent certificate.
    pub dns_alt_names: Vec<String>,
    /// Syslog facility name.
    pub syslogfacility: Option<String>,
    /// Module forge URL.
    pub module_repository: Option<String>,
    /// Log diffs of changed files.
    pub show_diff: bool,
}

impl ExplicitParams {
    /// Creates parameters with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit master name.
    #[must_use]
    pub fn with_puppetmaster(mut self, puppetmaster: impl Into<String>) -> Self {
        self.puppetmaster = Some(puppetmaster.into());
        self
    }

    /// Enables SRV record discovery.
    #[must_use]
    pub const fn with_srv_records(mut self, enabled: bool) -> Self {
        self.use_srv_records = enabled;
        self
    }

    /// Sets the SRV lookup domain.
    #[must_use]
    pub fn with_srv_domain(mut self, domain: impl Into<String>) -> Self {
        self.srv_domain = Some(domain.into());
        self
    }

    /// Enables listening for run requests from the given hosts.
    #[must_use]
    pub fn with_listen<I, S>(mut self, listen_to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listen = true;
        self.listen_to = listen_to.into_iter().map(Into::into).collect();
        self
    }

    /// Allows unauthenticated CRL retrieval.
    #[must_use]
    pub const fn with_any_crl_auth(mut self, enabled: bool) -> Self {
        self.allow_any_crl_auth = enabled;
        self
    }

    /// Sets the explicit allow list.
    #[must_use]
    pub fn with_auth_allowed<I, S>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auth_allowed = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Appends an additional setting.
    #[must_use]
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.additional_settings.push((name.into(), value.into()));
        self
    }

    /// Sets the certificate alternate DNS names.
    #[must_use]
    pub fn with_dns_alt_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dns_alt_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the syslog facility.
    #[must_use]
    pub fn with_syslogfacility(mut self, facility: impl Into<String>) -> Self {
        self.syslogfacility = Some(facility.into());
        self
    }

    /// Sets the module repository URL.
    #[must_use]
    pub fn with_module_repository(mut self, url: impl Into<String>) -> Self {
        self.module_repository = Some(url.into());
        self
    }

    /// Enables diff logging.
    #[must_use]
    pub const fn with_show_diff(mut self, enabled: bool) -> Self {
        self.show_diff = enabled;
        self
    }
}

/// Fully resolved inputs for both compilers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParameterSet {
    /// Master name for the `server` setting; `None` exactly in SRV mode.
    pub server_name: Option<String>,
    /// The explicit master override, kept for the run ACL.
    pub explicit_server: Option<String>,
    /// Local fully-qualified host name.
    pub fqdn: String,
    /// SRV discovery mode.
    pub use_srv_records: bool,
    /// Resolved SRV domain (SRV mode only).
    pub srv_domain: Option<String>,
    /// Run-request listening.
    pub listen: bool,
    /// Hosts allowed to trigger runs.
    pub listen_to: Vec<String>,
    /// Unauthenticated CRL access.
    pub allow_any_crl_auth: bool,
    /// Explicit allow list.
    pub auth_allowed: Vec<String>,
    /// Free-form settings, declaration order.
    pub additional_settings: Vec<(String, SettingValue)>,
    /// Certificate alternate DNS names.
    pub dns_alt_names: Vec<String>,
    /// Syslog facility.
    pub syslogfacility: Option<String>,
    /// Module forge URL.
    pub module_repository: Option<String>,
    /// Diff logging.
    pub show_diff: bool,
    /// Platform paths, copied verbatim.
    pub platform: PlatformProfile,
}

impl ParameterSet {
    /// Returns the resolved master name, if SRV mode is off.
    #[must_use]
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }
}

/// One candidate in a precedence chain: a source label and its value.
type Source<'a> = (&'static str, Option<&'a str>);

/// Returns the first non-empty value in `chain`.
fn first_present<'a>(field: &'static str, chain: &[Source<'a>]) -> Option<&'a str> {
    let winner = chain
        .iter()
        .find_map(|&(source, value)| value.filter(|v| !v.is_empty()).map(|v| (source, v)));

    match winner {
        Some((source, value)) => {
            tracing::debug!(field, source, value, "Resolved parameter");
            Some(value)
        }
        None => {
            tracing::debug!(field, "No source provided a value");
            None
        }
    }
}

/// Resolves explicit parameters, facts and platform defaults into a
/// [`ParameterSet`].
///
/// # Errors
///
/// Returns [`ResolveError::MissingRequiredDerivedValue`] when SRV mode is
/// requested without an explicit server and no SRV domain can be derived.
pub fn resolve(
    explicit: &ExplicitParams,
    facts: &Facts,
    platform: &PlatformProfile,
) -> Result<ParameterSet, ResolveError> {
    let explicit_server = first_present(
        field::SERVER,
        &[("puppetmaster parameter", explicit.puppetmaster.as_deref())],
    )
    .map(str::to_string);

    let srv_domain = if explicit.use_srv_records {
        resolve_srv_domain(explicit, facts, explicit_server.is_some())?
    } else {
        None
    };

    let server_name = if explicit.use_srv_records {
        if let Some(ref server) = explicit_server {
            tracing::warn!(
                server = %server,
                "SRV discovery enabled; explicit server is not written to the server setting"
            );
        }
        None
    } else {
        let server = first_present(
            field::SERVER,
            &[
                ("puppetmaster parameter", explicit_server.as_deref()),
                ("puppetmaster fact", facts.puppetmaster.as_deref()),
                ("fqdn fact", Some(facts.fqdn.as_str())),
            ],
        )
        .unwrap_or(facts.fqdn.as_str());
        Some(server.to_string())
    };

    Ok(ParameterSet {
        server_name,
        explicit_server,
        fqdn: facts.fqdn.clone(),
        use_srv_records: explicit.use_srv_records,
        srv_domain,
        listen: explicit.listen,
        listen_to: explicit.listen_to.clone(),
        allow_any_crl_auth: explicit.allow_any_crl_auth,
        auth_allowed: explicit.auth_allowed.clone(),
        additional_settings: explicit.additional_settings.clone(),
        dns_alt_names: explicit.dns_alt_names.clone(),
        syslogfacility: non_empty(explicit.syslogfacility.as_deref()),
        module_repository: non_empty(explicit.module_repository.as_deref()),
        show_diff: explicit.show_diff,
        platform: platform.clone(),
    })
}

fn resolve_srv_domain(
    explicit: &ExplicitParams,
    facts: &Facts,
    has_explicit_server: bool,
) -> Result<Option<String>, ResolveError> {
    let domain = first_present(
        field::SRV_DOMAIN,
        &[
            ("srv_domain parameter", explicit.srv_domain.as_deref()),
            ("domain fact", facts.domain.as_deref()),
        ],
    );

    match domain {
        Some(domain) => Ok(Some(domain.to_string())),
        None if has_explicit_server => Ok(None),
        None => Err(ResolveError::MissingRequiredDerivedValue {
            field: field::SRV_DOMAIN,
            reason: "domain fact is undefined and srv_domain is not set",
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
