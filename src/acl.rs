//! ACL compiler: the rules of `auth.conf`.
//!
//! Rules come from a fixed template of blocks. A block is either emitted in
//! full or left out; blocks are never merged or reordered.

use std::fmt;

use serde::Serialize;

use crate::resolve::ParameterSet;

/// CRL path opened to everyone by `allow_any_crl_auth`.
pub const CRL_ANY_PATH: &str = "/puppet-ca/v1/certificate_revocation_list/ca";

/// CRL path of the restrictive default rule.
pub const CRL_DEFAULT_PATH: &str = "/certificate_revocation_list/ca";

/// Versioned API prefix.
pub const API_PATH: &str = "/puppet/v3/";

/// Path matched by the explicit allow-list rule.
pub const ALLOW_PATH: &str = "/";

/// Run-request path used when listening.
pub const RUN_PATH: &str = "/run";

/// Authentication requirement of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Authenticated and unauthenticated requests (`auth any`).
    Any,
    /// The framework default; nothing is rendered.
    #[default]
    Default,
}

/// How an allow list is joined when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowJoin {
    /// `a, b`
    #[default]
    Spaced,
    /// `a,b`
    Compact,
}

impl AllowJoin {
    const fn separator(self) -> &'static str {
        match self {
            Self::Spaced => ", ",
            Self::Compact => ",",
        }
    }
}

/// Ordered identity patterns granted by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AllowList {
    /// Identity patterns, input order, duplicates kept.
    pub entries: Vec<String>,
    /// Join style for rendering.
    pub join: AllowJoin,
}

impl AllowList {
    /// Creates an allow list rendered as `a, b`.
    #[must_use]
    pub fn spaced(entries: Vec<String>) -> Self {
        Self {
            entries,
            join: AllowJoin::Spaced,
        }
    }

    /// Creates an allow list rendered as `a,b`.
    #[must_use]
    pub fn compact(entries: Vec<String>) -> Self {
        Self {
            entries,
            join: AllowJoin::Compact,
        }
    }

    /// Returns `true` if no identities are granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.join(self.join.separator()))
    }
}

/// A single access-control rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AclRule {
    /// Path pattern the rule applies to.
    pub path: String,
    /// Indirector method, if restricted.
    pub method: Option<String>,
    /// Authentication requirement.
    pub auth: AuthMode,
    /// Granted identities; empty means no `allow` line.
    pub allow: AllowList,
}

impl AclRule {
    /// Creates a rule for `path` with default auth and no allow list.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            auth: AuthMode::Default,
            allow: AllowList::default(),
        }
    }

    /// Restricts the rule to one method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the authentication requirement.
    #[must_use]
    pub const fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the allow list.
    #[must_use]
    pub fn allow(mut self, allow: AllowList) -> Self {
        self.allow = allow;
        self
    }
}

type Block = fn(&ParameterSet) -> Option<AclRule>;

/// Rule template, in output order.
const BLOCKS: &[Block] = &[crl, api, allow_list, run];

/// Compiles the `auth.conf` rules for a resolved parameter set.
#[must_use]
pub fn compile_acl(params: &ParameterSet) -> Vec<AclRule> {
    BLOCKS.iter().filter_map(|block| block(params)).collect()
}

fn crl(params: &ParameterSet) -> Option<AclRule> {
    if params.allow_any_crl_auth {
        Some(AclRule::new(CRL_ANY_PATH).auth(AuthMode::Any))
    } else {
        Some(AclRule::new(CRL_DEFAULT_PATH).method("find"))
    }
}

fn api(_: &ParameterSet) -> Option<AclRule> {
    Some(AclRule::new(API_PATH))
}

fn allow_list(params: &ParameterSet) -> Option<AclRule> {
    if params.auth_allowed.is_empty() {
        return None;
    }
    Some(AclRule::new(ALLOW_PATH).allow(AllowList::spaced(params.auth_allowed.clone())))
}

fn run(params: &ParameterSet) -> Option<AclRule> {
    if !params.listen {
        return None;
    }

    let targets = if params.listen_to.is_empty() {
        vec![
            params
                .explicit_server
                .clone()
                .unwrap_or_else(|| params.fqdn.clone()),
        ]
    } else {
        params.listen_to.clone()
    };

    Some(
        AclRule::new(RUN_PATH)
            .auth(AuthMode::Any)
            .method("save")
            .allow(AllowList::compact(targets)),
    )
}

#[cfg(test)]
#[path = "acl_tests.rs"]
mod tests;
