//! Text rendering of compiled artifacts.

use std::fmt::Write as _;

use crate::acl::{AclRule, AuthMode};
use crate::compile::Compilation;
use crate::settings::Settings;

use super::OutputError;

const HEADER: &str = "# This file is managed by puppetconf. Local changes will be overwritten.\n";

/// Renders settings as an INI `[main]` section.
#[must_use]
pub fn render_puppet_conf(settings: &Settings) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\n[main]\n");
    for setting in settings {
        // Writing to a String cannot fail
        let _ = writeln!(out, "    {} = {}", setting.name, setting.value);
    }
    out
}

/// Renders rules in the line-oriented `auth.conf` format.
///
/// Each rule is one block: `path`, then `auth any` for permissive rules,
/// `method` and `allow` when present. Blocks are separated by a blank line.
#[must_use]
pub fn render_auth_conf(rules: &[AclRule]) -> String {
    let mut out = String::from(HEADER);
    for rule in rules {
        out.push('\n');
        render_rule(&mut out, rule);
    }
    out
}

fn render_rule(out: &mut String, rule: &AclRule) {
    let _ = writeln!(out, "path {}", rule.path);
    if rule.auth == AuthMode::Any {
        out.push_str("auth any\n");
    }
    if let Some(ref method) = rule.method {
        let _ = writeln!(out, "method {method}");
    }
    if !rule.allow.is_empty() {
        let _ = writeln!(out, "allow {}", rule.allow);
    }
}

/// Renders the whole compilation as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(compilation: &Compilation) -> Result<String, OutputError> {
    serde_json::to_string_pretty(compilation).map_err(OutputError::Serialize)
}
