//! One-shot compilation of both artifacts.

use serde::Serialize;

use crate::acl::{AclRule, compile_acl};
use crate::facts::Facts;
use crate::platform::PlatformProfile;
use crate::resolve::{ExplicitParams, ResolveError, resolve};
use crate::settings::{Settings, compile_settings};

/// Output of a successful compilation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compilation {
    /// `[main]` settings for `puppet.conf`.
    pub settings: Settings,
    /// Rules for `auth.conf`.
    pub acl: Vec<AclRule>,
}

/// Resolves the inputs and compiles settings and ACL rules.
///
/// Either both artifacts are produced or neither is.
///
/// # Errors
///
/// Returns the resolver's error unchanged; see [`resolve`].
pub fn compile(
    explicit: &ExplicitParams,
    facts: &Facts,
    platform: &PlatformProfile,
) -> Result<Compilation, ResolveError> {
    let params = resolve(explicit, facts, platform)?;

    let compilation = Compilation {
        settings: compile_settings(&params),
        acl: compile_acl(&params),
    };

    tracing::debug!(
        settings = compilation.settings.len(),
        rules = compilation.acl.len(),
        "Compiled configuration"
    );

    Ok(compilation)
}
