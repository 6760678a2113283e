//! Error types for parameter resolution.

use thiserror::Error;

/// Error type for parameter resolution.
///
/// Fatal to the compilation request: no settings or rules are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A value that must be derived from parameters or facts has no source.
    #[error("Missing required derived value '{field}': {reason}")]
    MissingRequiredDerivedValue {
        /// Name of the unresolved field
        field: &'static str,
        /// Which sources were consulted and found empty
        reason: &'static str,
    },
}

impl ResolveError {
    /// Returns the name of the field that could not be resolved.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredDerivedValue { field, .. } => field,
        }
    }
}
