//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// File name written by `puppetconf init`.
pub const CONFIG_FILE: &str = "puppetconf.toml";
