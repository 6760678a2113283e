//! Configuration layer for puppetconf.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Facts file parsing ([`FacterFacts`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file**
//! 3. **Facts file** (facts and OS family only)
//! 4. **Built-in defaults**
//!
//! This layer only decides which *explicit* parameters and facts exist.
//! How parameters and facts combine (for example explicit master over the
//! global puppetmaster fact) is decided by [`crate::resolve()`].
//!
//! For list parameters (`listen_to`, `auth_allowed`, `dns_alt_names`), CLI
//! values **replace** TOML values entirely (not merged).
//!
//! Additional settings are collected TOML first, then CLI; a later entry
//! with the same name wins.
//!
//! # Boolean Flag Semantics
//!
//! Boolean flags (`--listen`, `--use-srv-records`, `--allow-any-crl-auth`,
//! `--show-diff`) come in pairs with a `--no-` form. Either form on the CLI
//! wins over TOML; the last one given wins if both appear. Without either,
//! the TOML value (default `false`) is used.
//!
//! # Empty Values
//!
//! An empty string counts as absent in every chain: `--fqdn ""` falls
//! through to the TOML `[facts]` table and then to the facts file.

mod cli;
pub mod defaults;
mod error;
mod facter;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, OsFamilyArg, OutputFormat};
pub use error::{ConfigError, field};
pub use facter::FacterFacts;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
