//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::facter::FacterFacts;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["puppetconf"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// Helper to parse a facts file
fn facter(content: &str) -> FacterFacts {
    FacterFacts::parse(content).unwrap()
}

mod facts_tests;
mod loading_tests;
mod precedence_tests;
