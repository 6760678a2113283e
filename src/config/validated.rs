//! Validated configuration after merging CLI, TOML and facts sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::facts::Facts;
use crate::platform::{OsFamily, PlatformProfile};
use crate::resolve::ExplicitParams;
use crate::settings::SettingValue;

use super::cli::{Cli, OutputFormat};
use super::error::{ConfigError, field};
use super::facter::FacterFacts;
use super::toml::{PlatformSection, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args, an optional
/// TOML config and optional facter facts. The function validates all
/// inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Explicit class parameters
    pub params: ExplicitParams,

    /// Node facts
    pub facts: Facts,

    /// OS family the platform profile was built from
    pub os_family: OsFamily,

    /// Platform profile with overrides applied
    pub platform: PlatformProfile,

    /// Directory receiving puppet.conf and auth.conf
    pub output_dir: PathBuf,

    /// Print instead of writing
    pub dry_run: bool,

    /// Dry-run output format
    pub format: OutputFormat,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let server = self.params.puppetmaster.as_deref().unwrap_or("auto");

        write!(
            f,
            "Config {{ fqdn: {}, os_family: {}, server: {}, srv: {}, listen: {}, \
             additional_settings: {}, output_dir: {}, dry_run: {} }}",
            self.facts.fqdn,
            self.os_family,
            server,
            self.params.use_srv_records,
            self.params.listen,
            self.params.additional_settings.len(),
            self.output_dir.display(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments, optional TOML
    /// config and optional facts.
    ///
    /// CLI arguments take precedence over TOML, which takes precedence over
    /// facts and built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `fqdn` fact cannot be found in any source
    /// - `module_repository` is not a valid URL
    /// - An additional setting is malformed
    /// - The OS family is unknown
    pub fn from_raw(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        facter: Option<&FacterFacts>,
    ) -> Result<Self, ConfigError> {
        let params = Self::build_params(cli, toml)?;

        let facts = Self::resolve_facts(cli, toml, facter)?;

        let os_family = Self::resolve_os_family(cli, toml, facter)?;

        let platform = Self::build_platform(os_family, toml.map(|t| &t.platform));

        // Priority: CLI > TOML > platform confdir
        let output_dir = cli
            .output_dir
            .clone()
            .or_else(|| toml.and_then(|t| t.output.dir.clone()))
            .unwrap_or_else(|| PathBuf::from(&platform.confdir));

        Ok(Self {
            params,
            facts,
            os_family,
            platform,
            output_dir,
            dry_run: cli.dry_run,
            format: cli.format,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, config file and facts file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config or facts file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        let facter = if let Some(ref path) = cli.facts_file {
            Some(FacterFacts::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref(), facter.as_ref())
    }

    fn build_params(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ExplicitParams, ConfigError> {
        let puppet = toml.map(|t| &t.puppet);

        // Priority: CLI explicit > TOML > unset; empty values are skipped
        let puppetmaster = first_non_empty([
            cli.puppetmaster.as_deref(),
            puppet.and_then(|p| p.puppetmaster.as_deref()),
        ]);

        let srv_domain = first_non_empty([
            cli.srv_domain.as_deref(),
            puppet.and_then(|p| p.srv_domain.as_deref()),
        ]);

        let syslogfacility = first_non_empty([
            cli.syslogfacility.as_deref(),
            puppet.and_then(|p| p.syslogfacility.as_deref()),
        ]);

        let module_repository = first_non_empty([
            cli.module_repository.as_deref(),
            puppet.and_then(|p| p.module_repository.as_deref()),
        ]);

        if let Some(url) = module_repository {
            validate_url(url)?;
        }

        Ok(ExplicitParams {
            puppetmaster: puppetmaster.map(str::to_string),
            use_srv_records: switch(
                cli.use_srv_records,
                cli.no_use_srv_records,
                puppet.is_some_and(|p| p.use_srv_records),
            ),
            srv_domain: srv_domain.map(str::to_string),
            listen: switch(cli.listen, cli.no_listen, puppet.is_some_and(|p| p.listen)),
            listen_to: replace_list(&cli.listen_to, puppet.map(|p| &p.listen_to)),
            allow_any_crl_auth: switch(
                cli.allow_any_crl_auth,
                cli.no_allow_any_crl_auth,
                puppet.is_some_and(|p| p.allow_any_crl_auth),
            ),
            auth_allowed: replace_list(&cli.auth_allowed, puppet.map(|p| &p.auth_allowed)),
            additional_settings: Self::merge_additional_settings(cli, toml)?,
            dns_alt_names: replace_list(&cli.dns_alt_names, puppet.map(|p| &p.dns_alt_names)),
            syslogfacility: syslogfacility.map(str::to_string),
            module_repository: module_repository.map(str::to_string),
            show_diff: switch(
                cli.show_diff,
                cli.no_show_diff,
                puppet.is_some_and(|p| p.show_diff),
            ),
        })
    }

    fn merge_additional_settings(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<(String, SettingValue)>, ConfigError> {
        let mut settings = Vec::new();

        // TOML settings first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.additional_settings {
                settings.push((name.clone(), parse_toml_setting(name, value)?));
            }
        }

        // CLI settings (later entries win by name)
        for setting in &cli.settings {
            let (name, value) = parse_setting_string(setting)?;
            settings.push((name, SettingValue::Scalar(value)));
        }

        Ok(settings)
    }

    fn resolve_facts(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        facter: Option<&FacterFacts>,
    ) -> Result<Facts, ConfigError> {
        let section = toml.map(|t| &t.facts);

        // Priority: CLI > TOML [facts] > facts file; empty values are skipped
        let fqdn = first_non_empty([
            cli.fqdn.as_deref(),
            section.and_then(|s| s.fqdn.as_deref()),
            facter.and_then(FacterFacts::fqdn),
        ])
        .ok_or_else(|| {
            ConfigError::missing(
                field::FQDN,
                "Use --fqdn, set facts.fqdn in config file, or pass --facts",
            )
        })?;

        let domain = first_non_empty([
            cli.domain.as_deref(),
            section.and_then(|s| s.domain.as_deref()),
            facter.and_then(FacterFacts::domain),
        ]);

        let puppetmaster = first_non_empty([
            cli.global_puppetmaster.as_deref(),
            section.and_then(|s| s.puppetmaster.as_deref()),
            facter.and_then(FacterFacts::puppetmaster),
        ]);

        Ok(Facts {
            fqdn: fqdn.to_string(),
            domain: domain.map(str::to_string),
            puppetmaster: puppetmaster.map(str::to_string),
        })
    }

    fn resolve_os_family(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        facter: Option<&FacterFacts>,
    ) -> Result<OsFamily, ConfigError> {
        // CLI takes precedence
        if let Some(family) = cli.os_family {
            return Ok(family.into());
        }

        // Then TOML, then facts, then default
        first_non_empty([
            toml.and_then(|t| t.platform.os_family.as_deref()),
            facter.and_then(FacterFacts::os_family),
        ])
        .map_or(Ok(OsFamily::default()), parse_os_family)
    }

    fn build_platform(family: OsFamily, overrides: Option<&PlatformSection>) -> PlatformProfile {
        let mut platform = PlatformProfile::for_family(family);

        let Some(overrides) = overrides else {
            return platform;
        };

        let paths = [
            (&mut platform.codedir, &overrides.codedir),
            (&mut platform.confdir, &overrides.confdir),
            (&mut platform.logdir, &overrides.logdir),
            (&mut platform.rundir, &overrides.rundir),
            (&mut platform.ssldir, &overrides.ssldir),
            (&mut platform.vardir, &overrides.vardir),
            (&mut platform.sharedir, &overrides.sharedir),
        ];
        for (target, value) in paths {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        if overrides.dir_owner.is_some() {
            platform.dir_owner.clone_from(&overrides.dir_owner);
        }
        if overrides.dir_group.is_some() {
            platform.dir_group.clone_from(&overrides.dir_group);
        }

        platform
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Returns the first source holding a non-empty value.
fn first_non_empty<'a, const N: usize>(sources: [Option<&'a str>; N]) -> Option<&'a str> {
    sources.into_iter().flatten().find(|v| !v.is_empty())
}

/// `--flag` forces on, `--no-flag` forces off, otherwise TOML decides.
const fn switch(on: bool, off: bool, toml: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        toml
    }
}

/// CLI values replace TOML values entirely when any are given.
fn replace_list(cli: &[String], toml: Option<&Vec<String>>) -> Vec<String> {
    if cli.is_empty() {
        toml.cloned().unwrap_or_default()
    } else {
        cli.to_vec()
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn parse_os_family(s: &str) -> Result<OsFamily, ConfigError> {
    s.parse().map_err(|_| ConfigError::InvalidOsFamily {
        value: s.to_string(),
    })
}

fn parse_setting_string(s: &str) -> Result<(String, String), ConfigError> {
    let Some((name, value)) = s.split_once('=') else {
        return Err(ConfigError::InvalidSetting {
            value: s.to_string(),
            reason: "expected 'name=value'".to_string(),
        });
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidSetting {
            value: s.to_string(),
            reason: "setting name is empty".to_string(),
        });
    }

    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_toml_setting(name: &str, value: &::toml::Value) -> Result<SettingValue, ConfigError> {
    use ::toml::Value;

    let invalid = |reason: &str| ConfigError::InvalidSetting {
        value: name.to_string(),
        reason: reason.to_string(),
    };

    match value {
        Value::String(s) => Ok(SettingValue::Scalar(s.clone())),
        Value::Boolean(b) => Ok(SettingValue::Scalar(b.to_string())),
        Value::Integer(i) => Ok(SettingValue::Scalar(i.to_string())),
        Value::Float(f) => Ok(SettingValue::Scalar(f.to_string())),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid("list values must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SettingValue::List),
        Value::Datetime(_) | Value::Table(_) => {
            Err(invalid("expected a string, number, boolean, or list of strings"))
        }
    }
}
