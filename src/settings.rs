//! Settings compiler: the `[main]` section of `puppet.conf`.
//!
//! # Design
//!
//! Each group of settings is a pure block function
//! `&ParameterSet -> Vec<Setting>`. [`compile_settings`] runs the blocks in
//! declaration order and concatenates their output, then merges the
//! additional settings by name.

use std::fmt;

use serde::Serialize;

use crate::resolve::ParameterSet;

/// Private key directory, group-readable by the service.
pub const PRIVATEKEYDIR: &str = "$ssldir/private_keys { group = service }";

/// Host private key, mode 640.
pub const HOSTPRIVKEY: &str = "$privatekeydir/$certname.pem { mode = 640 }";

/// Plugin source used when the master is discovered through SRV records.
pub const PLUGINSOURCE: &str = "puppet:///plugins";

/// Plugin facts source used when the master is discovered through SRV records.
pub const PLUGINFACTSOURCE: &str = "puppet:///pluginfacts";

/// Value of a single setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// A single string value.
    Scalar(String),
    /// An ordered list, rendered comma-separated.
    List(Vec<String>),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.write_str(value),
            Self::List(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// A named entry in the `[main]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    /// Setting name.
    pub name: String,
    /// Setting value.
    pub value: SettingValue,
}

impl Setting {
    /// Creates a setting.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered settings with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings(Vec<Setting>);

impl Settings {
    /// Returns the value of the named setting.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.0.iter().find(|s| s.name == name).map(|s| &s.value)
    }

    /// Returns `true` if a setting with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the setting names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.name.as_str())
    }

    /// Iterates the settings in output order.
    pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
        self.0.iter()
    }

    /// Returns the number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets `name`, replacing an existing value in place or appending.
    fn upsert(&mut self, setting: Setting) {
        match self.0.iter_mut().find(|s| s.name == setting.name) {
            Some(existing) => {
                tracing::debug!(name = %setting.name, "Additional setting overrides built-in value");
                existing.value = setting.value;
            }
            None => self.0.push(setting),
        }
    }
}

impl<'a> IntoIterator for &'a Settings {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A block of settings, emitted as a unit.
type Block = fn(&ParameterSet) -> Vec<Setting>;

/// Built-in blocks, in output order.
const BLOCKS: &[Block] = &[
    platform_dirs,
    key_files,
    show_diff,
    server,
    srv_discovery,
    dns_alt_names,
    syslogfacility,
    module_repository,
];

/// Compiles the `[main]` settings for a resolved parameter set.
///
/// Never fails; all validation happens during resolution.
#[must_use]
pub fn compile_settings(params: &ParameterSet) -> Settings {
    let mut settings = Settings(BLOCKS.iter().flat_map(|block| block(params)).collect());

    for (name, value) in &params.additional_settings {
        settings.upsert(Setting::new(name.clone(), value.clone()));
    }

    settings
}

fn platform_dirs(params: &ParameterSet) -> Vec<Setting> {
    let platform = &params.platform;
    vec![
        Setting::new("vardir", platform.vardir.as_str()),
        Setting::new("logdir", platform.logdir.as_str()),
        Setting::new("rundir", platform.rundir.as_str()),
        Setting::new("ssldir", platform.ssldir.as_str()),
    ]
}

fn key_files(_: &ParameterSet) -> Vec<Setting> {
    vec![
        Setting::new("privatekeydir", PRIVATEKEYDIR),
        Setting::new("hostprivkey", HOSTPRIVKEY),
    ]
}

fn show_diff(params: &ParameterSet) -> Vec<Setting> {
    vec![Setting::new("show_diff", params.show_diff)]
}

fn server(params: &ParameterSet) -> Vec<Setting> {
    if params.use_srv_records {
        return Vec::new();
    }
    params
        .server_name()
        .map(|name| Setting::new("server", name))
        .into_iter()
        .collect()
}

fn srv_discovery(params: &ParameterSet) -> Vec<Setting> {
    if !params.use_srv_records {
        return Vec::new();
    }

    let mut block = vec![Setting::new("use_srv_records", true)];
    if let Some(ref domain) = params.srv_domain {
        block.push(Setting::new("srv_domain", domain.as_str()));
    }
    block.push(Setting::new("pluginsource", PLUGINSOURCE));
    block.push(Setting::new("pluginfactsource", PLUGINFACTSOURCE));
    block
}

fn dns_alt_names(params: &ParameterSet) -> Vec<Setting> {
    if params.dns_alt_names.is_empty() {
        return Vec::new();
    }
    vec![Setting::new("dns_alt_names", params.dns_alt_names.clone())]
}

fn syslogfacility(params: &ParameterSet) -> Vec<Setting> {
    params
        .syslogfacility
        .as_deref()
        .map(|facility| Setting::new("syslogfacility", facility))
        .into_iter()
        .collect()
}

fn module_repository(params: &ParameterSet) -> Vec<Setting> {
    params
        .module_repository
        .as_deref()
        .map(|url| Setting::new("module_repository", url))
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
