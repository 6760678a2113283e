//! puppetconf: puppet.conf and auth.conf generation
//!
//! A small rule-resolution engine: explicit class parameters, node facts
//! and a platform profile are resolved into a [`ParameterSet`], from which
//! the `[main]` settings and the `auth.conf` rules are compiled.

pub mod acl;
pub mod compile;
pub mod config;
pub mod facts;
pub mod output;
pub mod platform;
pub mod resolve;
pub mod settings;

pub use acl::{AclRule, AuthMode, compile_acl};
pub use compile::{Compilation, compile};
pub use facts::Facts;
pub use platform::{OsFamily, PlatformProfile};
pub use resolve::{ExplicitParams, ParameterSet, ResolveError, resolve};
pub use settings::{Setting, SettingValue, Settings, compile_settings};
