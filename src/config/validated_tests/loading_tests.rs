//! Tests for configuration loading from files.

use std::io::Write;
use std::path::Path;

use tempfile::{NamedTempFile, tempdir};

use super::*;
use crate::config::write_default_config;

mod config_load {
    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [puppet]
            puppetmaster = "mymaster.example.com"

            [facts]
            fqdn = "agent01.example.org"
        "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = cli(&["--config", path]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(
            config.params.puppetmaster.as_deref(),
            Some("mymaster.example.com")
        );
        assert_eq!(config.facts.fqdn, "agent01.example.org");
    }

    #[test]
    fn load_with_facts_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"fqdn": "agent01.example.org", "domain": "example.org", "osfamily": "windows"}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = cli(&["--facts", path]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.facts.fqdn, "agent01.example.org");
        assert_eq!(config.facts.domain.as_deref(), Some("example.org"));
        assert_eq!(
            config.output_dir,
            Path::new("C:/ProgramData/PuppetLabs/puppet/etc")
        );
    }

    #[test]
    fn load_without_files() {
        let cli = cli(&["--fqdn", "agent01.example.org"]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.facts.fqdn, "agent01.example.org");
    }

    #[test]
    fn missing_config_file_returns_error() {
        let cli = cli(&["--config", "/nonexistent/puppetconf.toml"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn missing_facts_file_returns_error() {
        let cli = cli(&["--fqdn", "a.example.org", "--facts", "/nonexistent/facts.json"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[puppet\nlisten = ").unwrap();

        let path = file.path().to_str().unwrap();
        let result = ValidatedConfig::load(&cli(&["--config", path]));

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn invalid_facts_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fqdn: agent01").unwrap();

        let path = file.path().to_str().unwrap();
        let result = ValidatedConfig::load(&cli(&["--facts", path]));

        assert!(matches!(result, Err(ConfigError::FactsParse(_))));
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_template_that_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("puppetconf.toml");

        write_default_config(&path).unwrap();

        let toml = TomlConfig::load(&path).unwrap();
        assert!(toml.facts.fqdn.is_none());
    }

    #[test]
    fn unwritable_path_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("puppetconf.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn summarizes_config() {
        let cli = cli(&[
            "--fqdn",
            "agent01.example.org",
            "--puppetmaster",
            "master.example.com",
            "--output-dir",
            "/tmp/out",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None, None).unwrap();

        let text = config.to_string();

        assert!(text.contains("fqdn: agent01.example.org"), "{text}");
        assert!(text.contains("server: master.example.com"), "{text}");
        assert!(text.contains("os_family: linux"), "{text}");
        assert!(text.contains("output_dir: /tmp/out"), "{text}");
    }
}
