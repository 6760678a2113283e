//! Tests for fact source merging.

use super::*;

mod required_fqdn {
    use super::*;

    #[test]
    fn missing_fqdn_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "fqdn", .. })
        ));
    }

    #[test]
    fn empty_fqdn_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--fqdn", ""]), None, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "fqdn", .. })
        ));
    }

    #[test]
    fn fqdn_from_cli() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--fqdn", "agent01.example.org"]), None, None)
                .unwrap();

        assert_eq!(config.facts.fqdn, "agent01.example.org");
        assert_eq!(config.facts.domain, None);
        assert_eq!(config.facts.puppetmaster, None);
    }

    #[test]
    fn fqdn_from_toml() {
        let toml = toml(
            r#"
            [facts]
            fqdn = "toml.example.org"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml), None).unwrap();

        assert_eq!(config.facts.fqdn, "toml.example.org");
    }

    #[test]
    fn fqdn_from_structured_facts() {
        let facter = facter(r#"{"networking": {"fqdn": "facter.example.org"}}"#);

        let config = ValidatedConfig::from_raw(&cli(&[]), None, Some(&facter)).unwrap();

        assert_eq!(config.facts.fqdn, "facter.example.org");
    }
}

mod fact_precedence {
    use super::*;

    fn all_sources() -> (TomlConfig, FacterFacts) {
        let toml = toml(
            r#"
            [facts]
            fqdn = "toml.example.org"
            domain = "toml.org"
            puppetmaster = "toml-master.example.org"
        "#,
        );
        let facter = facter(
            r#"{
                "fqdn": "facter.example.org",
                "domain": "facter.org",
                "puppetmaster": "facter-master.example.org"
            }"#,
        );
        (toml, facter)
    }

    #[test]
    fn cli_wins_over_toml_and_facter() {
        let (toml, facter) = all_sources();
        let cli = cli(&[
            "--fqdn",
            "cli.example.org",
            "--domain",
            "cli.org",
            "--global-puppetmaster",
            "cli-master.example.org",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), Some(&facter)).unwrap();

        assert_eq!(config.facts.fqdn, "cli.example.org");
        assert_eq!(config.facts.domain.as_deref(), Some("cli.org"));
        assert_eq!(
            config.facts.puppetmaster.as_deref(),
            Some("cli-master.example.org")
        );
    }

    #[test]
    fn toml_wins_over_facter() {
        let (toml, facter) = all_sources();

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml), Some(&facter)).unwrap();

        assert_eq!(config.facts.fqdn, "toml.example.org");
        assert_eq!(config.facts.domain.as_deref(), Some("toml.org"));
        assert_eq!(
            config.facts.puppetmaster.as_deref(),
            Some("toml-master.example.org")
        );
    }

    #[test]
    fn facter_used_alone() {
        let (_, facter) = all_sources();

        let config = ValidatedConfig::from_raw(&cli(&[]), None, Some(&facter)).unwrap();

        assert_eq!(config.facts.fqdn, "facter.example.org");
        assert_eq!(config.facts.domain.as_deref(), Some("facter.org"));
        assert_eq!(
            config.facts.puppetmaster.as_deref(),
            Some("facter-master.example.org")
        );
    }
}
