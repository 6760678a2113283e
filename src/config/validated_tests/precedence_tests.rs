//! Tests for CLI vs TOML precedence rules.

use crate::settings::SettingValue;

use super::*;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_puppetmaster_overrides_toml() {
        let cli = cli(&["--fqdn", "a.example.org", "--puppetmaster", "cli.example.com"]);
        let toml = toml(
            r#"
            [puppet]
            puppetmaster = "toml.example.com"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert_eq!(config.params.puppetmaster.as_deref(), Some("cli.example.com"));
    }

    #[test]
    fn cli_srv_domain_overrides_toml() {
        let cli = cli(&["--fqdn", "a.example.org", "--srv-domain", "cli.example.com"]);
        let toml = toml(
            r#"
            [puppet]
            srv_domain = "toml.example.com"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert_eq!(config.params.srv_domain.as_deref(), Some("cli.example.com"));
    }

    #[test]
    fn cli_listen_to_replaces_toml() {
        let cli = cli(&["--fqdn", "a.example.org", "--listen-to", "cli.example.com"]);
        let toml = toml(
            r#"
            [puppet]
            listen_to = ["node1.example.com", "node2.example.com"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert_eq!(config.params.listen_to, vec!["cli.example.com"]);
    }

    #[test]
    fn toml_lists_used_without_cli() {
        let cli = cli(&["--fqdn", "a.example.org"]);
        let toml = toml(
            r#"
            [puppet]
            auth_allowed = ["$1", "puppetproxy"]
            dns_alt_names = ["foo", "bar"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert_eq!(config.params.auth_allowed, vec!["$1", "puppetproxy"]);
        assert_eq!(config.params.dns_alt_names, vec!["foo", "bar"]);
    }

    #[test]
    fn cli_setting_follows_toml_setting() {
        let cli = cli(&["--fqdn", "a.example.org", "--setting", "environment=production"]);
        let toml = toml(
            r#"
            [additional_settings]
            environment = "staging"
            disable_warnings = "deprecations"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        let settings = &config.params.additional_settings;
        assert_eq!(settings.len(), 3);
        assert_eq!(settings[0].0, "environment");
        assert_eq!(settings[1].0, "disable_warnings");
        assert_eq!(
            settings[2],
            (
                "environment".to_string(),
                SettingValue::Scalar("production".to_string())
            )
        );
    }
}

mod boolean_flags {
    use super::*;

    #[test]
    fn toml_true_without_cli_flag() {
        let cli = cli(&["--fqdn", "a.example.org"]);
        let toml = toml(
            r"
            [puppet]
            listen = true
            use_srv_records = true
            allow_any_crl_auth = true
            show_diff = true
        ",
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert!(config.params.listen);
        assert!(config.params.use_srv_records);
        assert!(config.params.allow_any_crl_auth);
        assert!(config.params.show_diff);
    }

    #[test]
    fn cli_flag_enables_when_toml_false() {
        let cli = cli(&["--fqdn", "a.example.org", "--listen", "--show-diff"]);
        let toml = toml(
            r"
            [puppet]
            listen = false
        ",
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert!(config.params.listen);
        assert!(config.params.show_diff);
        assert!(!config.params.use_srv_records);
    }

    #[test]
    fn cli_no_flag_disables_toml_true() {
        let cli = cli(&[
            "--fqdn",
            "a.example.org",
            "--no-listen",
            "--no-use-srv-records",
            "--no-allow-any-crl-auth",
            "--no-show-diff",
        ]);
        let toml = toml(
            r"
            [puppet]
            listen = true
            use_srv_records = true
            allow_any_crl_auth = true
            show_diff = true
        ",
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert!(!config.params.listen);
        assert!(!config.params.use_srv_records);
        assert!(!config.params.allow_any_crl_auth);
        assert!(!config.params.show_diff);
    }

    #[test]
    fn last_of_flag_pair_wins() {
        let cli = cli(&["--fqdn", "a.example.org", "--no-listen", "--listen"]);
        let toml = toml(
            r"
            [puppet]
            show_diff = true
        ",
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert!(config.params.listen);
        assert!(config.params.show_diff);
    }
}

mod empty_values {
    use super::*;

    #[test]
    fn empty_cli_fqdn_falls_back_to_toml() {
        let toml = toml(
            r#"
            [facts]
            fqdn = "toml.example.org"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--fqdn", ""]), Some(&toml), None).unwrap();

        assert_eq!(config.facts.fqdn, "toml.example.org");
    }

    #[test]
    fn empty_cli_puppetmaster_falls_back_to_toml() {
        let cli = cli(&["--fqdn", "a.example.org", "--puppetmaster", ""]);
        let toml = toml(
            r#"
            [puppet]
            puppetmaster = "toml.example.org"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert_eq!(config.params.puppetmaster.as_deref(), Some("toml.example.org"));
    }

    #[test]
    fn empty_toml_puppetmaster_is_unset() {
        let toml = toml(
            r#"
            [puppet]
            puppetmaster = ""
            syslogfacility = ""
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--fqdn", "a.example.org"]), Some(&toml), None)
                .unwrap();

        assert_eq!(config.params.puppetmaster, None);
        assert_eq!(config.params.syslogfacility, None);
    }

    #[test]
    fn empty_cli_domain_falls_back_to_facts_file() {
        let cli = cli(&["--use-srv-records", "--domain", ""]);
        let facter = facter(r#"{"fqdn": "a.example.org", "domain": "example.org"}"#);

        let config = ValidatedConfig::from_raw(&cli, None, Some(&facter)).unwrap();
        let compilation =
            crate::compile::compile(&config.params, &config.facts, &config.platform).unwrap();

        assert_eq!(config.facts.domain.as_deref(), Some("example.org"));
        assert_eq!(
            compilation.settings.get("srv_domain"),
            Some(&SettingValue::Scalar("example.org".to_string()))
        );
    }

    #[test]
    fn empty_flat_fqdn_falls_back_to_structured_fact() {
        let facter = facter(r#"{"fqdn": "", "networking": {"fqdn": "s.example.org"}}"#);

        let config = ValidatedConfig::from_raw(&cli(&[]), None, Some(&facter)).unwrap();

        assert_eq!(config.facts.fqdn, "s.example.org");
    }

    #[test]
    fn all_sources_empty_is_missing() {
        let toml = toml(
            r#"
            [facts]
            fqdn = ""
        "#,
        );
        let facter = facter(r#"{"fqdn": ""}"#);

        let result = ValidatedConfig::from_raw(&cli(&["--fqdn", ""]), Some(&toml), Some(&facter));

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "fqdn", .. })
        ));
    }
}

mod output_dir {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_to_platform_confdir() {
        let config = ValidatedConfig::from_raw(&cli(&["--fqdn", "a.example.org"]), None, None)
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/etc/puppetlabs/puppet"));
    }

    #[test]
    fn follows_overridden_confdir() {
        let toml = toml(
            r#"
            [platform]
            confdir = "/srv/puppet/conf"
        "#,
        );
        let config =
            ValidatedConfig::from_raw(&cli(&["--fqdn", "a.example.org"]), Some(&toml), None)
                .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/srv/puppet/conf"));
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = toml(
            r#"
            [output]
            dir = "/toml/out"
        "#,
        );
        let config = ValidatedConfig::from_raw(
            &cli(&["--fqdn", "a.example.org", "--output-dir", "/cli/out"]),
            Some(&toml),
            None,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/cli/out"));
    }

    #[test]
    fn toml_overrides_confdir() {
        let toml = toml(
            r#"
            [output]
            dir = "/toml/out"
        "#,
        );
        let config =
            ValidatedConfig::from_raw(&cli(&["--fqdn", "a.example.org"]), Some(&toml), None)
                .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/toml/out"));
    }
}
