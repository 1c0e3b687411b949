//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use roster_config::RosterConfig;

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "roster.toml",
            r#"
[database]
path = "/var/lib/roster/roster.db"
"#,
        )?;

        let config: RosterConfig = Figment::from(Serialized::defaults(RosterConfig::default()))
            .merge(Toml::file("roster.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/roster/roster.db");
        assert!(config.database.is_configured());
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "roster.toml",
            r#"
[database]
path = "./data/roster.db"

[general]
json = true
"#,
        )?;

        let config: RosterConfig = Figment::from(Serialized::defaults(RosterConfig::default()))
            .merge(Toml::file("roster.toml"))
            .extract()?;

        assert!(config.database.is_configured());
        assert!(config.general.json);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("ROSTER_DATABASE__PATH", "/from/env.db");

        jail.create_file(
            "roster.toml",
            r#"
[database]
path = "/from/toml.db"

[general]
json = true
"#,
        )?;

        let config: RosterConfig = Figment::from(Serialized::defaults(RosterConfig::default()))
            .merge(Toml::file("roster.toml"))
            .merge(Env::prefixed("ROSTER_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.database.path, "/from/env.db");
        // TOML value not overridden by env should remain
        assert!(config.general.json);
        Ok(())
    });
}

/// Documents the figment gotcha: typo'd env var keys are silently ignored.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("ROSTER_DATABASE__PATHH", "/typo/env.db");

        let config: RosterConfig = Figment::from(Serialized::defaults(RosterConfig::default()))
            .merge(Env::prefixed("ROSTER_").split("__"))
            .extract()?;

        assert!(
            config.database.path.is_empty(),
            "typo'd env var should be silently ignored by figment"
        );
        Ok(())
    });
}
