//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for safe, sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use motif_config::{ConfigError, MotifConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_search_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[search]
endpoint = "https://api.motif.example/search"
top_k = 12
timeout_secs = 4
"#,
        )?;

        let config: MotifConfig = Figment::from(Serialized::defaults(MotifConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.search.endpoint, "https://api.motif.example/search");
        assert_eq!(config.search.top_k, 12);
        assert_eq!(config.search.timeout_secs, 4);
        Ok(())
    });
}

#[test]
fn loads_firebase_and_auth_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[firebase]
project_id = "motif-914e4"
api_key = "AIza-test"

[auth]
sign_in_url = "https://motif.example/cli-sign-in"
callback_timeout_secs = 30
"#,
        )?;

        let config: MotifConfig = Figment::from(Serialized::defaults(MotifConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.firebase.is_configured());
        assert_eq!(config.firebase.database, "(default)");
        assert!(config.auth.is_configured());
        assert_eq!(config.auth.callback_timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".motif")?;
        jail.create_file(
            ".motif/config.toml",
            r#"
[general]
toast_secs = 5
"#,
        )?;

        let config = MotifConfig::load().expect("config loads");
        assert_eq!(config.general.toast_secs, 5);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".motif")?;
        jail.create_file(
            ".motif/config.toml",
            r#"
[search]
endpoint = "http://from-toml.local/search"
"#,
        )?;
        jail.set_env("MOTIF_SEARCH__ENDPOINT", "http://from-env.local/search");

        let config = MotifConfig::load().expect("config loads");
        assert_eq!(config.search.endpoint, "http://from-env.local/search");
        Ok(())
    });
}

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("MOTIF_SEARCH__TOP_K", "5");
        jail.set_env("MOTIF_FIREBASE__PROJECT_ID", "env-project");

        let config: MotifConfig = Figment::from(Serialized::defaults(MotifConfig::default()))
            .merge(Env::prefixed("MOTIF_").split("__"))
            .extract()?;

        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.firebase.project_id, "env-project");
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("MOTIF_SEARCH__ENDPONT", "http://typo.local");

        let config = MotifConfig::load().expect("config loads");
        assert_eq!(config.search.endpoint, "http://localhost:8000/api/search");
        Ok(())
    });
}

#[test]
fn invalid_search_endpoint_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("MOTIF_SEARCH__ENDPOINT", "not-a-url");

        let result = MotifConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn wrongly_typed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("MOTIF_SEARCH__TOP_K", "many");

        let result = MotifConfig::load();
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
