//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use cro_config::{ConfigError, CroConfig};
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

fn chain() -> Figment {
    Figment::from(Serialized::defaults(CroConfig::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("CRO_").split("__"))
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
base_url = "https://api.example.com"
timeout_secs = 12
user_agent = "cro-test"

[store]
max_reports = 8
path = "./history.json"

[simulation]
delay_ms = 250
failure_probability = 0.0
confidence_min = 0.5
confidence_max = 0.6
"#,
        )?;

        let config = CroConfig::from_figment(chain()).expect("config loads");

        assert!(config.remote.is_configured());
        assert_eq!(config.remote.base_url, "https://api.example.com");
        assert_eq!(config.remote.timeout_secs, 12);
        assert_eq!(config.remote.user_agent, "cro-test");
        assert_eq!(config.store.max_reports, 8);
        assert_eq!(config.store.path, "./history.json");
        assert_eq!(config.simulation.delay_ms, 250);
        assert!(config.simulation.failure_probability.abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[store]
max_reports = 3
",
        )?;

        let config = CroConfig::from_figment(chain()).expect("config loads");
        assert_eq!(config.store.max_reports, 3);
        assert!(!config.remote.is_configured());
        assert_eq!(config.simulation.delay_ms, 3000);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
base_url = "https://from-toml.example.com"
"#,
        )?;
        jail.set_env("CRO_REMOTE__BASE_URL", "https://from-env.example.com");

        let config = CroConfig::from_figment(chain()).expect("config loads");
        assert_eq!(config.remote.base_url, "https://from-env.example.com");
        Ok(())
    });
}

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("CRO_STORE__MAX_REPORTS", "10");
        jail.set_env("CRO_SIMULATION__DELAY_MS", "0");

        let config = CroConfig::from_figment(chain()).expect("config loads");
        assert_eq!(config.store.max_reports, 10);
        assert_eq!(config.simulation.delay_ms, 0);
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("CRO_STOER__MAX_REPORTS", "99");

        let config = CroConfig::from_figment(chain()).expect("config loads");
        assert_eq!(config.store.max_reports, 5);
        Ok(())
    });
}

#[test]
fn out_of_range_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[simulation]
failure_probability = 1.5
",
        )?;

        let err = CroConfig::from_figment(chain()).unwrap_err();
        let ConfigError::InvalidValue { field, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(field, "simulation.failure_probability");
        Ok(())
    });
}

#[test]
fn malformed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("CRO_STORE__MAX_REPORTS", "lots");

        let err = CroConfig::from_figment(chain()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
