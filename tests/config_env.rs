//! Configuration sources: YAML files and `THREEPLAY_*` variables.
//!
//! Everything touching process environment lives in one test so nothing races.

use std::path::PathBuf;
use threeplay_rs::config::{ENV_API_KEY, ENV_API_SECRET, ENV_MAX_ATTEMPTS, ENV_STATIC_BASE_URL};
use threeplay_rs::{ApiGeneration, ClientBuilder, ClientConfig, Error};

fn yaml_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("client.yaml")
}

#[test]
fn test_yaml_file() {
    let config = ClientConfig::from_yaml_file(yaml_fixture()).unwrap();
    assert_eq!(config.api_key.as_deref(), Some("yaml-key"));
    assert_eq!(config.api_base_url.as_deref(), Some("http://127.0.0.1:4010"));
    assert_eq!(config.timeout_secs, Some(20));
    assert_eq!(config.max_attempts, Some(3));
}

#[test]
fn test_missing_yaml_file_is_io_error() {
    let err = ClientConfig::from_yaml_file("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_environment_fills_gaps() {
    std::env::set_var(ENV_API_KEY, "env-key");
    std::env::set_var(ENV_API_SECRET, "env-secret");
    std::env::set_var(ENV_STATIC_BASE_URL, "http://127.0.0.1:4011");
    std::env::set_var(ENV_MAX_ATTEMPTS, "2");

    let client = ClientBuilder::new().build_legacy().unwrap();
    assert_eq!(client.generation().api_key(), "env-key");
    assert!(client.generation().has_secret());
    assert_eq!(client.hosts().static_files.as_str(), "http://127.0.0.1:4011/");
    assert_eq!(client.hosts().api.host_str(), Some("api.3playmedia.com"));

    // explicit and file values win over the environment
    let config = ClientConfig::from_yaml_file(yaml_fixture()).unwrap();
    let client = ClientBuilder::from_config(config)
        .api_key("explicit-key")
        .build_v3()
        .unwrap();
    assert_eq!(client.generation().api_key(), "explicit-key");
    assert_eq!(client.hosts().api.as_str(), "http://127.0.0.1:4010/");
    assert_eq!(client.hosts().static_files.as_str(), "http://127.0.0.1:4011/");

    let err = ClientBuilder::new().without_env().build_v3().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    for name in [ENV_API_KEY, ENV_API_SECRET, ENV_STATIC_BASE_URL, ENV_MAX_ATTEMPTS] {
        std::env::remove_var(name);
    }
}
