//! Integration tests for configuration loader
//!
//! Loads config files from disk and builds a working client from them.

use std::io::Write;
use std::path::PathBuf;

use botpub_domain::{BotPubError, CacheConfig, LogFormat};
use botpub_infra::{config, ApiClient, Credentials};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_load_config_from_json_file() {
    let (_temp, path) = write_config(
        r#"{
            "api": {
                "base_url": "https://bots.example.com/api",
                "timeout_secs": 15,
                "max_attempts": 4,
                "backoff_ms": 100
            },
            "cache": { "enabled": true, "ttl_secs": 30, "max_capacity": 50 },
            "logging": { "level": "warn", "format": "json" }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config from JSON file");
    std::fs::remove_file(path).ok();

    assert_eq!(config.api.base_url, "https://bots.example.com/api");
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.api.max_attempts, 4);
    assert_eq!(config.api.backoff_ms, 100);
    assert_eq!(config.cache.ttl_secs, 30);
    assert_eq!(config.cache.max_capacity, 50);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_config_from_toml_file() {
    let (_temp, path) = write_config(
        r#"
[api]
base_url = "https://bots.example.com"

[cache]
enabled = false
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config from TOML file");
    std::fs::remove_file(path).ok();

    assert_eq!(config.api.base_url, "https://bots.example.com");
    assert!(!config.cache.enabled);
    assert_eq!(config.cache.ttl_secs, CacheConfig::default().ttl_secs);
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(BotPubError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let (_temp, path) = write_config(r#"{ "this is": "not valid" "#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    match result {
        Err(BotPubError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_built_from_loaded_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_temp, path) =
        write_config(&format!("[api]\nbase_url = \"{}/\"\nmax_attempts = 1\n", server.uri()), "toml");
    let config = config::load_from_file(Some(path.clone())).expect("config from TOML file");
    std::fs::remove_file(path).ok();

    let client = ApiClient::from_config(&config, Credentials::default()).expect("api client");

    assert_eq!(client.base_url(), server.uri());
    assert!(client.health_check().await.unwrap());
}
