//! Loading configuration from files on disk.

use quarry_config::{ConfigError, ConfigLoader, LogFormat};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn toml_file_is_merged_over_defaults() {
    let file = file_with(
        ".toml",
        r#"
            [service]
            name = "orders"

            [logging]
            format = "pretty"
        "#,
    );

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(config.service.name, "orders");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.params.max_pairs, 256);
}

#[test]
fn json_file_then_toml_file() {
    let base = file_with(".json", r#"{"params": {"max_pairs": 10, "max_query_length": 100}}"#);
    let local = file_with(".toml", "[params]\nmax_pairs = 20\n");

    let loader = ConfigLoader::new()
        .with_file(base.path())
        .unwrap()
        .with_optional_file(local.path())
        .unwrap();

    assert_eq!(loader.layers().len(), 2);

    let config = loader.load().unwrap();
    assert_eq!(config.params.max_pairs, 20);
    assert_eq!(config.params.max_query_length, 100);
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = file_with(".yaml", "service:\n  name: orders\n");

    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn unknown_field_names_the_file() {
    let file = file_with(".toml", "[service]\nowner = \"team\"\n");

    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLayer { .. }));
    assert!(err
        .to_string()
        .contains(&file.path().display().to_string()));
}

#[test]
fn missing_dotenv_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new().with_dotenv_file(dir.path().join("absent.env"));
    assert!(matches!(result, Err(ConfigError::Dotenv(_))));
}
