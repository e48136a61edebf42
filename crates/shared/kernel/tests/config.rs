use folio_kernel::config::{ConfigError, load_config};
use folio_kernel::domain::config::FolioConfig;
use std::io::Write;

#[test]
fn loads_layered_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 8080

[fields]
enabled = false

[render]
empty_message = "Nothing yet."
"#
    )
    .unwrap();

    let config: FolioConfig = load_config(Some(file.path())).unwrap();

    assert_eq!(config.server.port, 8080);
    assert!(!config.fields.enabled);
    assert_eq!(config.render.empty_message, "Nothing yet.");
    assert_eq!(config.render.thumbnail_size, "medium");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<FolioConfig, _> = load_config(Some(dir.path().join("absent.toml")));

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn malformed_values_fail_to_deserialize() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[server]\nport = \"not a port\"").unwrap();

    let result: Result<FolioConfig, _> = load_config(Some(file.path()));
    assert!(result.is_err());
}
