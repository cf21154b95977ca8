use mgate_kernel::config::{ConfigError, load_config};
use mgate_kernel::domain::config::GatewayConfig;
use std::io::Write;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_gateway_config_from_toml() {
    let file = config_file(
        r#"
        [formats.serialization]
        "application/json" = "json"
        "application/hal+json" = "json"

        [engine]
        pretty = true
        xml_root = "payload"
        "#,
    );

    let cfg: GatewayConfig = load_config(Some(file.path())).unwrap();

    assert_eq!(cfg.formats.serialization.len(), 2);
    assert_eq!(cfg.formats.serialization.get("application/hal+json").map(String::as_str), Some("json"));
    assert!(!cfg.formats.serialization.contains_key("application/xml"));
    assert_eq!(cfg.formats.deserialization.len(), 2);
    assert!(cfg.engine.pretty);
    assert_eq!(cfg.engine.xml_root, "payload");
}

#[test]
fn partial_file_keeps_defaults() {
    let file = config_file("[engine]\npretty = true\n");

    let cfg: GatewayConfig = load_config(Some(file.path())).unwrap();

    assert!(cfg.engine.pretty);
    assert_eq!(cfg.engine.xml_root, "result");
    assert!(cfg.formats.serialization.contains_key("application/xml"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_config::<GatewayConfig>(Some(&missing)).unwrap_err();

    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().starts_with("Config error (Failed to build config)"));
}

#[test]
fn mistyped_values_fail_deserialization() {
    let file = config_file("[engine]\npretty = [1, 2]\n");

    let err = load_config::<GatewayConfig>(Some(file.path())).unwrap_err();

    assert!(err.to_string().starts_with("Config error (Failed to deserialize config)"));
}
