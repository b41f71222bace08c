use anyhow::Result;
use tempfile::NamedTempFile;
use std::io::Write;

use xt_entropy_core::config::{EngineConfig, DEFAULT_PROGRESS_LABEL};

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
min_host_version: 2000
progress_label: "Scoring items..."
annotation_category: 2
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = EngineConfig::load_from_file(file.path())?;
    assert_eq!(config.min_host_version, 2000);
    assert_eq!(config.progress_label, "Scoring items...");
    assert_eq!(config.annotation_category, 2);
    Ok(())
}

#[test]
fn test_load_from_file_fills_defaults() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"annotation_category: 1\n")?;

    let config = EngineConfig::load_from_file(file.path())?;
    assert_eq!(config.min_host_version, 1990);
    assert_eq!(config.progress_label, DEFAULT_PROGRESS_LABEL);
    Ok(())
}

#[test]
fn test_load_from_missing_file_names_path() {
    let err = EngineConfig::load_from_file("/nonexistent/xt-entropy.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/xt-entropy.yaml"));
}

#[test]
fn test_load_from_malformed_file_fails() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"annotation_category: [not, a, number]\n")?;

    let err = EngineConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}
