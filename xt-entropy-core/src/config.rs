//! Configuration management for `xt-entropy-core`.
//!
//! Holds the few knobs the engine exposes and loads them from YAML.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name used as the prefix of every host message.
pub const XT_NAME: &str = "XT_ENTROPY";

/// Oldest X-Ways Forensics release the engine runs under (v19.9).
pub const DEFAULT_MIN_HOST_VERSION: u32 = 1990;

/// Label shown while the entropy pass runs.
pub const DEFAULT_PROGRESS_LABEL: &str = "Calculating Shannon Entropy...";

/// Engine settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum host version accepted at init (e.g. 1990 for v19.9).
    pub min_host_version: u32,
    /// Text of the progress window opened during Finalize.
    pub progress_label: String,
    /// Comment category the annotations are attached under.
    pub annotation_category: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_host_version: DEFAULT_MIN_HOST_VERSION,
            progress_label: DEFAULT_PROGRESS_LABEL.to_string(),
            annotation_category: 0x00,
        }
    }
}

impl EngineConfig {
    /// Loads engine settings from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading engine configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!("Loaded engine configuration: {:?}", config);
        Ok(config)
    }

    /// Parses and validates engine settings from a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_yml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.progress_label.trim().is_empty() {
            return Err(anyhow!("`progress_label` must not be empty"));
        }
        Ok(())
    }
}
