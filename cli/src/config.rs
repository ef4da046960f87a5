//! Optional JSON config file: `{ "decoder": {...}, "log": {...} }`.

use anyhow::{Context, Result};
use revertscope_core::DecoderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::tracing_setup::LogConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revertscope_core::Strictness;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: CliConfig =
            serde_json::from_str(r#"{ "decoder": { "strictness": "lenient" } }"#).unwrap();
        assert_eq!(cfg.decoder.strictness, Strictness::Lenient);
        assert!(cfg.decoder.reference_table);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn no_path_is_default() {
        let cfg = CliConfig::load(None).unwrap();
        assert_eq!(cfg.decoder.strictness, Strictness::Strict);
    }
}
