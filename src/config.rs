use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Hermes configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HermesConfig {
    /// Forecast assembly settings.
    #[serde(default)]
    pub assemble: AssembleToml,

    /// Forcing relocation settings.
    #[serde(default)]
    pub relocate: RelocateToml,

    /// NA audit settings.
    #[serde(default)]
    pub nas: NasToml,
}

impl HermesConfig {
    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssembleToml {
    #[serde(default = "default_true")]
    pub forecast: bool,
    #[serde(default)]
    pub chunks: BTreeMap<String, usize>,
}

impl Default for AssembleToml {
    fn default() -> Self {
        Self {
            forecast: true,
            chunks: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelocateToml {
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub days: Vec<PathBuf>,
    pub dest: Option<PathBuf>,
    pub range: Option<String>,
    #[serde(default)]
    pub copy: bool,
    #[serde(default = "default_forc_type")]
    pub forc_type: u8,
    #[serde(default = "default_overwrite")]
    pub overwrite: String,
}

impl Default for RelocateToml {
    fn default() -> Self {
        Self {
            source: None,
            days: Vec::new(),
            dest: None,
            range: None,
            copy: false,
            forc_type: default_forc_type(),
            overwrite: default_overwrite(),
        }
    }
}

fn default_forc_type() -> u8 {
    1
}
fn default_overwrite() -> String {
    "reject".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NasToml {
    #[serde(default = "default_nccmp")]
    pub program: PathBuf,
}

impl Default for NasToml {
    fn default() -> Self {
        Self {
            program: default_nccmp(),
        }
    }
}

fn default_nccmp() -> PathBuf {
    PathBuf::from("nccmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: HermesConfig = toml::from_str("").unwrap();
        assert!(cfg.assemble.forecast);
        assert!(cfg.assemble.chunks.is_empty());
        assert_eq!(cfg.relocate.forc_type, 1);
        assert_eq!(cfg.relocate.overwrite, "reject");
        assert_eq!(cfg.nas.program, PathBuf::from("nccmp"));
    }

    #[test]
    fn full_file() {
        let cfg: HermesConfig = toml::from_str(
            r#"
            [assemble]
            forecast = false
            chunks = { feature_id = 10000, time = 24 }

            [relocate]
            source = "/data/nomads"
            dest = "/runs/FORCING"
            range = "short_range_hawaii"
            copy = true
            forc_type = 2
            overwrite = "replace"

            [nas]
            program = "/opt/nccmp/bin/nccmp"
            "#,
        )
        .unwrap();
        assert!(!cfg.assemble.forecast);
        assert_eq!(cfg.assemble.chunks["feature_id"], 10000);
        assert_eq!(cfg.relocate.source, Some(PathBuf::from("/data/nomads")));
        assert_eq!(cfg.relocate.range.as_deref(), Some("short_range_hawaii"));
        assert!(cfg.relocate.copy);
        assert_eq!(cfg.relocate.forc_type, 2);
        assert_eq!(cfg.nas.program, PathBuf::from("/opt/nccmp/bin/nccmp"));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<HermesConfig>("[relocate]\nrnage = \"x\"").is_err());
        assert!(toml::from_str::<HermesConfig>("[plot]\n").is_err());
    }

    #[test]
    fn load_without_path() {
        let cfg = HermesConfig::load(None).unwrap();
        assert!(cfg.relocate.dest.is_none());
    }
}
