// core/src/config.rs
//
// Run configuration. Defaults reproduce the historical script: read
// gerryModel.json, write word_freq_map.json with 4-space indent. Id "0"
// is pinned to "you" by the lookup builder, not here.

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "gerryModel.json";
pub const DEFAULT_OUTPUT: &str = "word_freq_map.json";
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Model file holding `spool_map` and `freq_mat`
    pub input: PathBuf,
    /// Destination for the normalized word map
    pub output: PathBuf,
    /// Spaces per nesting level in the written JSON
    pub indent: usize,
    /// Extra ids whose word is fixed regardless of `spool_map`.
    /// Applied once, after inversion, in the listed order. An entry for
    /// id "0" is ignored.
    pub id_overrides: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            indent: DEFAULT_INDENT,
            id_overrides: IndexMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_script() {
        let cfg = Config::default();
        assert_eq!(cfg.input, PathBuf::from("gerryModel.json"));
        assert_eq!(cfg.output, PathBuf::from("word_freq_map.json"));
        assert_eq!(cfg.indent, 4);
        assert!(cfg.id_overrides.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("output = \"out/map.json\"\n").unwrap();
        assert_eq!(cfg.output, PathBuf::from("out/map.json"));
        assert_eq!(cfg.input, PathBuf::from(DEFAULT_INPUT));
        assert!(cfg.id_overrides.is_empty());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.indent = 2;
        cfg.id_overrides.insert("1".into(), "me".into());
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordfreq.toml");

        let mut cfg = Config::default();
        cfg.input = PathBuf::from("models/gerry.json");
        cfg.id_overrides.insert("7".into(), "gerry".into());
        cfg.save_toml(&path).unwrap();

        assert_eq!(Config::load_toml(&path).unwrap(), cfg);
        assert!(Config::load_toml(dir.path().join("absent.toml")).is_err());
    }
}
