//! Application configuration.
//!
//! Defines the YAML-serializable configuration that controls where reference
//! data comes from, whether responses are cached on disk, how monsters are
//! sampled, and which LLM model answers questions.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! reference:
//!   base_url: https://www.dnd5eapi.co/api/2014
//!   timeout_secs: 15
//! cache:
//!   enabled: true
//! sampling:
//!   stride: 10
//!   limit: 201
//! llm:
//!   model: gemini-1.5-flash
//!   endpoint: https://generativelanguage.googleapis.com/v1beta
//!   api_key_env: [GEMINI_API_KEY, GOOGLE_API_KEY]
//!   timeout_secs: 60
//!   max_listed_features: 5
//! ```
//!
//! Every section is optional; omitted sections and fields take the defaults
//! shown above. The LLM key itself is never stored in the file.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReferenceError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.dnd5eapi.co/api/2014";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Reference-data service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// API root; paths such as `races/elf` are appended to it.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

/// On-disk response cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Cache directory; defaults to `$XDG_CACHE_HOME/monster-fighter`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

/// Monster sampling for ability-score averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Take every `stride`-th monster.
    pub stride: usize,
    /// Only consider the first `limit` monsters of the index.
    pub limit: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            stride: 10,
            limit: 201,
        }
    }
}

/// LLM provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub endpoint: String,
    /// Environment variables checked, in order, for the API key.
    pub api_key_env: Vec<String>,
    pub timeout_secs: u64,
    /// Special abilities and actions listed per monster in chat prompts.
    pub max_listed_features: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            api_key_env: vec!["GEMINI_API_KEY".to_string(), "GOOGLE_API_KEY".to_string()],
            timeout_secs: 60,
            max_listed_features: 5,
        }
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use monster_fighter_reference::FighterConfig;
///
/// let config: FighterConfig = serde_yaml::from_str("sampling: { stride: 5 }").unwrap();
/// assert_eq!(config.sampling.stride, 5);
/// assert_eq!(config.sampling.limit, 201);
/// assert!(config.cache.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    pub reference: ReferenceConfig,
    pub cache: CacheConfig,
    pub sampling: SamplingConfig,
    pub llm: LlmConfig,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            reference: ReferenceConfig::default(),
            cache: CacheConfig::default(),
            sampling: SamplingConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl FighterConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ReferenceError::IoError) if the file cannot be
    /// read, [`YamlError`](ReferenceError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](ReferenceError::InvalidConfig) for out-of-range
    /// values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given and present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "Config file not found; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Rejects values that would make a command misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.reference.base_url.trim().is_empty() {
            return Err(ReferenceError::InvalidConfig(
                "reference.base_url cannot be empty".to_string(),
            ));
        }
        if self.sampling.stride == 0 {
            return Err(ReferenceError::InvalidConfig(
                "sampling.stride must be at least 1".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ReferenceError::InvalidConfig(
                "llm.model cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache directory after applying the default.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache
            .dir
            .clone()
            .unwrap_or_else(crate::cache::ResponseCache::default_dir)
    }

    /// Default config location (`$XDG_CONFIG_HOME/monster-fighter/config.yml`).
    pub fn default_path() -> Option<PathBuf> {
        let base = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
        };
        Some(base.join("monster-fighter").join("config.yml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
reference:
  base_url: http://localhost:3000/api/2014
  timeout_secs: 5
cache:
  enabled: false
  dir: /tmp/fighter-cache
sampling:
  stride: 20
  limit: 100
llm:
  model: gemini-2.0-flash
  endpoint: http://localhost:4000/v1beta
  api_key_env: [MY_KEY]
  timeout_secs: 30
  max_listed_features: 3
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: FighterConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.reference.base_url, "http://localhost:3000/api/2014");
        assert_eq!(config.reference.timeout_secs, 5);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/fighter-cache"));
        assert_eq!(config.sampling.stride, 20);
        assert_eq!(config.sampling.limit, 100);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.api_key_env, vec!["MY_KEY"]);
        assert_eq!(config.llm.max_listed_features, 3);
    }

    #[test]
    fn test_deserialize_empty_document_uses_defaults() {
        let config: FighterConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, FighterConfig::default());
        assert_eq!(config.reference.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
    }

    #[test]
    fn test_validate_rejects_zero_stride() {
        let config: FighterConfig = serde_yaml::from_str("sampling: { stride: 0 }").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ReferenceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_path_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yml");
        let config = FighterConfig::load_or_default(Some(&missing)).unwrap();
        assert_eq!(config, FighterConfig::default());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let original: FighterConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = FighterConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
