//! Configuration for the extraction CLI
//!
//! Loads configuration from config.yml file; environment variables take
//! precedence over file values.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::extraction::summarizer::DEFAULT_MAX_SENTENCES;
use crate::{Error, Result};

pub const CONFIG_FILE: &str = "config.yml";
pub const ENV_MAX_SENTENCES: &str = "KX_MAX_SENTENCES";
pub const ENV_ANNOTATIONS_DIR: &str = "KX_ANNOTATIONS_DIR";

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    pipeline: Option<PipelineConfig>,
    batch: Option<BatchConfig>,
}

#[derive(Debug, Deserialize)]
struct PipelineConfig {
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    max_summary_sentences: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchConfig {
    annotations_dir: Option<String>,
    recursive: Option<bool>,
}

/// Deserialize a value that can be either a string or a number
fn deserialize_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_yaml::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {:?}",
            other
        ))),
    }
}

/// Main configuration struct
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sentences kept by the summarizer
    pub max_summary_sentences: usize,
    /// Directory holding `<file stem>.json` annotations for batch runs
    pub annotations_dir: Option<PathBuf>,
    /// Descend into subdirectories in batch runs
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults
    pub fn new() -> Self {
        Self::from_candidates(&[
            PathBuf::from(CONFIG_FILE),
            Path::new("..").join(CONFIG_FILE),
        ])
    }

    /// First candidate file that loads; invalid files are reported and skipped.
    fn from_candidates(paths: &[PathBuf]) -> Self {
        for path in paths {
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(err) => warn!("Ignoring invalid config {}: {}", path.display(), err),
            }
        }
        Self::defaults().with_env_overrides()
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> Option<String> {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                return std::env::var(var_name)
                    .ok()
                    .or_else(|| std::env::var(env_key).ok());
            }
        }
        std::env::var(env_key).ok().or(value)
    }

    fn resolve_env_usize(value: Option<String>, env_key: &str) -> Result<Option<usize>> {
        match Self::resolve_env_string(value, env_key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|e| Error::Config(format!("{env_key}: '{raw}' is not a count ({e})"))),
        }
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_dotenv();

        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let yaml: YamlConfig = serde_yaml::from_str(content)?;

        let pipeline = yaml.pipeline.unwrap_or(PipelineConfig {
            max_summary_sentences: None,
        });
        let batch = yaml.batch.unwrap_or(BatchConfig {
            annotations_dir: None,
            recursive: None,
        });

        let max_summary_sentences =
            Self::resolve_env_usize(pipeline.max_summary_sentences, ENV_MAX_SENTENCES)?
                .unwrap_or(DEFAULT_MAX_SENTENCES);
        if max_summary_sentences == 0 {
            return Err(Error::Config(
                "max_summary_sentences must be at least 1".to_string(),
            ));
        }

        let annotations_dir = Self::resolve_env_string(batch.annotations_dir, ENV_ANNOTATIONS_DIR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            max_summary_sentences,
            annotations_dir,
            recursive: batch.recursive.unwrap_or(true),
        })
    }

    /// Defaults with env vars applied; invalid env values are ignored
    fn with_env_overrides(mut self) -> Self {
        if let Ok(Some(n)) = Self::resolve_env_usize(None, ENV_MAX_SENTENCES) {
            if n > 0 {
                self.max_summary_sentences = n;
            }
        }
        if let Some(dir) = Self::resolve_env_string(None, ENV_ANNOTATIONS_DIR) {
            if !dir.is_empty() {
                self.annotations_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    /// Create config with built-in defaults
    fn defaults() -> Self {
        Self {
            max_summary_sentences: DEFAULT_MAX_SENTENCES,
            annotations_dir: None,
            recursive: true,
        }
    }

    /// Annotation file expected for `document` inside the annotations directory
    pub fn annotation_path_for(&self, document: &Path) -> Option<PathBuf> {
        let dir = self.annotations_dir.as_ref()?;
        let stem = document.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".json");
        Some(dir.join(name))
    }
}
