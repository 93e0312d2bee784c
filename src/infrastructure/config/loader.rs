use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunk_size: {0}. Must be at least 1")]
    InvalidChunkSize(usize),

    #[error("Invalid overlap: {overlap}. Must be less than chunk_size ({chunk_size})")]
    InvalidOverlap { chunk_size: usize, overlap: usize },

    #[error("Invalid embedding batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Invalid registry_capacity: {0}. Must be at least 1 (omit for no eviction)")]
    InvalidRegistryCapacity(u64),

    #[error("{0} model cannot be empty")]
    EmptyModel(&'static str),

    #[error("Cache directory cannot be empty")]
    EmptyCacheDirectory,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Console logging is disabled and no log_dir is set")]
    NoLogOutput,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .docqa/config.yaml (project config)
    /// 3. .docqa/local.yaml (project local overrides, optional)
    /// 4. Environment variables (DOCQA_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".docqa/config.yaml"))
            .merge(Yaml::file(".docqa/local.yaml"))
            .merge(Env::prefixed("DOCQA_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("DOCQA_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let chunking = &config.chunking;
        if chunking.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunking.chunk_size));
        }
        if chunking.overlap >= chunking.chunk_size {
            return Err(ConfigError::InvalidOverlap {
                chunk_size: chunking.chunk_size,
                overlap: chunking.overlap,
            });
        }

        if config.embedding.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.embedding.batch_size));
        }
        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }
        if config.embedding.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel("Embedding"));
        }
        if config.completion.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel("Completion"));
        }

        if config.cache.directory.trim().is_empty() {
            return Err(ConfigError::EmptyCacheDirectory);
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }
        if config.retrieval.registry_capacity == Some(0) {
            return Err(ConfigError::InvalidRegistryCapacity(0));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        if !config.logging.enable_console && config.logging.log_dir.is_none() {
            return Err(ConfigError::NoLogOutput);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.embedding.batch_size, 100);
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.cache.directory, "tmp/embeddings");
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.registry_capacity, None);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
embedding:
  model: text-embedding-3-large
  dimension: 3072
  batch_size: 50
chunking:
  chunk_size: 800
  overlap: 80
cache:
  directory: /var/cache/docqa
retrieval:
  top_k: 5
  registry_capacity: 16
logging:
  level: debug
  format: json
  enable_console: false
  log_dir: /var/log/docqa
  rotation: never
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.embedding.model, "text-embedding-3-large");
        assert_eq!(config.embedding.dimension, 3072);
        assert_eq!(config.embedding.batch_size, 50);
        assert_eq!(config.embedding.provider_url, "https://api.openai.com/v1");
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.overlap, 80);
        assert_eq!(config.cache.directory, "/var/cache/docqa");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.retrieval.registry_capacity, Some(16));
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.enable_console);
        assert_eq!(config.logging.rotation, "never");
        assert_eq!(config.completion.model, "gpt-4o-mini");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_overlap_not_less_than_chunk_size() {
        let mut config = Config::default();
        config.chunking.overlap = config.chunking.chunk_size;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidOverlap {
                chunk_size: 500,
                overlap: 500
            }
        ));
    }

    #[test]
    fn test_validate_zero_chunk_size() {
        let mut config = Config::default();
        config.chunking.chunk_size = 0;
        config.chunking.overlap = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidChunkSize(0)
        ));
    }

    #[test]
    fn test_validate_zero_batch_size() {
        let mut config = Config::default();
        config.embedding.batch_size = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidBatchSize(0)
        ));
    }

    #[test]
    fn test_validate_zero_dimension() {
        let mut config = Config::default();
        config.embedding.dimension = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidDimension(0)
        ));
    }

    #[test]
    fn test_validate_empty_models() {
        let mut config = Config::default();
        config.embedding.model = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyModel("Embedding")
        ));

        let mut config = Config::default();
        config.completion.model = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyModel("Completion")
        ));
    }

    #[test]
    fn test_validate_zero_top_k_and_capacity() {
        let mut config = Config::default();
        config.retrieval.top_k = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTopK(0)
        ));

        let mut config = Config::default();
        config.retrieval.registry_capacity = Some(0);
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidRegistryCapacity(0)
        ));
    }

    #[test]
    fn test_validate_empty_cache_directory() {
        let mut config = Config::default();
        config.cache.directory = String::new();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyCacheDirectory
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_log_rotation_and_outputs() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();
        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogRotation(rotation) => assert_eq!(rotation, "weekly"),
            other => panic!("Expected InvalidLogRotation error, got {other:?}"),
        }

        let mut config = Config::default();
        config.logging.enable_console = false;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::NoLogOutput
        ));

        config.logging.log_dir = Some("/var/log/docqa".to_string());
        config.logging.rotation = "hourly".to_string();
        ConfigLoader::validate(&config).expect("File-only logging should be valid");
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "chunking:\n  chunk_size: 300\n  overlap: 30\nretrieval:\n  top_k: 4\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("DOCQA_RETRIEVAL__TOP_K", Some("7")),
                ("DOCQA_EMBEDDING__MODEL", Some("text-embedding-3-large")),
            ],
            || {
                let config = ConfigLoader::load_from_file(&path).unwrap();
                assert_eq!(config.chunking.chunk_size, 300);
                assert_eq!(config.chunking.overlap, 30);
                assert_eq!(config.retrieval.top_k, 7);
                assert_eq!(config.embedding.model, "text-embedding-3-large");
            },
        );
    }

    #[test]
    fn test_load_from_file_rejects_invalid_chunking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "chunking:\n  chunk_size: 50\n  overlap: 60\n").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }
}
