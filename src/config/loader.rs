//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::{default_data_dir, AppConfig};
use crate::domain::models::WhisperModel;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "NEURONBOX_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// `$NEURONBOX_CONFIG`, then `<data dir>/config.toml`, then defaults
pub fn load_default_config() -> Result<AppConfig, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        tracing::info!("Loading configuration from {} ({})", path.display(), CONFIG_ENV);
        return load_config(&path);
    }

    let default_path = default_data_dir().join("config.toml");
    if default_path.exists() {
        tracing::info!("Loading configuration from {}", default_path.display());
        return load_config(&default_path);
    }

    tracing::info!("No configuration file found, using defaults");
    Ok(AppConfig::default())
}

/// Semantic checks; returns every problem, not just the first.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.downloads.progress_interval_ms == 0 {
        errors.push("downloads.progress_interval_ms must be greater than 0".to_string());
    }
    if config.downloads.idle_timeout_secs == 0 {
        errors.push("downloads.idle_timeout_secs must be greater than 0".to_string());
    }
    if config.downloads.connect_timeout_secs == 0 {
        errors.push("downloads.connect_timeout_secs must be greater than 0".to_string());
    }
    for name in config.downloads.urls.keys() {
        if name.parse::<WhisperModel>().is_err() {
            errors.push(format!("downloads.urls: unknown model '{}'", name));
        }
    }
    if config.transcription.whisper_command.trim().is_empty() {
        errors.push("transcription.whisper_command must not be empty".to_string());
    }
    if config.data_dir.as_os_str().is_empty() {
        errors.push("data_dir must not be empty".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind.port(), 52014);
        assert_eq!(config.downloads.progress_interval_ms, 1000);
        assert_eq!(config.transcription.whisper_command, "whisper");
    }

    #[test]
    fn test_partial_file() {
        let config = parse_config(
            r#"
            bind = "127.0.0.1:8080"
            data_dir = "/var/lib/neuronbox"

            [downloads]
            verify_checksums = false

            [downloads.urls]
            small = "http://mirror.local/small.pt"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.models_dir(), PathBuf::from("/var/lib/neuronbox/models"));
        assert!(!config.downloads.verify_checksums);
        assert_eq!(config.downloads.idle_timeout_secs, 30);
        assert_eq!(config.downloads.url_for(WhisperModel::Small), "http://mirror.local/small.pt");
        assert_eq!(
            config.downloads.url_for(WhisperModel::Medium),
            WhisperModel::Medium.download_url()
        );
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let err = parse_config(
            r#"
            [downloads]
            progress_interval_ms = 0

            [downloads.urls]
            tiny = "http://mirror.local/tiny.pt"

            [transcription]
            whisper_command = " "
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[1].contains("unknown model 'tiny'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_config("bind = 12"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
