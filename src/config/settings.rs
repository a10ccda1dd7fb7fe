//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::RetryPolicy;
use crate::pipeline::Attribution;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Completion provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Action-item extraction settings
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Where artifacts are written
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (groq, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API endpoint override (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// HTTP timeout for a single completion request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for transient provider failures
    #[serde(default)]
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// How Assignee:/Deadline: markers are tied to Task: lines
    #[serde(default)]
    pub attribution: Attribution,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Default directory for meeting_summary.txt and action_items.txt
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "groq".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load settings from a specific file, falling back to defaults when it is absent
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            let provider_var = match self.llm.provider.to_lowercase().as_str() {
                "gemini" => "GEMINI_API_KEY",
                _ => "GROQ_API_KEY",
            };
            for var in ["RECAP_API_KEY", provider_var] {
                if let Some(key) = non_empty_env(var) {
                    self.llm.api_key = key;
                    break;
                }
            }
        }

        if let Some(model) = non_empty_env("RECAP_MODEL") {
            self.llm.model = model;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "recap", "recap").context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_groq_with_provider_model() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "groq");
        assert!(settings.llm.model.is_empty());
        assert_eq!(settings.extraction.attribution, Attribution::FirstMarker);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[llm]
provider = "gemini"
api_key = "abc"

[llm.retry]
max_retries = 1

[extraction]
attribution = "nearest"
"#,
        )
        .unwrap();

        assert_eq!(settings.llm.provider, "gemini");
        assert_eq!(settings.llm.api_key, "abc");
        assert!(settings.llm.model.is_empty());
        assert_eq!(settings.llm.timeout_secs, 60);
        assert_eq!(settings.llm.retry.max_retries, 1);
        assert_eq!(settings.llm.retry.base_delay_ms, 500);
        assert_eq!(settings.extraction.attribution, Attribution::Nearest);
        assert_eq!(settings.output.dir, PathBuf::from("."));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Settings::write_default(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[llm]"));
        assert!(content.contains("[extraction]"));

        let loaded: Settings = toml::from_str(&content).unwrap();
        assert_eq!(loaded.llm.provider, "groq");
        assert_eq!(loaded.llm.retry.max_retries, 3);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.llm.timeout_secs, 60);
    }

    #[test]
    fn invalid_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm\nprovider = ").unwrap();

        let err = Settings::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }
}
