//! Configuration management for the CLI.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use claimnorm_normalizer::NormalizerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Inference backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Pipeline settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Inference backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Ollama server
    Ollama,
    /// llama.cpp server
    LlamaCpp,
}

/// Inference backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Which server to talk to
    #[serde(default = "default_kind")]
    pub kind: BackendKind,

    /// Endpoint URL; the backend's usual local address when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name (Ollama) or label (llama.cpp)
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty JSON
    Json,
    /// Table format
    Table,
    /// Labelled summary lines
    Summary,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".claimnorm").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.normalizer.validate().map_err(CliError::Config)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(backend) = cli.backend {
            self.backend.kind = backend.into();
        }
        if let Some(endpoint) = &cli.endpoint {
            self.backend.endpoint = Some(endpoint.clone());
        }
        if let Some(model) = &cli.model {
            self.backend.model = model.clone();
        }
        if let Some(format) = cli.format {
            self.settings.format = format.into();
        }
        if cli.no_color {
            self.settings.color = false;
        }
    }
}

impl BackendConfig {
    /// Endpoint to use, falling back to the backend's default address.
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.kind) {
            (Some(endpoint), _) => endpoint,
            (None, BackendKind::Ollama) => claimnorm_llm::ollama::DEFAULT_ENDPOINT,
            (None, BackendKind::LlamaCpp) => claimnorm_llm::llamacpp::DEFAULT_ENDPOINT,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            endpoint: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Summary,
        }
    }
}

fn default_kind() -> BackendKind {
    BackendKind::Ollama
}

fn default_model() -> String {
    "mistral".to_string()
}

fn default_timeout_secs() -> u64 {
    claimnorm_llm::ollama::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    claimnorm_llm::ollama::DEFAULT_MAX_RETRIES
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Summary
}
