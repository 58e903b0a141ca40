//! Configuration for the Normalizer

use claimnorm_domain::options::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use claimnorm_domain::CompletionOptions;
use serde::{Deserialize, Serialize};

/// Configuration for the Normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Maximum number of tokens the model may generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Sequences that end generation
    pub stop_sequences: Vec<String>,

    /// Include the worked examples in the prompt
    pub include_examples: bool,
}

impl NormalizerConfig {
    /// Completion options derived from this configuration
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stop_sequences: self.stop_sequences.clone(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} must be within [0.0, 2.0]", self.temperature));
        }
        if self.stop_sequences.iter().any(|s| s.is_empty()) {
            return Err("stop_sequences must not contain empty strings".to_string());
        }
        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            stop_sequences: vec!["</s>".to_string()],
            include_examples: true,
        }
    }
}

impl NormalizerConfig {
    /// Precise preset: greedy decoding, tight token budget
    pub fn precise() -> Self {
        Self {
            max_tokens: 200,
            temperature: 0.0,
            ..Self::default()
        }
    }

    /// Creative preset: more sampling freedom, larger budget
    pub fn creative() -> Self {
        Self {
            max_tokens: 384,
            temperature: 0.7,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NormalizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_tokens, 256);
        assert!(config.include_examples);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(NormalizerConfig::precise().validate().is_ok());
        assert!(NormalizerConfig::creative().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_tokens() {
        let config = NormalizerConfig {
            max_tokens: 0,
            ..NormalizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let config = NormalizerConfig {
            temperature: 3.5,
            ..NormalizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_stop_sequence_rejected() {
        let config = NormalizerConfig {
            stop_sequences: vec![String::new()],
            ..NormalizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_completion_options() {
        let options = NormalizerConfig::precise().completion_options();
        assert_eq!(options.max_tokens, 200);
        assert_eq!(options.temperature, 0.0);
        assert_eq!(options.stop_sequences, vec!["</s>".to_string()]);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NormalizerConfig::creative();
        let toml_str = config.to_toml().unwrap();
        let parsed = NormalizerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = NormalizerConfig::from_toml("max_tokens = 100").unwrap();
        assert_eq!(parsed.max_tokens, 100);
        assert_eq!(parsed.temperature, NormalizerConfig::default().temperature);
        assert!(parsed.include_examples);
    }
}
