//! Options passed to the text-generation engine with each completion

use serde::{Deserialize, Serialize};

/// Default token budget for a single completion
pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Default sampling temperature; low so extraction stays close to greedy
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Sampling and stopping options for one completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Sequences that end generation when emitted
    pub stop_sequences: Vec<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            stop_sequences: vec!["</s>".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompletionOptions::default();
        assert_eq!(options.max_tokens, 256);
        assert_eq!(options.temperature, 0.1);
        assert_eq!(options.stop_sequences, vec!["</s>".to_string()]);
    }
}
