//! Error types for the Normalizer

use thiserror::Error;

/// Errors surfaced to callers of the normalizer
///
/// Engine and parsing failures never appear here: they degrade into a
/// fallback record instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizerError {
    /// Claim text is empty or whitespace only
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure to pull a JSON object out of a completion
///
/// Every variant keeps the raw completion for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No `{` anywhere in the completion
    #[error("no JSON object found in model output")]
    NoJsonObject {
        /// Raw completion text
        raw: String,
    },

    /// An object was opened but never closed
    #[error("JSON object is not closed (output truncated?)")]
    Unbalanced {
        /// Raw completion text
        raw: String,
    },

    /// The extracted span is not a valid JSON object
    #[error("invalid JSON: {message}")]
    InvalidJson {
        /// Parser message
        message: String,
        /// Raw completion text
        raw: String,
    },
}

impl ParseError {
    /// The completion text that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            ParseError::NoJsonObject { raw }
            | ParseError::Unbalanced { raw }
            | ParseError::InvalidJson { raw, .. } => raw,
        }
    }
}
