//! Result types for a normalization run

use crate::fallback::FallbackReason;
use chrono::{DateTime, Utc};
use claimnorm_domain::ClaimRecord;
use uuid::Uuid;

/// Detailed result of normalizing one claim
#[derive(Debug, Clone)]
pub struct Normalization {
    /// The structured record, parsed or fallback
    pub record: ClaimRecord,

    /// How the record was produced
    pub outcome: Outcome,

    /// Metadata about the run
    pub metadata: NormalizationMetadata,
}

/// How a record was produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The model output parsed and was coerced into the record
    Parsed,

    /// Inference or parsing failed; the record is a fallback
    Fallback(FallbackReason),
}

impl Outcome {
    /// Whether the record is a fallback
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// Metadata about a normalization run
#[derive(Debug, Clone)]
pub struct NormalizationMetadata {
    /// Identifier of this run, for correlating log lines
    pub request_id: Uuid,

    /// When the run started
    pub timestamp: DateTime<Utc>,

    /// Name of the model that served the completion
    pub model_name: String,

    /// Version of the prompt template used
    pub template_version: &'static str,

    /// Prompt length in characters
    pub prompt_chars: usize,

    /// Completion length in characters, zero if inference failed
    pub completion_chars: usize,

    /// Wall-clock time of the run in milliseconds
    pub processing_time_ms: u64,
}
