//! Degraded records for failed inference or unparsable output

use crate::error::ParseError;
use claimnorm_domain::{ClaimRecord, Severity};
use std::fmt;

/// Loss type reported by every fallback record
pub const FALLBACK_LOSS_TYPE: &str = "Unknown";

/// Why the pipeline fell back instead of returning a parsed record
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The inference client failed (unavailable, timeout, ...)
    Inference(String),

    /// The model answered but no valid JSON object could be extracted
    Unparsable(ParseError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Inference(msg) => write!(f, "inference engine failed: {}", msg),
            FallbackReason::Unparsable(err) => {
                write!(f, "model output could not be parsed: {}", err)
            }
        }
    }
}

/// Build the fallback record for `reason`
pub fn fallback_record(reason: &FallbackReason) -> ClaimRecord {
    ClaimRecord {
        loss_type: FALLBACK_LOSS_TYPE.to_string(),
        severity: Severity::Medium,
        asset: String::new(),
        estimated_loss: None,
        incident_date: None,
        location: String::new(),
        confidence: 0.0,
        explanation: reason.to_string(),
    }
}
