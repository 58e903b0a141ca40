//! Claim record module - the structured output of normalization

use crate::Severity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Structured representation of a normalized insurance claim
///
/// Every record produced by the pipeline is fully populated: absent or
/// invalid model output is replaced by explicit defaults, and serialization
/// always emits all eight keys (`null` for absent optionals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Type or cause of loss (e.g. "Fire", "Water Damage")
    pub loss_type: String,

    /// Severity on the closed four-value scale
    pub severity: Severity,

    /// Affected asset or property
    pub asset: String,

    /// Approximate monetary loss, non-negative when present
    pub estimated_loss: Option<f64>,

    /// Calendar date of the incident
    pub incident_date: Option<NaiveDate>,

    /// Location of the incident
    pub location: String,

    /// Model confidence in [0.0, 1.0]
    pub confidence: f64,

    /// Short natural-language explanation, may be empty
    pub explanation: String,
}

impl ClaimRecord {
    /// Check the field-level constraints of the record
    ///
    /// Records built by the validator or the fallback handler always pass;
    /// this exists for records constructed by hand or deserialized from
    /// elsewhere.
    pub fn check_invariants(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} out of range [0.0, 1.0]", self.confidence));
        }
        if let Some(loss) = self.estimated_loss {
            if !loss.is_finite() || loss < 0.0 {
                return Err(format!("estimated_loss {} is negative or not finite", loss));
            }
        }
        Ok(())
    }
}
