//! Severity module - the closed severity scale for claims

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an insurance claim
///
/// The scale is closed: anything a model emits outside these four labels is
/// coerced to [`Severity::Medium`] by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    /// Cosmetic or minor damage
    Low,

    /// Moderate damage, the default when unknown
    #[default]
    Medium,

    /// Significant damage
    High,

    /// Total loss, injury, or otherwise severe
    Critical,
}

impl Severity {
    /// All severities, in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Get the severity label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Parse a severity label, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}
