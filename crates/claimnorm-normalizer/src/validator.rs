//! Coerce an untyped JSON object into a `ClaimRecord`
//!
//! Coercion is total: every input value, including non-objects, yields a
//! fully populated record. Well-formed in-range values pass through
//! unchanged.

use chrono::NaiveDate;
use claimnorm_domain::{ClaimRecord, Severity};
use serde_json::{Map, Value};
use tracing::debug;

/// Coerce any JSON value into a claim record
///
/// A non-object value is treated as an empty object.
pub fn coerce_record(value: &Value) -> ClaimRecord {
    match value {
        Value::Object(map) => coerce_object(map),
        _ => coerce_object(&Map::new()),
    }
}

/// Coerce a JSON object into a claim record
pub fn coerce_object(map: &Map<String, Value>) -> ClaimRecord {
    ClaimRecord {
        loss_type: normalize_casing(&string_field(map.get("loss_type"))),
        severity: severity_field(map.get("severity")),
        asset: string_field(map.get("asset")),
        estimated_loss: loss_field(map.get("estimated_loss")),
        incident_date: date_field(map.get("incident_date")),
        location: string_field(map.get("location")),
        confidence: confidence_field(map.get("confidence")),
        explanation: string_field(map.get("explanation")),
    }
}

fn string_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn severity_field(value: Option<&Value>) -> Severity {
    let parsed = value.and_then(Value::as_str).and_then(Severity::parse);
    if parsed.is_none() {
        debug!(?value, "Unrecognized severity, using Medium");
    }
    parsed.unwrap_or_default()
}

fn confidence_field(value: Option<&Value>) -> f64 {
    match value.and_then(numeric) {
        Some(c) => c.clamp(0.0, 1.0),
        None => 0.0,
    }
}

fn loss_field(value: Option<&Value>) -> Option<f64> {
    let loss = match value? {
        Value::String(s) => parse_amount(s)?,
        other => numeric(other)?,
    };
    // abs() folds -0.0 into 0.0
    (loss >= 0.0).then_some(loss.abs())
}

fn date_field(value: Option<&Value>) -> Option<NaiveDate> {
    let s = value?.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    // ISO datetime: keep the date part
    match s.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// A finite number, either a JSON number or a numeric string
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parse an amount such as "5000", "$5,000.50" or "₹ 250000"
fn parse_amount(s: &str) -> Option<f64> {
    let trimmed = s
        .trim()
        .trim_start_matches(['$', '€', '£', '₹', '¥'])
        .trim();
    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    let n = digits.parse::<f64>().ok()?;
    n.is_finite().then_some(n)
}

/// Collapse whitespace and upper-case the first letter of each word
fn normalize_casing(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
