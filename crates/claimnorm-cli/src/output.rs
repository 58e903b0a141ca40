//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use claimnorm_domain::{ClaimRecord, Severity};
use claimnorm_normalizer::{Normalization, Outcome};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest claim excerpt shown in the samples table
const EXCERPT_CHARS: usize = 40;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single record.
    pub fn format_record(&self, record: &ClaimRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.record_table(record)),
            OutputFormat::Summary => Ok(self.record_summary(record)),
        }
    }

    /// Format a record together with its outcome and run metadata.
    pub fn format_normalization(&self, result: &Normalization) -> Result<String> {
        let meta = &result.metadata;
        let outcome = match &result.outcome {
            Outcome::Parsed => "parsed".to_string(),
            Outcome::Fallback(reason) => format!("fallback ({})", reason),
        };

        if let OutputFormat::Json = self.format {
            let value = serde_json::json!({
                "record": result.record,
                "outcome": outcome,
                "metadata": {
                    "request_id": meta.request_id.to_string(),
                    "timestamp": meta.timestamp.to_rfc3339(),
                    "model_name": meta.model_name,
                    "template_version": meta.template_version,
                    "prompt_chars": meta.prompt_chars,
                    "completion_chars": meta.completion_chars,
                    "processing_time_ms": meta.processing_time_ms,
                }
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut out = self.format_record(&result.record)?;
        out.push_str("\n\n");
        let outcome = if result.outcome.is_fallback() {
            self.warning(&outcome)
        } else {
            self.success(&outcome)
        };
        out.push_str(&format!("Outcome:   {}\n", outcome));
        out.push_str(&format!("Request:   {}\n", meta.request_id));
        out.push_str(&format!(
            "Model:     {} (template {})\n",
            meta.model_name, meta.template_version
        ));
        out.push_str(&format!(
            "Sizes:     prompt {} chars, completion {} chars\n",
            meta.prompt_chars, meta.completion_chars
        ));
        out.push_str(&format!("Time:      {} ms", meta.processing_time_ms));
        Ok(out)
    }

    /// Format a batch of (claim text, record) pairs.
    pub fn format_batch(&self, results: &[(String, ClaimRecord)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(text, record)| serde_json::json!({ "claim": text, "record": record }))
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => Ok(self.batch_table(results)),
            OutputFormat::Summary => {
                let blocks: Vec<String> = results
                    .iter()
                    .map(|(text, record)| {
                        format!("{}\n{}", self.info(text), self.record_summary(record))
                    })
                    .collect();
                Ok(blocks.join("\n\n"))
            }
        }
    }

    /// Labelled summary lines for one record.
    fn record_summary(&self, record: &ClaimRecord) -> String {
        let lines = [
            format!("Loss Type:      {}", record.loss_type),
            format!("Severity:       {}", self.severity(record.severity)),
            format!("Asset:          {}", record.asset),
            format!("Estimated Loss: {}", format_loss(record.estimated_loss)),
            format!("Incident Date:  {}", format_date(record)),
            format!("Location:       {}", record.location),
            format!("Confidence:     {:.2}", record.confidence),
            String::new(),
            format!("Explanation:    {}", record.explanation),
        ];
        lines.join("\n")
    }

    /// Two-column field/value table for one record.
    fn record_table(&self, record: &ClaimRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Loss Type", record.loss_type.as_str()]);
        builder.push_record(["Severity", record.severity.as_str()]);
        builder.push_record(["Asset", record.asset.as_str()]);
        builder.push_record(["Estimated Loss", format_loss(record.estimated_loss).as_str()]);
        builder.push_record(["Incident Date", format_date(record).as_str()]);
        builder.push_record(["Location", record.location.as_str()]);
        builder.push_record(["Confidence", format!("{:.2}", record.confidence).as_str()]);
        builder.push_record(["Explanation", record.explanation.as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// One row per claim.
    fn batch_table(&self, results: &[(String, ClaimRecord)]) -> String {
        if results.is_empty() {
            return self.colorize("No claims.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Claim", "Loss Type", "Severity", "Asset", "Confidence"]);
        for (text, record) in results {
            builder.push_record([
                excerpt(text).as_str(),
                record.loss_type.as_str(),
                record.severity.as_str(),
                record.asset.as_str(),
                format!("{:.2}", record.confidence).as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn severity(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Low => "green",
            Severity::Medium => "yellow",
            Severity::High => "magenta",
            Severity::Critical => "red",
        };
        self.colorize(severity.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_loss(loss: Option<f64>) -> String {
    match loss {
        Some(amount) => format!("{:.2}", amount),
        None => "Unknown".to_string(),
    }
}

fn format_date(record: &ClaimRecord) -> String {
    record
        .incident_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS - 1).collect();
    format!("{}…", cut)
}
