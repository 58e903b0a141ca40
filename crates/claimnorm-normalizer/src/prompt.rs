//! Prompt construction for claim normalization

use crate::error::NormalizerError;

/// Version of the instruction template, bumped whenever its text changes
pub const TEMPLATE_VERSION: &str = "claim-v2";

/// Builds the normalization prompt for one claim description
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    text: String,
    include_examples: bool,
}

impl PromptBuilder {
    /// Create a new prompt builder
    ///
    /// Fails with `InvalidInput` when the text is empty after trimming.
    pub fn new(text: &str) -> Result<Self, NormalizerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NormalizerError::InvalidInput(
                "claim text is empty".to_string(),
            ));
        }
        Ok(Self {
            text: text.to_string(),
            include_examples: true,
        })
    }

    /// Include or omit the worked examples
    pub fn with_examples(mut self, include: bool) -> Self {
        self.include_examples = include;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role and field list
        prompt.push_str(INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Worked examples
        if self.include_examples {
            prompt.push_str(EXAMPLES);
            prompt.push_str("\n\n");
        }

        // 3. The claim to analyze
        prompt.push_str("Now analyze the following claim.\n\n");
        prompt.push_str("Claim description:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const INSTRUCTIONS: &str = r#"You are an expert insurance claim analyst.

Given a free-text insurance claim description, extract the following fields
and return them as a single JSON object:

- "loss_type" (string): short type or cause of loss, e.g. "Vehicle", "Fire", "Water Damage", "Theft", "Device", "Injury"
- "severity" (string): exactly one of "Low", "Medium", "High", "Critical"
- "asset" (string): the affected asset or property, e.g. "Car", "Building", "Laptop"
- "estimated_loss" (number or null): approximate monetary loss as a plain number without currency symbols, null if not mentioned
- "incident_date" (string or null): calendar date of the incident as "YYYY-MM-DD", null if no exact date is given
- "location" (string): city, area, or building; empty string if not mentioned
- "confidence" (number): your confidence in this extraction, between 0.0 and 1.0
- "explanation" (string): ONE short sentence explaining your reasoning

Rules:
- Output MUST be valid JSON with exactly these eight keys.
- Do not include any text before or after the JSON.
- Do not use comments or trailing commas.
- Do not guess values that are not stated; use null or an empty string."#;

const EXAMPLES: &str = r#"Example 1:
Claim description:
---
Minor rear-end collision on the highway, bumper scratched. No injuries.
---

JSON:
{"loss_type": "Vehicle", "severity": "Low", "asset": "Car", "estimated_loss": null, "incident_date": null, "location": "Highway", "confidence": 0.9, "explanation": "Low severity vehicle claim affecting a car bumper with no injuries."}

Example 2:
Claim description:
---
Fire broke out in the kitchen on 2024-03-14 in our Mumbai apartment, burning cabinets and ceiling. Repairs quoted at 250000.
---

JSON:
{"loss_type": "Fire", "severity": "High", "asset": "Kitchen (apartment)", "estimated_loss": 250000, "incident_date": "2024-03-14", "location": "Mumbai apartment", "confidence": 0.85, "explanation": "Kitchen fire in a residential apartment with significant damage to cabinets and ceiling."}"#;

const OUTPUT_FORMAT_REMINDER: &str = "Remember: return ONLY the JSON object, no markdown code blocks, no explanations.\n\nJSON:\n";
