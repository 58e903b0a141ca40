//! Core Normalizer implementation

use crate::config::NormalizerConfig;
use crate::error::NormalizerError;
use crate::fallback::{fallback_record, FallbackReason};
use crate::parser::parse_completion;
use crate::prompt::{PromptBuilder, TEMPLATE_VERSION};
use crate::types::{Normalization, NormalizationMetadata, Outcome};
use crate::validator::coerce_object;
use chrono::Utc;
use claimnorm_domain::{ClaimRecord, InferenceClient};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// The Normalizer turns free-text claim descriptions into claim records
///
/// It holds no mutable state: `normalize` takes `&self` and each call is
/// independent.
pub struct Normalizer<C>
where
    C: InferenceClient,
{
    client: C,
    config: NormalizerConfig,
}

impl<C> Normalizer<C>
where
    C: InferenceClient,
    C::Error: Display,
{
    /// Create a new Normalizer, validating the configuration
    pub fn new(client: C, config: NormalizerConfig) -> Result<Self, NormalizerError> {
        config.validate().map_err(NormalizerError::Config)?;
        Ok(Self { client, config })
    }

    /// Create a Normalizer with the default configuration
    pub fn with_defaults(client: C) -> Self {
        Self {
            client,
            config: NormalizerConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// The underlying inference client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Render the prompt that would be sent for `raw_text`
    pub fn build_prompt(&self, raw_text: &str) -> Result<String, NormalizerError> {
        Ok(PromptBuilder::new(raw_text)?
            .with_examples(self.config.include_examples)
            .build())
    }

    /// Normalize a claim description into a record
    ///
    /// Fails only when `raw_text` is empty or blank. Engine and parsing
    /// failures yield a fallback record.
    pub fn normalize(&self, raw_text: &str) -> Result<ClaimRecord, NormalizerError> {
        Ok(self.normalize_detailed(raw_text)?.record)
    }

    /// Normalize a claim and render the record as pretty JSON
    pub fn normalize_to_json(&self, raw_text: &str) -> Result<String, NormalizerError> {
        let record = self.normalize(raw_text)?;
        serde_json::to_string_pretty(&record)
            .map_err(|e| NormalizerError::Serialization(e.to_string()))
    }

    /// Normalize a claim, also reporting the outcome and run metadata
    pub fn normalize_detailed(&self, raw_text: &str) -> Result<Normalization, NormalizerError> {
        let prompt = self.build_prompt(raw_text)?;

        let request_id = Uuid::now_v7();
        let span = info_span!("normalize", %request_id);
        let _guard = span.enter();

        let timestamp = Utc::now();
        let started = Instant::now();

        info!(
            "Normalizing claim: {} chars, model '{}'",
            raw_text.trim().chars().count(),
            self.client.model_name()
        );
        let prompt_chars = prompt.chars().count();
        debug!("Prompt length: {} chars", prompt_chars);

        let (result, completion_chars) = self.run(&prompt);

        let (record, outcome) = match result {
            Ok(record) => (record, Outcome::Parsed),
            Err(reason) => {
                warn!("Falling back: {}", reason);
                (fallback_record(&reason), Outcome::Fallback(reason))
            }
        };

        let metadata = NormalizationMetadata {
            request_id,
            timestamp,
            model_name: self.client.model_name().to_string(),
            template_version: TEMPLATE_VERSION,
            prompt_chars,
            completion_chars,
            processing_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            "Normalization complete: severity {}, confidence {:.2}, fallback {}",
            record.severity,
            record.confidence,
            outcome.is_fallback()
        );

        Ok(Normalization {
            record,
            outcome,
            metadata,
        })
    }

    /// Call the engine, parse, and validate
    fn run(&self, prompt: &str) -> (Result<ClaimRecord, FallbackReason>, usize) {
        let options = self.config.completion_options();

        let completion = match self.client.complete(prompt, &options) {
            Ok(text) => text,
            Err(e) => return (Err(FallbackReason::Inference(e.to_string())), 0),
        };

        let completion_chars = completion.chars().count();
        debug!("Completion length: {} chars", completion_chars);

        let result = parse_completion(&completion)
            .map(|map| coerce_object(&map))
            .map_err(|e| {
                debug!(raw = %e.raw(), "Unparsable completion");
                FallbackReason::Unparsable(e)
            });

        (result, completion_chars)
    }
}
