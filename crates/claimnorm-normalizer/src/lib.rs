//! claimnorm Normalizer
//!
//! Converts free-text insurance claim descriptions into structured claim
//! records using a text-generation engine.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → InferenceClient → Parser → Validator → ClaimRecord
//!                              │              │
//!                              └──── failure ─┴──→ Fallback → ClaimRecord
//! ```
//!
//! # Key Features
//!
//! - **Prompt templating**: a fixed instruction block listing the eight keys
//! - **Robust parsing**: first balanced JSON object, immune to prose and fences
//! - **Total validation**: any JSON value coerces to a fully populated record
//! - **Graceful degradation**: engine and parse failures become fallback records
//!
//! Only blank input is reported as an error.
//!
//! # Example Usage
//!
//! ```
//! use claimnorm_normalizer::Normalizer;
//! use claimnorm_llm::MockClient;
//! use claimnorm_domain::Severity;
//!
//! let client = MockClient::new(r#"{"loss_type": "Fire", "severity": "High", "confidence": 0.9}"#);
//! let normalizer = Normalizer::with_defaults(client);
//!
//! let record = normalizer.normalize("Kitchen fire destroyed the cabinets").unwrap();
//! assert_eq!(record.loss_type, "Fire");
//! assert_eq!(record.severity, Severity::High);
//!
//! assert!(normalizer.normalize("   ").is_err());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fallback;
mod normalizer;
mod parser;
mod prompt;
mod types;
mod validator;


pub use config::NormalizerConfig;
pub use error::{NormalizerError, ParseError};
pub use fallback::{fallback_record, FallbackReason, FALLBACK_LOSS_TYPE};
pub use normalizer::Normalizer;
pub use parser::parse_completion;
pub use prompt::{PromptBuilder, TEMPLATE_VERSION};
pub use types::{Normalization, NormalizationMetadata, Outcome};
pub use validator::{coerce_object, coerce_record};
