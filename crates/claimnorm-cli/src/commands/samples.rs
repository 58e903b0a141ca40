//! Samples command implementation.

use crate::error::Result;
use crate::output::Formatter;
use claimnorm_domain::InferenceClient;
use claimnorm_normalizer::Normalizer;
use std::fmt::Display;
use tracing::info;

/// Built-in claims for trying out a model.
pub const SAMPLE_CLAIMS: [&str; 4] = [
    "Car accident on main road, rear bumper damaged and minor scratches on door. No injuries reported.",
    "Water leakage from bathroom pipeline seeped into the bedroom wall, paint and plaster damaged.",
    "Mobile phone slipped from hand, screen shattered and back panel cracked.",
    "Fire in living room due to short circuit, sofa and TV unit completely burnt.",
];

/// Execute the samples command.
pub fn execute_samples<C>(normalizer: &Normalizer<C>, formatter: &Formatter) -> Result<()>
where
    C: InferenceClient,
    C::Error: Display,
{
    let mut results = Vec::with_capacity(SAMPLE_CLAIMS.len());
    for (i, claim) in SAMPLE_CLAIMS.iter().enumerate() {
        info!("Normalizing sample {}/{}", i + 1, SAMPLE_CLAIMS.len());
        let record = normalizer.normalize(claim)?;
        results.push((claim.to_string(), record));
    }

    println!("{}", formatter.format_batch(&results)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use claimnorm_llm::MockClient;

    #[test]
    fn test_samples_are_not_blank() {
        assert!(SAMPLE_CLAIMS.iter().all(|claim| !claim.trim().is_empty()));
    }

    #[test]
    fn test_every_sample_is_sent() {
        let client = MockClient::new(r#"{"loss_type": "Vehicle", "severity": "Low"}"#);
        let normalizer = Normalizer::with_defaults(client.clone());
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_samples(&normalizer, &formatter).unwrap();
        assert_eq!(client.call_count(), SAMPLE_CLAIMS.len());
    }
}
