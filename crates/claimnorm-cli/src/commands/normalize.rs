//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimnorm_domain::InferenceClient;
use claimnorm_normalizer::Normalizer;
use std::fmt::Display;
use std::fs;
use std::io::{self, Read};

/// Execute the normalize command.
pub fn execute_normalize<C>(
    args: NormalizeArgs,
    normalizer: &Normalizer<C>,
    formatter: &Formatter,
) -> Result<()>
where
    C: InferenceClient,
    C::Error: Display,
{
    let text = read_claim_text(&args, io::stdin())?;

    if args.details {
        let result = normalizer.normalize_detailed(&text)?;
        if result.outcome.is_fallback() {
            eprintln!("{}", formatter.warning("Returned the fallback record"));
        }
        println!("{}", formatter.format_normalization(&result)?);
    } else {
        let record = normalizer.normalize(&text)?;
        println!("{}", formatter.format_record(&record)?);
    }

    Ok(())
}

/// Resolve the claim text from the argument, a file, or `stdin`.
fn read_claim_text(args: &NormalizeArgs, mut stdin: impl Read) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return Ok(fs::read_to_string(path)?);
    }
    if args.stdin {
        let mut text = String::new();
        stdin.read_to_string(&mut text)?;
        return Ok(text);
    }

    Err(CliError::InvalidInput(
        "Provide claim text, --file, or --stdin".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use claimnorm_llm::MockClient;
    use claimnorm_normalizer::NormalizerError;
    use std::path::PathBuf;

    fn args(text: Option<&str>, file: Option<PathBuf>, stdin: bool) -> NormalizeArgs {
        NormalizeArgs {
            text: text.map(str::to_string),
            file,
            stdin,
            details: false,
        }
    }

    #[test]
    fn test_text_argument_wins() {
        let text = read_claim_text(&args(Some("Roof leak"), None, false), io::empty()).unwrap();
        assert_eq!(text, "Roof leak");
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claim.txt");
        fs::write(&path, "Basement flooded after storm").unwrap();

        let text = read_claim_text(&args(None, Some(path), false), io::empty()).unwrap();
        assert_eq!(text, "Basement flooded after storm");
    }

    #[test]
    fn test_reads_stdin() {
        let input = "Bike stolen from porch".as_bytes();
        let text = read_claim_text(&args(None, None, true), input).unwrap();
        assert_eq!(text, "Bike stolen from porch");
    }

    #[test]
    fn test_missing_source_is_invalid_input() {
        let result = read_claim_text(&args(None, None, false), io::empty());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_text_surfaces_normalizer_error() {
        let normalizer = Normalizer::with_defaults(MockClient::default());
        let formatter = Formatter::new(OutputFormat::Json, false);

        let result = execute_normalize(args(Some("   "), None, false), &normalizer, &formatter);
        assert!(matches!(
            result,
            Err(CliError::Normalizer(NormalizerError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_engine_failure_still_succeeds() {
        let normalizer = Normalizer::with_defaults(MockClient::failing(
            claimnorm_llm::InferenceError::Unavailable("down".into()),
        ));
        let formatter = Formatter::new(OutputFormat::Summary, false);

        let mut details = args(Some("Window broken"), None, false);
        details.details = true;
        assert!(execute_normalize(details, &normalizer, &formatter).is_ok());
    }
}
