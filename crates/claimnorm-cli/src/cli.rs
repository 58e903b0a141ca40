//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// claimnorm - Normalize free-text insurance claims with a local language model.
#[derive(Debug, Parser)]
#[command(name = "claimnorm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inference backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendArg>,

    /// Inference engine endpoint (e.g., http://localhost:11434)
    #[arg(long, global = true, env = "CLAIMNORM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Model name
    #[arg(short, long, global = true, env = "CLAIMNORM_MODEL")]
    pub model: Option<String>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty JSON
    Json,
    /// Table format
    Table,
    /// Labelled summary lines
    Summary,
}

/// Inference backend options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum BackendArg {
    /// Ollama server
    Ollama,
    /// llama.cpp server
    Llamacpp,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize one claim description
    Normalize(NormalizeArgs),

    /// Print the prompt that would be sent for a claim
    Prompt(PromptArgs),

    /// Normalize the built-in sample claims
    Samples,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the normalize command.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Claim description text
    pub text: Option<String>,

    /// Read the claim description from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Read the claim description from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub stdin: bool,

    /// Also print the outcome and run metadata
    #[arg(long)]
    pub details: bool,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Claim description text
    pub text: String,

    /// Leave the worked examples out of the prompt
    #[arg(long)]
    pub no_examples: bool,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Summary => crate::config::OutputFormat::Summary,
        }
    }
}

impl From<BackendArg> for crate::config::BackendKind {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Ollama => crate::config::BackendKind::Ollama,
            BackendArg::Llamacpp => crate::config::BackendKind::LlamaCpp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_command() {
        let cli = Cli::try_parse_from(["claimnorm", "normalize", "Car hit a pole"]).unwrap();
        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.text.as_deref(), Some("Car hit a pole"));
                assert!(!args.stdin);
            }
            _ => panic!("Expected Normalize command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "claimnorm",
            "samples",
            "--backend",
            "llamacpp",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.backend, Some(BackendArg::Llamacpp)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_text_conflicts_with_stdin() {
        let result = Cli::try_parse_from(["claimnorm", "normalize", "text", "--stdin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["claimnorm", "config", "init", "--force"]).unwrap();
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_backend_conversion() {
        let kind: crate::config::BackendKind = BackendArg::Llamacpp.into();
        assert_eq!(kind, crate::config::BackendKind::LlamaCpp);
    }
}
