//! claimnorm CLI - Normalize free-text insurance claims with a local language model.

use claimnorm_cli::commands;
use claimnorm_cli::engine;
use claimnorm_cli::config::OutputFormat;
use claimnorm_cli::{Cli, Command, Config, Formatter};
use claimnorm_normalizer::Normalizer;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    let color_enabled = !cli.no_color;

    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Summary, color_enabled);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> claimnorm_cli::Result<()> {
    init_tracing(cli.verbose);

    // Load config, then let flags and env vars win
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    config.apply_overrides(&cli);

    let formatter = Formatter::new(config.settings.format, config.settings.color);

    match cli.command {
        Command::Normalize(args) => {
            let client = engine::build_client(&config.backend)?;
            let normalizer = Normalizer::new(client, config.normalizer.clone())?;
            commands::execute_normalize(args, &normalizer, &formatter)?;
        }
        Command::Samples => {
            let client = engine::build_client(&config.backend)?;
            let normalizer = Normalizer::new(client, config.normalizer.clone())?;
            commands::execute_samples(&normalizer, &formatter)?;
        }
        Command::Prompt(args) => {
            commands::execute_prompt(args, &config)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
