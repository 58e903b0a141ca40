//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::Result;
use claimnorm_normalizer::PromptBuilder;

/// Execute the prompt command.
pub fn execute_prompt(args: PromptArgs, config: &Config) -> Result<()> {
    print!("{}", render_prompt(&args, config)?);
    Ok(())
}

fn render_prompt(args: &PromptArgs, config: &Config) -> Result<String> {
    let include_examples = !args.no_examples && config.normalizer.include_examples;
    let prompt = PromptBuilder::new(&args.text)?
        .with_examples(include_examples)
        .build();
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn args(text: &str, no_examples: bool) -> PromptArgs {
        PromptArgs {
            text: text.to_string(),
            no_examples,
        }
    }

    #[test]
    fn test_prompt_embeds_claim() {
        let prompt = render_prompt(&args("Hail dented the car", false), &Config::default()).unwrap();
        assert!(prompt.contains("Hail dented the car"));
        assert!(prompt.ends_with("JSON:\n"));
    }

    #[test]
    fn test_no_examples_flag_shortens_prompt() {
        let config = Config::default();
        let with = render_prompt(&args("Hail dented the car", false), &config).unwrap();
        let without = render_prompt(&args("Hail dented the car", true), &config).unwrap();
        assert!(without.len() < with.len());
    }

    #[test]
    fn test_config_can_disable_examples() {
        let mut config = Config::default();
        config.normalizer.include_examples = false;
        let from_config = render_prompt(&args("Hail dented the car", false), &config).unwrap();
        let from_flag = render_prompt(&args("Hail dented the car", true), &Config::default()).unwrap();
        assert_eq!(from_config, from_flag);
    }

    #[test]
    fn test_blank_text_rejected() {
        let result = render_prompt(&args("  ", false), &Config::default());
        assert!(matches!(result, Err(CliError::Normalizer(_))));
    }
}
