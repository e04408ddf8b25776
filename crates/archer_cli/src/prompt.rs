//! Interactive prompts.

use anyhow::{bail, Context, Result};
use dialoguer::Select;

/// Asks the user to choose among options.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Let the user pick one of `options`, preselecting `default` when present.
    fn select_one(&self, message: &str, default: &str, options: &[String]) -> Result<String>;
}

/// Prompter reading from the terminal.
#[derive(Debug, Default)]
pub struct TermPrompter;

impl TermPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TermPrompter {
    fn select_one(&self, message: &str, default: &str, options: &[String]) -> Result<String> {
        if options.is_empty() {
            bail!("nothing to choose from for \"{}\"", message);
        }

        let preselected = options.iter().position(|o| o == default).unwrap_or(0);
        let index = Select::new()
            .with_prompt(message)
            .items(options)
            .default(preselected)
            .interact()
            .context("Failed to get user input")?;

        Ok(options[index].clone())
    }
}
