use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

/// Interactive selection from a list of items.
pub trait Prompt {
    /// Ask the user to pick one of `items`. `None` if the user aborted.
    fn select(&self, message: &str, items: &[String]) -> Result<Option<usize>>;
}

/// [`Prompt`] on the terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&self, message: &str, items: &[String]) -> Result<Option<usize>> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()
            .context("Failed to read the selection from the terminal.")
    }
}
