//! Shared terminal output and interactive prompts for CLI commands

use std::time::Duration;

use anyhow::Result;
use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use zeroize::Zeroizing;

/// Interactive prompts for CLI commands
pub struct CommandPrompts {
    theme: ColorfulTheme,
    term: Term,
}

impl Default for CommandPrompts {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPrompts {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stdout(),
        }
    }

    /// Display a section header
    pub fn section_header(&self, title: &str) -> Result<()> {
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{}", style(title).bold().cyan()))?;
        self.term
            .write_line(&style("-".repeat(40)).dim().to_string())?;
        Ok(())
    }

    /// Display a success message
    pub fn success(&self, message: &str) -> Result<()> {
        self.term
            .write_line(&format!("{}", style(message).green().bold()))?;
        Ok(())
    }

    /// Display an info message
    pub fn info(&self, message: &str) -> Result<()> {
        self.term.write_line(&format!("{}", style(message).dim()))?;
        Ok(())
    }

    /// Display a warning message
    pub fn warn(&self, message: &str) -> Result<()> {
        self.term
            .write_line(&format!("{}", style(message).yellow()))?;
        Ok(())
    }

    /// Display a labelled value
    pub fn field(&self, label: &str, value: &str) -> Result<()> {
        self.term
            .write_line(&format!("  {} {}", style(format!("{}:", label)).dim(), value))?;
        Ok(())
    }

    /// Prompt for a string with optional default
    pub fn prompt_string(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);

        if let Some(d) = default {
            input = input.default(d.to_string());
        }

        Ok(input.interact_text()?)
    }

    /// Prompt for a string that may be left empty
    pub fn prompt_optional(&self, prompt: &str) -> Result<Option<String>> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(value).filter(|v| !v.trim().is_empty()))
    }

    /// Prompt for a hidden password
    pub fn prompt_password(&self, prompt: &str) -> Result<Zeroizing<String>> {
        let value = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(Zeroizing::new(value))
    }

    /// Start a spinner for a blocking operation
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let spinner = if self.term.is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
