//! Operator confirmation

use crate::error::{Result, SyncError};
use chrono::NaiveDate;
use dialoguer::{Confirm, Input};

/// Yes/no decision port.
///
/// `required` prompts are always asked. Non-required prompts answer `true`
/// without asking while suppression is on.
pub trait Confirmer {
    fn ask(&mut self, prompt: &str, default: bool, required: bool) -> Result<bool>;

    fn set_suppress_optional(&mut self, suppress: bool);

    fn suppress_optional(&self) -> bool;
}

/// Prompts on the terminal.
#[derive(Debug, Default)]
pub struct TerminalConfirmer {
    suppress_optional: bool,
}

impl TerminalConfirmer {
    pub fn new(suppress_optional: bool) -> Self {
        Self { suppress_optional }
    }
}

impl Confirmer for TerminalConfirmer {
    fn ask(&mut self, prompt: &str, default: bool, required: bool) -> Result<bool> {
        if !required && self.suppress_optional {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| SyncError::Prompt(e.to_string()))
    }

    fn set_suppress_optional(&mut self, suppress: bool) {
        self.suppress_optional = suppress;
    }

    fn suppress_optional(&self) -> bool {
        self.suppress_optional
    }
}

/// Ask for a `YYYY-MM-DD` day; empty input means "no filter".
pub fn prompt_date(prompt: &str) -> Result<Option<NaiveDate>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|value: &String| -> std::result::Result<(), String> {
            parse_day(value).map(|_| ())
        })
        .interact_text()
        .map_err(|e| SyncError::Prompt(e.to_string()))?;

    parse_day(&input).map_err(SyncError::Prompt)
}

fn parse_day(value: &str) -> std::result::Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("expected YYYY-MM-DD, got {:?}", trimmed))
}
