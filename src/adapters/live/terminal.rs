//! Terminal prompter backed by `dialoguer`.

use dialoguer::{Confirm, Input, Select};

use crate::error::AppError;
use crate::ports::prompter::{ConfirmRequest, InputRequest, Prompter, SelectRequest};

/// Asks questions on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Create a terminal prompter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> AppError {
    AppError::Prompt(e.to_string())
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, request: &ConfirmRequest) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(&request.prompt)
            .default(request.default)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, request: &InputRequest) -> Result<String, AppError> {
        let mut input = Input::<String>::new().with_prompt(&request.prompt).allow_empty(true);
        if let Some(ref default) = request.default {
            input = input.default(default.clone());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn select(&self, request: &SelectRequest) -> Result<usize, AppError> {
        Select::new()
            .with_prompt(&request.prompt)
            .items(request.items.as_slice())
            .default(0)
            .interact()
            .map_err(prompt_error)
    }
}
