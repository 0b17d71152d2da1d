//! Replaying adapter for the `Prompter` port.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::AppError;
use crate::ports::prompter::{ConfirmRequest, InputRequest, Prompter, SelectRequest};

/// Answers questions from a cassette instead of the terminal.
pub struct ReplayingPrompter {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingPrompter {
    /// Create a replaying prompter backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    fn next(&self, method: &str) -> Result<Value, AppError> {
        next_output(&self.replayer, "prompter", method).map_err(AppError::Prompt)
    }
}

impl Prompter for ReplayingPrompter {
    fn confirm(&self, request: &ConfirmRequest) -> Result<bool, AppError> {
        let answer = replay_result::<bool>(self.next("confirm")?).map_err(AppError::Prompt)?;
        debug!(prompt = %request.prompt, answer, "replayed confirm");
        Ok(answer)
    }

    fn input(&self, request: &InputRequest) -> Result<String, AppError> {
        let answer = replay_result::<Option<String>>(self.next("input")?)
            .map_err(AppError::Prompt)?
            .filter(|s| !s.is_empty())
            .or_else(|| request.default.clone())
            .unwrap_or_default();
        debug!(prompt = %request.prompt, answer = %answer, "replayed input");
        Ok(answer)
    }

    // Accepts either the chosen label or its index.
    fn select(&self, request: &SelectRequest) -> Result<usize, AppError> {
        let output = replay_result::<Value>(self.next("select")?).map_err(AppError::Prompt)?;
        let index = match output {
            Value::String(ref label) => request.items.iter().position(|item| item == label),
            Value::Number(ref n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .filter(|&i| i < request.items.len()),
            _ => None,
        };
        let index = index.ok_or_else(|| {
            AppError::Prompt(format!(
                "Replayed answer {output} is not one of {:?} for '{}'",
                request.items, request.prompt
            ))
        })?;
        debug!(prompt = %request.prompt, index, "replayed select");
        Ok(index)
    }
}
