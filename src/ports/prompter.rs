//! Prompter port for interactive questions.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A yes/no question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequest {
    /// Question shown to the user.
    pub prompt: String,
    /// Answer used when the user just presses enter.
    pub default: bool,
}

/// A single-line text question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    /// Question shown to the user.
    pub prompt: String,
    /// Pre-filled answer, if any.
    #[serde(default)]
    pub default: Option<String>,
}

/// A pick-one-from-a-list question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectRequest {
    /// Question shown to the user.
    pub prompt: String,
    /// Choices, in display order.
    pub items: Vec<String>,
}

impl SelectRequest {
    /// Build a request from static labels.
    #[must_use]
    pub fn new(prompt: &str, items: &[&str]) -> Self {
        Self { prompt: prompt.to_string(), items: items.iter().map(ToString::to_string).collect() }
    }
}

/// Asks the user questions. Implementations may be a terminal, a recorded
/// cassette, or a test double.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained.
    fn confirm(&self, request: &ConfirmRequest) -> Result<bool, AppError>;

    /// Ask for a line of text. An empty answer is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained.
    fn input(&self, request: &InputRequest) -> Result<String, AppError>;

    /// Ask the user to pick one item; returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained.
    fn select(&self, request: &SelectRequest) -> Result<usize, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_request_from_labels() {
        let request = SelectRequest::new("Pick one", &["a", "b"]);
        assert_eq!(request.prompt, "Pick one");
        assert_eq!(request.items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn input_request_default_is_optional_in_yaml() {
        let request: InputRequest = serde_yaml::from_str("prompt: Type your watermark text").unwrap();
        assert!(request.default.is_none());
    }
}
