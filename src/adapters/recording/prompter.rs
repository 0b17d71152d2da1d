//! Recording adapter for the `Prompter` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::AppError;
use crate::ports::prompter::{ConfirmRequest, InputRequest, Prompter, SelectRequest};

/// Records every question and answer while delegating to an inner prompter.
pub struct RecordingPrompter {
    inner: Box<dyn Prompter>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPrompter {
    /// Creates a new recording prompter wrapping the given implementation.
    pub fn new(inner: Box<dyn Prompter>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, request: &ConfirmRequest) -> Result<bool, AppError> {
        let result = self.inner.confirm(request);
        record_result(&self.recorder, "prompter", "confirm", request, &result);
        result
    }

    fn input(&self, request: &InputRequest) -> Result<String, AppError> {
        let result = self.inner.input(request);
        record_result(&self.recorder, "prompter", "input", request, &result);
        result
    }

    // Stored as the chosen label so cassettes stay readable.
    fn select(&self, request: &SelectRequest) -> Result<usize, AppError> {
        let result = self.inner.select(request);
        let label = result.as_ref().map(|&i| request.items.get(i).cloned().unwrap_or_default());
        record_result(&self.recorder, "prompter", "select", request, &label);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Prompter for Fixed {
        fn confirm(&self, _request: &ConfirmRequest) -> Result<bool, AppError> {
            Ok(true)
        }

        fn input(&self, _request: &InputRequest) -> Result<String, AppError> {
            Err(AppError::Prompt("stdin closed".into()))
        }

        fn select(&self, _request: &SelectRequest) -> Result<usize, AppError> {
            Ok(1)
        }
    }

    #[test]
    fn records_answers_in_order() {
        let dir = std::env::temp_dir().join("watermark_recording_prompter_test");
        let path = dir.join("prompter.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec", "abc")));
        let prompter = RecordingPrompter::new(Box::new(Fixed), Arc::clone(&recorder));

        assert!(prompter.confirm(&ConfirmRequest { prompt: "ready?".into(), default: true }).unwrap());
        assert!(prompter.input(&InputRequest { prompt: "file?".into(), default: None }).is_err());
        let pick = SelectRequest::new("kind?", &["Text watermark", "Image watermark"]);
        assert_eq!(prompter.select(&pick).unwrap(), 1);

        drop(prompter);
        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.interactions.len(), 3);
        assert_eq!(cassette.interactions[0].output, serde_json::json!({"Ok": true}));
        assert_eq!(
            cassette.interactions[1].output,
            serde_json::json!({"Err": "Prompt error: stdin closed"})
        );
        assert_eq!(cassette.interactions[2].output, serde_json::json!({"Ok": "Image watermark"}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
