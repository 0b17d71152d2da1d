//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::terminal::TerminalPrompter;
use crate::adapters::recording::prompter::RecordingPrompter;
use crate::adapters::replaying::prompter::ReplayingPrompter;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::AppError;
use crate::ports::Prompter;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Prompter port.
    pub prompter: Box<dyn Prompter>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// The context holding the recording adapter must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, AppError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| AppError::Cassette("Recording adapter still has references".into()))?
            .into_inner()
            .map_err(|e| AppError::Cassette(format!("Recorder lock poisoned: {e}")))?;
        recorder.finish().map_err(|e| AppError::Cassette(format!("Failed to write cassette: {e}")))
    }
}

impl ServiceContext {
    /// Create a live context that prompts on the terminal.
    #[must_use]
    pub fn live() -> Self {
        Self { prompter: Box::new(TerminalPrompter::new()) }
    }

    /// Create a recording context that wraps the terminal prompter with a
    /// recorder.
    #[must_use]
    pub fn recording() -> (Self, RecordingSession) {
        let live_ctx = Self::live();

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = PathBuf::from(".watermark-manager/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("prompter.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-prompter"),
            &commit,
        )));

        let prompter = RecordingPrompter::new(live_ctx.prompter, Arc::clone(&recorder));

        let ctx = Self { prompter: Box::new(prompter) };
        let session = RecordingSession { recorder };

        (ctx, session)
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, AppError> {
        let replayer = load_cassette(path)
            .map_err(|e| AppError::Cassette(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self { prompter: Box::new(ReplayingPrompter::new(replayer)) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
