//! Writes prompt sessions to cassette files.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use super::format::{Cassette, Interaction};

/// Collects interactions in call order and writes them as YAML on finish.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Append an interaction; its `seq` is its position in the recording.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Write the cassette, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let count = self.interactions.len();
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        debug!(path = %self.path.display(), count, "cassette written");
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = std::env::temp_dir().join("watermark_cassette_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("nested").join("prompter.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        recorder.record(
            "prompter",
            "input",
            json!({"prompt": "What file do you want to mark?", "default": "test.jpg"}),
            json!({"Ok": "beach.png"}),
        );
        recorder.record(
            "prompter",
            "select",
            json!({"prompt": "Watermark type", "items": ["Text watermark", "Image watermark"]}),
            json!({"Ok": "Image watermark"}),
        );

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("prompter"));
        assert!(content.contains("beach.png"));
        assert!(content.contains("Image watermark"));

        let cassette: super::super::format::Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[1].seq, 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
