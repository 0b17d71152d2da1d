//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every prompt interaction in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Recorded interactions.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name, e.g. `prompter`.
    pub port: String,
    /// Method name, e.g. `confirm`.
    pub method: String,
    /// Serialized request.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Serialized result, using the `Ok`/`Err` convention.
    pub output: serde_json::Value,
}
