//! Record/replay of prompt sessions as YAML cassettes.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
