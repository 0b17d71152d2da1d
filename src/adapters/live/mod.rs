//! Live adapters that talk to the real terminal.

pub mod terminal;
