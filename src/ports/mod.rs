//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod prompter;

pub use prompter::{ConfirmRequest, InputRequest, Prompter, SelectRequest};
