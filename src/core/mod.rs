//! Core macro logic — types, parsing, variant naming, env expansion,
//! resolution, and command processing.

pub mod command;
pub mod envexpand;
pub mod macros;
pub mod parser;
pub mod types;
pub mod variant;
