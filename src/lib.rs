//! macrun — macro-expanding command runner.
//!
//! Statements such as `@install git` are expanded through variant-aware
//! macros, interpolated against the environment, and run as a single
//! interactive process.

pub mod cli;
pub mod core;
pub mod transport;
