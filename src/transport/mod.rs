//! Process execution — the terminal step of command dispatch.

pub mod local;

use std::path::Path;

/// Failure to run a terminal command.
///
/// Spawn failures and unsuccessful exits share this type; the message says
/// which one happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ExecError {
    pub message: String,
}

impl ExecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Runs a program to completion.
///
/// Implementations must block until the child exits and report anything
/// other than a successful exit as an error.
pub trait Executor {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<(), ExecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_error_display() {
        let e = ExecError::new("false exited with code 1");
        assert_eq!(e.to_string(), "false exited with code 1");
    }
}
