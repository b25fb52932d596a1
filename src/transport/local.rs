//! Local execution with the controlling process's stdio.

use super::{ExecError, Executor};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Spawns programs on this machine with stdin, stdout and stderr inherited,
/// so interactive commands behave as if run directly from the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExecutor;

impl Executor for LocalExecutor {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<(), ExecError> {
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ExecError::new(format!("failed to spawn {}: {}", program, e)))?;
        check_status(program, status)
    }
}

fn check_status(program: &str, status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ExecError::new(format!(
            "{} exited with code {}",
            program, code
        ))),
        None => Err(ExecError::new(format!("{} terminated by signal", program))),
    }
}
