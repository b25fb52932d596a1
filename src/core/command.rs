//! Command statement processing — macro expansion and dispatch.
//!
//! A statement is an argument vector. Each level environment-expands the
//! vector, and if its first token is a macro reference, replaces it with
//! `prefix ++ args ++ suffix` and goes around again. The first non-macro
//! command reached is handed to the executor.

use super::envexpand::{append_expanded, expand_all, EnvExpander};
use super::macros::{find_macro, MacroScope};
use super::types::is_macro_ref;
use crate::transport::{ExecError, Executor};
use serde::Serialize;
use std::path::Path;

/// Maximum number of nested macro expansions in one statement.
pub const MAX_EXPANSION_DEPTH: usize = 64;

/// Why a statement could not be run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid command statement")]
    EmptyStatement,

    #[error("macro or variant not found: {0}")]
    MacroNotFound(String),

    #[error("macro expansion exceeded depth {depth} at {name}")]
    ExpansionTooDeep { name: String, depth: usize },

    #[error(transparent)]
    Execution(#[from] ExecError),
}

/// What expansion needs: macro lookup, env interpolation, diagnostics.
#[derive(Clone, Copy)]
pub struct ExpandContext<'a> {
    pub scope: MacroScope<'a>,
    pub env: &'a dyn EnvExpander,
    pub verbose: bool,
}

/// Runtime configuration for processing statements.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub expand: ExpandContext<'a>,
    pub dst_dir: &'a Path,
    pub executor: &'a dyn Executor,
}

/// A statement after all macro references have been expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedCommand {
    /// Terminal program name
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Resolved macro keys, outermost first
    pub chain: Vec<String>,
}

impl ExpandedCommand {
    /// The program followed by its arguments, space-joined.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// Expand a statement down to its terminal command without running it.
pub fn expand_command<S: AsRef<str>>(
    args: &[S],
    ctx: &ExpandContext<'_>,
) -> Result<ExpandedCommand, CommandError> {
    let mut chain = Vec::new();
    let (program, args) = expand_level(expand_all(args, ctx.env), ctx, &mut chain)?;
    Ok(ExpandedCommand {
        program,
        args,
        chain,
    })
}

/// Expand a statement and run the resulting command in `ctx.dst_dir`.
pub fn process_command<S: AsRef<str>>(
    args: &[S],
    ctx: &CommandContext<'_>,
) -> Result<(), CommandError> {
    let cmd = expand_command(args, &ctx.expand)?;
    if ctx.expand.verbose {
        tracing::info!(
            "executing command: {} {}",
            cmd.program,
            cmd.args.join(" ")
        );
    }
    ctx.executor.run(&cmd.program, &cmd.args, ctx.dst_dir)?;
    Ok(())
}

/// One expansion level. `args` has already been environment-expanded.
fn expand_level(
    args: Vec<String>,
    ctx: &ExpandContext<'_>,
    chain: &mut Vec<String>,
) -> Result<(String, Vec<String>), CommandError> {
    let mut args = args.into_iter();
    let cmd_name = match args.next() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(CommandError::EmptyStatement),
    };
    let cmd_args: Vec<String> = args.collect();

    if !is_macro_ref(&cmd_name) {
        return Ok((cmd_name, cmd_args));
    }

    if chain.len() >= MAX_EXPANSION_DEPTH {
        return Err(CommandError::ExpansionTooDeep {
            name: cmd_name,
            depth: MAX_EXPANSION_DEPTH,
        });
    }

    let (m, resolved) =
        find_macro(&cmd_name, &ctx.scope).ok_or(CommandError::MacroNotFound(cmd_name))?;

    let mut expanded = Vec::with_capacity(m.prefix.len() + cmd_args.len() + m.suffix.len());
    append_expanded(&mut expanded, &m.prefix, ctx.env);
    append_expanded(&mut expanded, &cmd_args, ctx.env);
    append_expanded(&mut expanded, &m.suffix, ctx.env);

    if ctx.verbose {
        tracing::info!("expanding macro: {}", resolved);
    }
    chain.push(resolved);

    // Prefix and suffix tokens get a fresh expansion at the next level too.
    expand_level(expand_all(&expanded, ctx.env), ctx, chain)
}
