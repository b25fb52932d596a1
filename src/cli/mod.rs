//! CLI subcommands — init, validate, run, deps, expand, list.

use crate::core::command::{self, CommandContext, ExpandContext, ExpandedCommand};
use crate::core::envexpand::{EnvExpander, ProcessEnv};
use crate::core::macros::{self, MacroScope};
use crate::core::variant::{split_variant, SuffixVariants};
use crate::core::{parser, types};
use crate::transport::local::LocalExecutor;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new macro file
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate a macro file without running anything
    Validate {
        /// Path to macrun.yaml
        #[arg(short, long, default_value = "macrun.yaml")]
        file: PathBuf,
    },

    /// Expand a statement and run the resulting command
    Run {
        /// Path to macrun.yaml
        #[arg(short, long, default_value = "macrun.yaml")]
        file: PathBuf,

        /// Active variant (default: the file's `variant`)
        #[arg(long)]
        variant: Option<String>,

        /// Working directory for the command (default: the file's `dst_dir`, then $HOME)
        #[arg(long)]
        dst_dir: Option<PathBuf>,

        /// Command statement, e.g. `@install git`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        statement: Vec<String>,
    },

    /// Print the dependencies declared by a statement's leading macro
    Deps {
        /// Path to macrun.yaml
        #[arg(short, long, default_value = "macrun.yaml")]
        file: PathBuf,

        /// Active variant (default: the file's `variant`)
        #[arg(long)]
        variant: Option<String>,

        /// Print a JSON array instead of one dependency per line
        #[arg(long)]
        json: bool,

        /// Command statement, e.g. `@install git`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        statement: Vec<String>,
    },

    /// Show what a statement expands to without running it
    Expand {
        /// Path to macrun.yaml
        #[arg(short, long, default_value = "macrun.yaml")]
        file: PathBuf,

        /// Active variant (default: the file's `variant`)
        #[arg(long)]
        variant: Option<String>,

        /// Print the expansion as JSON
        #[arg(long)]
        json: bool,

        /// Command statement, e.g. `@install git`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        statement: Vec<String>,
    },

    /// List declared macros and which definition the variant selects
    List {
        /// Path to macrun.yaml
        #[arg(short, long, default_value = "macrun.yaml")]
        file: PathBuf,

        /// Active variant (default: the file's `variant`)
        #[arg(long)]
        variant: Option<String>,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, verbose: bool) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Run {
            file,
            variant,
            dst_dir,
            statement,
        } => cmd_run(
            &file,
            variant.as_deref(),
            dst_dir.as_deref(),
            &statement,
            verbose,
        ),
        Commands::Deps {
            file,
            variant,
            json,
            statement,
        } => cmd_deps(&file, variant.as_deref(), &statement, json),
        Commands::Expand {
            file,
            variant,
            json,
            statement,
        } => cmd_expand(&file, variant.as_deref(), &statement, json, verbose),
        Commands::List { file, variant } => cmd_list(&file, variant.as_deref()),
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("macrun.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    std::fs::create_dir_all(path)
        .map_err(|e| format!("cannot create {}: {}", path.display(), e))?;

    let template = r#"version: "1.0"
name: my-macros
description: "Managed by macrun"

# variant: linux
# dst_dir: $HOME

macros:
  hello:
    prefix: [echo, hello]
"#;
    std::fs::write(&config_path, template)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized macrun project at {}", path.display());
    println!("  Created: {}", config_path.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);

    if errors.is_empty() {
        println!("OK: {} ({} macros)", config.name, config.macros.len());
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Parse and validate a macro file, returning errors if invalid.
fn parse_and_validate(file: &Path) -> Result<types::MacroFile, String> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err("validation failed".to_string())
}

/// Command-line override, then the file's default, then no variant.
fn active_variant(config: &types::MacroFile, flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| config.variant.clone())
        .unwrap_or_default()
}

/// Command-line override, then the file's `dst_dir`, then `$HOME`, then `.`.
fn destination_dir(
    config: &types::MacroFile,
    flag: Option<&Path>,
    env: &dyn EnvExpander,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(ref dir) = config.dst_dir {
        return PathBuf::from(env.expand(dir));
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn cmd_run(
    file: &Path,
    variant_flag: Option<&str>,
    dst_flag: Option<&Path>,
    statement: &[String],
    verbose: bool,
) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let variant = active_variant(&config, variant_flag);
    let dst_dir = destination_dir(&config, dst_flag, &ProcessEnv);
    if !dst_dir.is_dir() {
        return Err(format!(
            "destination directory {} does not exist",
            dst_dir.display()
        ));
    }

    let naming = SuffixVariants::default();
    let ctx = CommandContext {
        expand: ExpandContext {
            scope: MacroScope {
                macros: &config.macros,
                variant: &variant,
                naming: &naming,
            },
            env: &ProcessEnv,
            verbose,
        },
        dst_dir: &dst_dir,
        executor: &LocalExecutor,
    };
    command::process_command(statement, &ctx).map_err(|e| e.to_string())
}

fn cmd_deps(
    file: &Path,
    variant_flag: Option<&str>,
    statement: &[String],
    json: bool,
) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let variant = active_variant(&config, variant_flag);
    let naming = SuffixVariants::default();
    let scope = MacroScope {
        macros: &config.macros,
        variant: &variant,
        naming: &naming,
    };

    let out = format_deps(macros::macro_deps(statement, &scope), json)?;
    if !out.is_empty() {
        println!("{}", out);
    }
    Ok(())
}

/// One dependency per line, or a JSON array.
fn format_deps(deps: &[String], json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string(deps).map_err(|e| format!("JSON error: {}", e));
    }
    Ok(deps.join("\n"))
}

fn cmd_expand(
    file: &Path,
    variant_flag: Option<&str>,
    statement: &[String],
    json: bool,
    verbose: bool,
) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let variant = active_variant(&config, variant_flag);
    let naming = SuffixVariants::default();
    let ctx = ExpandContext {
        scope: MacroScope {
            macros: &config.macros,
            variant: &variant,
            naming: &naming,
        },
        env: &ProcessEnv,
        verbose,
    };

    let cmd = command::expand_command(statement, &ctx).map_err(|e| e.to_string())?;
    println!("{}", format_expansion(&cmd, json)?);
    Ok(())
}

/// The macro chain as an indented tree followed by the final command line.
fn format_expansion(cmd: &ExpandedCommand, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(cmd).map_err(|e| format!("JSON error: {}", e));
    }
    let mut lines: Vec<String> = cmd
        .chain
        .iter()
        .enumerate()
        .map(|(depth, name)| format!("{}{}{}", "  ".repeat(depth), types::MACRO_SIGIL, name))
        .collect();
    lines.push(cmd.command_line());
    Ok(lines.join("\n"))
}

fn cmd_list(file: &Path, variant_flag: Option<&str>) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let variant = active_variant(&config, variant_flag);
    print!("{}", format_list(&config, &variant));
    Ok(())
}

/// Header line, then every macro key. `*` marks the key a reference to its
/// base name resolves to under `variant`.
fn format_list(config: &types::MacroFile, variant: &str) -> String {
    let naming = SuffixVariants::default();
    let scope = MacroScope {
        macros: &config.macros,
        variant,
        naming: &naming,
    };

    let mut out = if variant.is_empty() {
        format!("{} ({} macros)\n", config.name, config.macros.len())
    } else {
        format!(
            "{} ({} macros, variant {})\n",
            config.name,
            config.macros.len(),
            variant
        )
    };

    for (key, m) in &config.macros {
        let (base, _) = split_variant(key);
        let reference = format!("{}{}", types::MACRO_SIGIL, base);
        let selected = macros::find_macro(&reference, &scope)
            .is_some_and(|(_, resolved)| resolved == *key);
        let marker = if selected { "*" } else { " " };
        if m.deps.is_empty() {
            out.push_str(&format!("  {} {}\n", marker, key));
        } else {
            out.push_str(&format!("  {} {} (deps: {})\n", marker, key, m.deps.join(", ")));
        }
    }
    out
}
