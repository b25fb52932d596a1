//! Macro file parsing and validation.
//!
//! Parses macrun.yaml (or a `.toml` equivalent) and validates structural
//! constraints:
//! - Version must be "1.0"
//! - Macro names must be usable as `@name` references
//! - Variant-qualified names need both a base and a variant
//! - Dependencies must not be blank

use super::types::*;
use super::variant::split_variant;
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a macro file from disk. `.toml` files are read as TOML, anything
/// else as YAML.
pub fn parse_config_file(path: &Path) -> Result<MacroFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_config_toml(&content),
        _ => parse_config(&content),
    }
}

/// Parse a macro file from a YAML string.
pub fn parse_config(yaml: &str) -> Result<MacroFile, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Parse a macro file from a TOML string.
pub fn parse_config_toml(content: &str) -> Result<MacroFile, String> {
    toml::from_str(content).map_err(|e| format!("TOML parse error: {}", e))
}

/// Validate a parsed macro file. Returns a list of errors (empty = valid).
pub fn validate_config(config: &MacroFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    if config.name.is_empty() {
        errors.push(ValidationError {
            message: "name must not be empty".to_string(),
        });
    }

    if let Some(ref variant) = config.variant {
        if variant.contains(VARIANT_SEPARATOR) || variant.contains(char::is_whitespace) {
            errors.push(ValidationError {
                message: format!("invalid default variant '{}'", variant),
            });
        }
    }

    for (name, m) in &config.macros {
        errors.extend(validate_macro_name(name));

        if m.deps.iter().any(|d| d.trim().is_empty()) {
            errors.push(ValidationError {
                message: format!("macro '{}' has an empty dependency", name),
            });
        }
    }

    errors
}

fn validate_macro_name(name: &str) -> Option<ValidationError> {
    let message = if name.is_empty() {
        "macro name must not be empty".to_string()
    } else if name.starts_with(MACRO_SIGIL) {
        format!("macro '{}' must not start with '{}'", name, MACRO_SIGIL)
    } else if name.contains(char::is_whitespace) {
        format!("macro '{}' contains whitespace", name)
    } else {
        match split_variant(name) {
            (base, Some(variant))
                if base.is_empty() || variant.is_empty() || variant.contains(VARIANT_SEPARATOR) =>
            {
                format!("macro '{}' has a malformed variant qualifier", name)
            }
            _ => return None,
        }
    };
    Some(ValidationError { message })
}
