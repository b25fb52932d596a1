//! Macro file schema types.
//!
//! A macro file declares named macros, each a template of prefix and suffix
//! argument tokens wrapped around the caller's arguments, plus the
//! dependencies an external scheduler should satisfy before it runs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Leading character that marks a token as a macro reference.
pub const MACRO_SIGIL: char = '@';

/// Separator between a macro's base name and its variant (`install%arch`).
pub const VARIANT_SEPARATOR: char = '%';

// ============================================================================
// Top-level macrun.yaml
// ============================================================================

/// Root configuration — a named set of macros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroFile {
    /// Schema version (must be "1.0")
    pub version: String,

    /// Human-readable name of this macro set
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Default variant (overridable from the command line)
    #[serde(default)]
    pub variant: Option<String>,

    /// Default working directory for executed commands
    #[serde(default)]
    pub dst_dir: Option<String>,

    /// Macro declarations, keyed by base or variant-qualified name
    #[serde(default)]
    pub macros: IndexMap<String, Macro>,
}

// ============================================================================
// Macros
// ============================================================================

/// A macro definition. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    /// Prerequisites, opaque to this crate
    #[serde(default)]
    pub deps: Vec<String>,

    /// Tokens inserted before the caller's arguments
    #[serde(default)]
    pub prefix: Vec<String>,

    /// Tokens inserted after the caller's arguments
    #[serde(default)]
    pub suffix: Vec<String>,
}

/// Whether a token names a macro rather than a literal command.
pub fn is_macro_ref(token: &str) -> bool {
    token.starts_with(MACRO_SIGIL)
}
