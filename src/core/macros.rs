//! Macro resolution and dependency discovery.
//!
//! Resolves `@name` references against the macro mapping, trying each
//! variant-qualified candidate in order. Dependency discovery looks only at
//! the first token of a statement and never expands or executes anything.

use super::types::{is_macro_ref, Macro, MACRO_SIGIL};
use super::variant::VariantNaming;
use indexmap::IndexMap;

/// Everything needed to look up a macro: the mapping, the active variant,
/// and the rule that turns a base name into candidate keys.
#[derive(Clone, Copy)]
pub struct MacroScope<'a> {
    pub macros: &'a IndexMap<String, Macro>,
    pub variant: &'a str,
    pub naming: &'a dyn VariantNaming,
}

impl std::fmt::Debug for MacroScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroScope")
            .field("macros", &self.macros.len())
            .field("variant", &self.variant)
            .finish()
    }
}

/// Resolve a macro reference to its definition and the key that matched.
///
/// Returns `None` when `name` lacks the sigil or when no candidate key
/// exists. Absence is not an error here; callers decide.
pub fn find_macro<'a>(name: &str, scope: &MacroScope<'a>) -> Option<(&'a Macro, String)> {
    let base = name.strip_prefix(MACRO_SIGIL)?;
    scope
        .naming
        .candidates(base, scope.variant)
        .into_iter()
        .find_map(|candidate| {
            scope
                .macros
                .get(&candidate)
                .map(|m| (m, candidate))
        })
}

/// Dependencies declared by the macro a statement starts with.
///
/// Empty when the statement is empty, does not start with a macro
/// reference, or names a macro that does not resolve.
pub fn macro_deps<'a, S: AsRef<str>>(args: &[S], scope: &MacroScope<'a>) -> &'a [String] {
    let Some(first) = args.first().map(|s| s.as_ref()) else {
        return &[];
    };
    if !is_macro_ref(first) {
        return &[];
    }
    match find_macro(first, scope) {
        Some((m, _)) => m.deps.as_slice(),
        None => &[],
    }
}
