//! Variant-qualified macro names.
//!
//! A macro may have several definitions that differ by variant, e.g.
//! `install` and `install%arch`. The naming rule is pluggable so embedders
//! can choose their own fallback order.

use super::types::VARIANT_SEPARATOR;

/// Produces the ordered lookup keys for a base macro name.
///
/// Candidates run from most to least specific; resolution takes the first
/// one present in the macro mapping.
pub trait VariantNaming {
    fn candidates(&self, base: &str, variant: &str) -> Vec<String>;
}

/// `base<sep>variant` first, then the bare `base`.
#[derive(Debug, Clone, Copy)]
pub struct SuffixVariants {
    pub separator: char,
}

impl Default for SuffixVariants {
    fn default() -> Self {
        Self {
            separator: VARIANT_SEPARATOR,
        }
    }
}

impl VariantNaming for SuffixVariants {
    fn candidates(&self, base: &str, variant: &str) -> Vec<String> {
        if variant.is_empty() {
            return vec![base.to_string()];
        }
        vec![
            format!("{}{}{}", base, self.separator, variant),
            base.to_string(),
        ]
    }
}

/// Candidate names under the default `%` rule.
pub fn make_variant_names(base: &str, variant: &str) -> Vec<String> {
    SuffixVariants::default().candidates(base, variant)
}

/// Split a mapping key into base name and variant, if qualified.
pub fn split_variant(key: &str) -> (&str, Option<&str>) {
    match key.split_once(VARIANT_SEPARATOR) {
        Some((base, variant)) => (base, Some(variant)),
        None => (key, None),
    }
}
