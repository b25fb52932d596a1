//! Environment variable interpolation for argument tokens.
//!
//! Resolves `$NAME` and `${NAME}` references. Unset variables expand to the
//! empty string; a `$` that does not start a valid reference is kept as-is.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Substitutes variable references inside a single token.
pub trait EnvExpander {
    fn expand(&self, token: &str) -> String;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvExpander for ProcessEnv {
    fn expand(&self, token: &str) -> String {
        expand_with(token, |name| std::env::var(name).ok())
    }
}

/// Reads from a fixed map instead of the process environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    pub vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvExpander for MapEnv {
    fn expand(&self, token: &str) -> String {
        expand_with(token, |name| self.vars.get(name).cloned())
    }
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
            .unwrap_or_else(|e| panic!("invalid env reference pattern: {}", e))
    })
}

/// Expand every reference in `token` using `lookup`.
pub fn expand_with<F>(token: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !token.contains('$') {
        return token.to_string();
    }
    reference_pattern()
        .replace_all(token, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            lookup(name).unwrap_or_default()
        })
        .into_owned()
}

/// Expand each token and append it to `out`, preserving order.
pub fn append_expanded<S: AsRef<str>>(
    out: &mut Vec<String>,
    tokens: &[S],
    expander: &dyn EnvExpander,
) {
    out.extend(tokens.iter().map(|t| expander.expand(t.as_ref())));
}

/// Expand each token into a new vector of the same length.
pub fn expand_all<S: AsRef<str>>(tokens: &[S], expander: &dyn EnvExpander) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    append_expanded(&mut out, tokens, expander);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> MapEnv {
        MapEnv::new([("HOME", "/home/me"), ("USER", "me"), ("EMPTY", "")])
    }

    #[test]
    fn test_expand_plain_and_braced() {
        let e = env();
        assert_eq!(e.expand("$HOME/.vimrc"), "/home/me/.vimrc");
        assert_eq!(e.expand("${USER}rc"), "merc");
        assert_eq!(e.expand("$USER@$HOME"), "me@/home/me");
    }

    #[test]
    fn test_expand_unset_is_empty() {
        let e = env();
        assert_eq!(e.expand("a${NOPE}b"), "ab");
        assert_eq!(e.expand("$NOPE"), "");
        assert_eq!(e.expand("$EMPTY"), "");
    }

    #[test]
    fn test_expand_keeps_bare_dollar() {
        let e = env();
        assert_eq!(e.expand("cost: 5$"), "cost: 5$");
        assert_eq!(e.expand("$1"), "$1");
        assert_eq!(e.expand("${}"), "${}");
        assert_eq!(e.expand("no refs"), "no refs");
    }

    #[test]
    fn test_expand_is_not_recursive() {
        let e = MapEnv::new([("A", "$B"), ("B", "x")]);
        assert_eq!(e.expand("$A"), "$B");
    }

    #[test]
    fn test_expand_all_preserves_length() {
        let e = env();
        let out = expand_all(&["$NOPE", "", "$USER"], &e);
        assert_eq!(out, vec!["", "", "me"]);
    }

    #[test]
    fn test_append_expanded_keeps_existing() {
        let e = env();
        let mut out = vec!["first".to_string()];
        append_expanded(&mut out, &["$USER"], &e);
        assert_eq!(out, vec!["first", "me"]);
    }

    #[test]
    fn test_process_env_reads_path() {
        let out = ProcessEnv.expand("${PATH}");
        assert_eq!(out, std::env::var("PATH").unwrap_or_default());
    }
}
