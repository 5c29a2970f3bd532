//! Reference resolution.
//!
//! Expands `{path.to.token}` values against a flat lookup until a literal
//! is reached.

use std::sync::OnceLock;

use regex::Regex;
use tincture_core::{FlatKey, FlatLookup, Result, TokenError};

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\{([^{}]+)\}$").expect("reference pattern is valid"))
}

/// Return the referenced key if `value` is a whole-string `{path}` reference.
pub fn reference_target(value: &str) -> Option<FlatKey> {
    reference_regex()
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| FlatKey::from_reference(m.as_str()))
}

/// Resolve a single value against `lookup`.
pub fn resolve(value: &str, lookup: &FlatLookup) -> Result<String> {
    resolve_with(value, lookup, &[])
}

/// Resolve a single value with an initial chain of keys already being
/// visited; any of them reappearing is a cycle.
pub fn resolve_with(value: &str, lookup: &FlatLookup, visiting: &[FlatKey]) -> Result<String> {
    let mut resolver = ReferenceResolver::new(lookup);
    resolver.resolution_stack.extend(visiting.iter().cloned());
    resolver.resolve_value(value)
}

/// Resolve every entry of `lookup` against the lookup itself.
pub fn resolve_all(lookup: &FlatLookup) -> Result<FlatLookup> {
    lookup
        .iter()
        .map(|(key, value)| {
            let resolved = resolve_with(value, lookup, std::slice::from_ref(key))?;
            Ok((key.clone(), resolved))
        })
        .collect()
}

struct ReferenceResolver<'a> {
    lookup: &'a FlatLookup,
    /// Keys on the current reference chain, for cycle detection.
    resolution_stack: Vec<FlatKey>,
}

impl<'a> ReferenceResolver<'a> {
    fn new(lookup: &'a FlatLookup) -> Self {
        Self {
            lookup,
            resolution_stack: Vec::new(),
        }
    }

    fn resolve_value(&mut self, value: &str) -> Result<String> {
        let target = match reference_target(value) {
            Some(target) => target,
            None => return Ok(value.to_string()),
        };

        if self.resolution_stack.contains(&target) {
            let mut chain: Vec<String> = self.resolution_stack.iter().map(|k| k.to_string()).collect();
            chain.push(target.to_string());
            return Err(TokenError::Cycle { chain });
        }

        let next = self
            .lookup
            .get(&target)
            .ok_or_else(|| TokenError::UnresolvedReference {
                reference: target.to_string(),
                chain: self.resolution_stack.iter().map(|k| k.to_string()).collect(),
            })?;

        self.resolution_stack.push(target);
        let resolved = self.resolve_value(next);
        self.resolution_stack.pop();
        resolved
    }
}
