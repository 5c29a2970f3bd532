//! External token naming.
//!
//! Flat keys keep the design tool's spelling (`Text-Colors.On Primary`).
//! Everything exposed to consumers (token names, CSS variables, preset
//! paths) uses a normalized spelling (`text-colors.on-primary`) that must
//! match [`NAME_PATTERN`].

use std::sync::OnceLock;

use convert_case::{Case, Casing};
use regex::Regex;

use crate::errors::{Result, TokenError};
use crate::types::FlatKey;

/// Allowed shape of an external token name.
pub const NAME_PATTERN: &str = r"^[a-z0-9-]+(\.[a-z0-9-]+)*$";

/// Allowed shape of a CSS variable prefix.
pub const PREFIX_PATTERN: &str = r"^[a-z][a-z0-9-]*$";

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("name pattern is valid"))
}

fn prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PREFIX_PATTERN).expect("prefix pattern is valid"))
}

/// Whether `name` is a legal external token name.
pub fn is_valid_name(name: &str) -> bool {
    name_regex().is_match(name)
}

/// Fail with [`TokenError::InvalidName`] unless `name` is legal.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(TokenError::InvalidName {
            name: name.to_string(),
            reason: format!("does not match {}", NAME_PATTERN),
        })
    }
}

/// Fail with [`TokenError::InvalidName`] unless `prefix` is a legal CSS
/// variable prefix.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix_regex().is_match(prefix) {
        Ok(())
    } else {
        Err(TokenError::InvalidName {
            name: prefix.to_string(),
            reason: format!("prefix does not match {}", PREFIX_PATTERN),
        })
    }
}

/// Derive the external token name of a flat key.
pub fn token_name(key: &FlatKey) -> Result<String> {
    let segments: Vec<String> = key.segments().map(normalize_segment).collect();
    let name = segments.join(".");
    if segments.iter().any(String::is_empty) {
        return Err(TokenError::InvalidName {
            name,
            reason: format!("'{}' has a segment with no usable characters", key),
        });
    }
    validate_name(&name)?;
    Ok(name)
}

fn normalize_segment(segment: &str) -> String {
    let kebab = segment.to_case(Case::Kebab);
    let mut out = String::with_capacity(kebab.len());
    for c in kebab.chars() {
        let c = match c {
            'a'..='z' | '0'..='9' => c,
            _ => '-',
        };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// The prefix-free part of a token's CSS custom property name.
///
/// Distinct token names can share a stem (`bg.primary` and `bg-primary`),
/// so tables check stems for uniqueness, not just names.
pub fn css_var_stem(name: &str) -> String {
    name.replace('.', "-")
}

/// The CSS custom property name of an external token name.
pub fn css_var(prefix: &str, name: &str) -> String {
    format!("--{}-{}", prefix, css_var_stem(name))
}

/// A `var(...)` reference to the CSS custom property of a token.
pub fn css_var_ref(prefix: &str, name: &str) -> String {
    format!("var({})", css_var(prefix, name))
}
