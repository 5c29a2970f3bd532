//! Error types for the Tincture token pipeline.

use crate::types::Mode;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Maximum number of sample keys carried by a [`TokenError::KeySkew`].
pub const SKEW_PREVIEW_LIMIT: usize = 10;

/// Errors raised while resolving, mapping, validating or emitting tokens.
///
/// Every variant is fatal at the point of detection: callers are expected to
/// surface it rather than substitute a default value.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token document matches neither the export shape nor the
    /// resolved `{light, dark}` shape.
    #[error("Malformed token document: {reason}")]
    MalformedInput { reason: String },

    /// A required section of a token export is missing.
    #[error("Missing section in token export: {section}")]
    MissingSection { section: String },

    /// A reference chain loops back on itself.
    #[error("Circular token reference: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// A reference points at a key absent from the lookup.
    #[error("Unresolved token reference {{{reference}}}{}", format_via(.chain))]
    UnresolvedReference {
        reference: String,
        chain: Vec<String>,
    },

    /// Light and dark themes do not share the same key set.
    #[error(
        "Light and dark key sets differ: {light_only_total} key(s) only in light {light_only:?}, \
         {dark_only_total} key(s) only in dark {dark_only:?}"
    )]
    KeySkew {
        light_only: Vec<String>,
        light_only_total: usize,
        dark_only: Vec<String>,
        dark_only_total: usize,
    },

    /// None of the candidate keys of a mapping rule exists in the theme.
    #[error("No candidate found for '{label}': tried {candidates:?}")]
    NoCandidate {
        label: String,
        candidates: Vec<String>,
    },

    /// A derived external name fails the allowed-character pattern.
    #[error("Invalid token name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A mapping table entry targets a key missing from one mode.
    #[error("Mapping '{label}' targets '{key}', which is missing from the {mode} theme")]
    DanglingMapping {
        label: String,
        key: String,
        mode: Mode,
    },

    /// A user-supplied pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// An override value cannot be written as a CSS declaration value.
    #[error("Invalid value for token '{name}' in {mode} theme: {reason}")]
    InvalidValue {
        name: String,
        mode: Mode,
        reason: String,
    },

    /// A single-token lookup named a token that is not mapped.
    #[error("Unknown token '{name}' in {mode} theme")]
    UnknownToken { name: String, mode: Mode },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TokenError {
    /// Build a [`TokenError::KeySkew`] from the full difference sets,
    /// keeping a bounded preview of each side.
    pub fn key_skew(light_only: Vec<String>, dark_only: Vec<String>) -> Self {
        let light_only_total = light_only.len();
        let dark_only_total = dark_only.len();
        TokenError::KeySkew {
            light_only: light_only.into_iter().take(SKEW_PREVIEW_LIMIT).collect(),
            light_only_total,
            dark_only: dark_only.into_iter().take(SKEW_PREVIEW_LIMIT).collect(),
            dark_only_total,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        TokenError::MalformedInput {
            reason: reason.into(),
        }
    }
}

fn format_via(chain: &[String]) -> String {
    if chain.is_empty() {
        String::new()
    } else {
        format!(" (via {})", chain.join(" -> "))
    }
}
