//! Token tree flattening.
//!
//! A token tree is a JSON object whose members are either leaves
//! (`{ "value": "...", "type": "..." }`) or nested groups.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tincture_core::{FlatKey, FlatLookup, Result, TokenError};

/// Which leaves a flattening pass keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Keep every leaf regardless of its declared type.
    #[default]
    Any,
    /// Keep only leaves whose `type` equals the given string.
    Only(String),
}

impl TypeFilter {
    pub fn only(ty: impl Into<String>) -> Self {
        TypeFilter::Only(ty.into())
    }

    fn accepts(&self, leaf_type: Option<&str>) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Only(ty) => leaf_type == Some(ty.as_str()),
        }
    }
}

/// A leaf of the token tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLeaf<'a> {
    pub value: &'a str,
    pub ty: Option<&'a str>,
}

impl<'a> TokenLeaf<'a> {
    /// A node is a leaf iff it is an object carrying a string `value`.
    pub fn from_node(node: &'a Value) -> Option<Self> {
        let object = node.as_object()?;
        let value = object.get("value")?.as_str()?;
        let ty = object.get("type").and_then(Value::as_str);
        Some(TokenLeaf { value, ty })
    }
}

/// Flatten `tree` into a lookup, prefixing every key with `prefix`.
///
/// Two source paths that produce the same flat key (a nested `Bg` >
/// `Primary` next to a leaf named `Bg.Primary`) are a
/// [`TokenError::MalformedInput`] naming both paths.
pub fn flatten(tree: &Map<String, Value>, prefix: &[&str], filter: &TypeFilter) -> Result<FlatLookup> {
    let mut out = FlatLookup::new();
    let mut sources = HashMap::new();
    let mut path: Vec<&str> = prefix.to_vec();
    walk(tree, &mut path, filter, &mut out, &mut sources)?;
    Ok(out)
}

fn walk<'a>(
    tree: &'a Map<String, Value>,
    path: &mut Vec<&'a str>,
    filter: &TypeFilter,
    out: &mut FlatLookup,
    sources: &mut HashMap<FlatKey, String>,
) -> Result<()> {
    for (name, node) in tree {
        path.push(name.as_str());
        if let Some(leaf) = TokenLeaf::from_node(node) {
            if filter.accepts(leaf.ty) {
                let key = FlatKey::from_segments(path.as_slice());
                let source = path.join(" > ");
                if let Some(previous) = sources.get(&key) {
                    return Err(TokenError::malformed(format!(
                        "token paths '{}' and '{}' both flatten to '{}'",
                        previous, source, key
                    )));
                }
                out.insert(key.clone(), leaf.value.to_string());
                sources.insert(key, source);
            }
        } else if let Some(group) = node.as_object() {
            walk(group, path, filter, out, sources)?;
        }
        path.pop();
    }
    Ok(())
}
