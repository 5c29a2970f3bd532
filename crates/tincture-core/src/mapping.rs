//! Mapping rule and mapping table types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::FlatKey;

/// The target of a mapping rule: one key, or an ordered list of fallbacks.
///
/// Deserializes from either a JSON string or a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingTarget {
    Single(String),
    Candidates(Vec<String>),
}

impl MappingTarget {
    /// The candidate keys in the order they should be tried.
    pub fn candidates(&self) -> &[String] {
        match self {
            MappingTarget::Single(key) => std::slice::from_ref(key),
            MappingTarget::Candidates(keys) => keys,
        }
    }
}

impl From<&str> for MappingTarget {
    fn from(key: &str) -> Self {
        MappingTarget::Single(key.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for MappingTarget {
    fn from(keys: [&str; N]) -> Self {
        MappingTarget::Candidates(keys.iter().map(|k| k.to_string()).collect())
    }
}

/// Maintainer-authored mapping rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingRules {
    /// Framework token name to design key(s).
    pub tokens: IndexMap<String, MappingTarget>,
    /// Component name to component token name to design key(s).
    pub components: IndexMap<String, IndexMap<String, MappingTarget>>,
}

impl MappingRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a global token rule.
    pub fn token(mut self, name: impl Into<String>, target: impl Into<MappingTarget>) -> Self {
        self.tokens.insert(name.into(), target.into());
        self
    }

    /// Add a component token rule.
    pub fn component_token(
        mut self,
        component: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<MappingTarget>,
    ) -> Self {
        self.components
            .entry(component.into())
            .or_default()
            .insert(name.into(), target.into());
        self
    }
}

/// A resolved mapping from a target name to exactly one flat key.
pub type MappingTable = IndexMap<String, FlatKey>;

/// A resolved mapping from component name to its mapping table.
pub type ComponentMappingTable = IndexMap<String, MappingTable>;

/// Every table derived for one theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSet {
    /// External token name to design key; drives the emitted artifacts.
    pub names: MappingTable,
    /// Framework token name to design key.
    pub tokens: MappingTable,
    /// Component name to component token name to design key.
    pub components: ComponentMappingTable,
}
