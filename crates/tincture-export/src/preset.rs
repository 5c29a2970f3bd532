//! Nested color preset for utility-CSS theme extensions.
//!
//! `bg.primary` becomes `{ "bg": { "primary": "var(--ds-bg-primary)" } }`.
//! A name that is both a leaf and a parent keeps its own value under
//! `DEFAULT`.

use indexmap::IndexMap;
use serde::Serialize;
use tincture_core::names::css_var_ref;

/// Key holding a group's own value.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// A node of the color preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PresetNode {
    Leaf(String),
    Group(IndexMap<String, PresetNode>),
}

/// The top level of a color preset.
pub type ColorPreset = IndexMap<String, PresetNode>;

/// Build the nested preset for a list of external token names.
pub fn color_preset<'a, I>(names: I, prefix: &str) -> ColorPreset
where
    I: IntoIterator<Item = &'a str>,
{
    let mut root = ColorPreset::new();
    for name in names {
        let segments: Vec<&str> = name.split('.').collect();
        insert(&mut root, &segments, css_var_ref(prefix, name));
    }
    root
}

fn insert(group: &mut IndexMap<String, PresetNode>, segments: &[&str], value: String) {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        match group.get_mut(*head) {
            Some(PresetNode::Group(children)) => {
                children.insert(DEFAULT_KEY.to_string(), PresetNode::Leaf(value));
            }
            _ => {
                group.insert(head.to_string(), PresetNode::Leaf(value));
            }
        }
        return;
    }

    let node = group
        .entry(head.to_string())
        .or_insert_with(|| PresetNode::Group(IndexMap::new()));
    if let PresetNode::Leaf(existing) = node {
        let mut children = IndexMap::new();
        children.insert(DEFAULT_KEY.to_string(), PresetNode::Leaf(std::mem::take(existing)));
        *node = PresetNode::Group(children);
    }
    if let PresetNode::Group(children) = node {
        insert(children, rest, value);
    }
}

/// Render a preset as a JSON value.
pub fn preset_json(preset: &ColorPreset) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(preset)
}
