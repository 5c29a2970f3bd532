//! Artifact emitters for resolved design tokens.
//!
//! Supported artifacts:
//! - CSS custom properties (one selector block per mode)
//! - SCSS and LESS aliases of the custom properties
//! - Nested color preset for utility-CSS theme extensions
//!
//! Emitters are pure string/object builders; writing files is the caller's
//! job.

pub mod alias;
pub mod css;
pub mod preset;
pub mod values;

pub use alias::{emit_aliases, emit_less, emit_scss, AliasDialect};
pub use css::{
    css_variables, emit_css, emit_css_blocks, CssOptions, CssVariables, DEFAULT_DARK_SELECTOR,
    DEFAULT_LIGHT_SELECTOR,
};
pub use preset::{color_preset, preset_json, ColorPreset, PresetNode};
pub use values::{resolve_all_mappings, ModeOverrides, ResolvedValues, ValueResolver};

use tincture_core::MappingTable;

/// Names of a token-name table, in table order.
pub fn table_names(table: &MappingTable) -> impl Iterator<Item = &str> {
    table.keys().map(String::as_str)
}
