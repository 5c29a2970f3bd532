//! CSS custom property emission.

use indexmap::IndexMap;
use tincture_core::names::css_var;
use tincture_core::{Mode, PerMode};

use crate::values::ResolvedValues;

/// Default selector of the light block.
pub const DEFAULT_LIGHT_SELECTOR: &str = ":root";

/// Default selector of the dark block.
pub const DEFAULT_DARK_SELECTOR: &str = "[data-theme='dark']";

/// CSS emission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOptions {
    /// Prefix of every custom property (`--{prefix}-...`).
    pub prefix: String,
    pub light_selector: String,
    pub dark_selector: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: "ds".to_string(),
            light_selector: DEFAULT_LIGHT_SELECTOR.to_string(),
            dark_selector: DEFAULT_DARK_SELECTOR.to_string(),
        }
    }
}

impl CssOptions {
    pub fn selector(&self, mode: Mode) -> &str {
        match mode {
            Mode::Light => &self.light_selector,
            Mode::Dark => &self.dark_selector,
        }
    }
}

/// Custom property name to value, per mode.
pub type CssVariables = PerMode<IndexMap<String, String>>;

/// Map every resolved token to its custom property name.
pub fn css_variables(values: &ResolvedValues, prefix: &str) -> CssVariables {
    let rename = |map: &IndexMap<String, String>| {
        map.iter()
            .map(|(name, value)| (css_var(prefix, name), value.clone()))
            .collect()
    };
    PerMode::new(rename(&values.light), rename(&values.dark))
}

/// Emit both selector blocks for already named custom properties.
pub fn emit_css_blocks(vars: &CssVariables, light_selector: &str, dark_selector: &str) -> String {
    let mut out = String::new();
    for (i, mode) in Mode::ALL.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let selector = match mode {
            Mode::Light => light_selector,
            Mode::Dark => dark_selector,
        };
        out.push_str(&format!("{} {{\n", selector));
        for (var, value) in vars.get(*mode) {
            out.push_str(&format!("  {}: {};\n", var, value));
        }
        out.push_str("}\n");
    }
    out
}

/// Emit the CSS text for resolved token values.
pub fn emit_css(values: &ResolvedValues, options: &CssOptions) -> String {
    let vars = css_variables(values, &options.prefix);
    emit_css_blocks(
        &vars,
        options.selector(Mode::Light),
        options.selector(Mode::Dark),
    )
}
