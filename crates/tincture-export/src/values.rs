//! Final value resolution.
//!
//! A token's value in a mode is its override for that mode when one is
//! given, otherwise the theme value of the key it maps to.

use indexmap::IndexMap;
use tincture_core::{MappingTable, Mode, PerMode, ResolvedTheme, Result, TokenError};

/// Per-mode override values keyed by external token name.
pub type ModeOverrides = PerMode<IndexMap<String, String>>;

/// Final values of every mapped token, per mode, in table order.
pub type ResolvedValues = PerMode<IndexMap<String, String>>;

/// Resolves the final value of a mapped token.
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    theme: &'a ResolvedTheme,
    overrides: Option<&'a ModeOverrides>,
}

impl<'a> ValueResolver<'a> {
    /// A resolver reading theme values only.
    pub fn new(theme: &'a ResolvedTheme) -> Self {
        Self {
            theme,
            overrides: None,
        }
    }

    /// A resolver that prefers `overrides` over theme values.
    pub fn with_overrides(theme: &'a ResolvedTheme, overrides: &'a ModeOverrides) -> Self {
        Self {
            theme,
            overrides: Some(overrides),
        }
    }

    /// Final value of token `name`, which maps to `key`.
    pub fn value(&self, mode: Mode, name: &str, key: &str) -> Result<String> {
        if let Some(value) = self.overrides.and_then(|o| o.get(mode).get(name)) {
            return Ok(value.clone());
        }
        self.theme
            .get(mode, key)
            .map(str::to_string)
            .ok_or_else(|| TokenError::DanglingMapping {
                label: format!("names.{}", name),
                key: key.to_string(),
                mode,
            })
    }

    /// Reject overrides naming tokens that `table` does not map, and
    /// values that would break out of a CSS declaration.
    fn check_overrides(&self, table: &MappingTable) -> Result<()> {
        let Some(overrides) = self.overrides else {
            return Ok(());
        };
        for mode in Mode::ALL {
            for (name, value) in overrides.get(mode) {
                if !table.contains_key(name) {
                    return Err(TokenError::UnknownToken {
                        name: name.clone(),
                        mode,
                    });
                }
                check_override_value(value).map_err(|reason| TokenError::InvalidValue {
                    name: name.clone(),
                    mode,
                    reason,
                })?;
            }
        }
        Ok(())
    }
}

/// Characters that end a CSS declaration or block.
const FORBIDDEN_VALUE_CHARS: [char; 5] = [';', '{', '}', '\n', '\r'];

fn check_override_value(value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        return Err("value is empty".to_string());
    }
    match value.chars().find(|c| FORBIDDEN_VALUE_CHARS.contains(c)) {
        Some(c) => Err(format!("value {:?} contains {:?}", value, c)),
        None => Ok(()),
    }
}

/// Resolve the final value of every entry of `table` in both modes.
pub fn resolve_all_mappings(resolver: &ValueResolver<'_>, table: &MappingTable) -> Result<ResolvedValues> {
    resolver.check_overrides(table)?;
    PerMode::try_build(|mode| {
        table
            .iter()
            .map(|(name, key)| Ok((name.clone(), resolver.value(mode, name, key.as_str())?)))
            .collect()
    })
}
