//! Theme factory output types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tincture_core::{FlatKey, MappingSet, Mode, PerMode, ResolvedTheme, Result, TokenError};
use tincture_export::{ModeOverrides, ResolvedValues};

/// Input of [`DesignSystem::create_theme`](crate::DesignSystem::create_theme).
#[derive(Debug, Clone, Default)]
pub struct ThemeOptions {
    /// Theme to use instead of the system's own; re-validated against the
    /// mapping rules before use.
    pub base_theme: Option<ResolvedTheme>,
    /// Per-mode override values keyed by external token name.
    pub overrides: ModeOverrides,
}

impl ThemeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_theme(mut self, theme: ResolvedTheme) -> Self {
        self.base_theme = Some(theme);
        self
    }

    /// Override one token in one mode.
    pub fn override_token(mut self, mode: Mode, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.get_mut(mode).insert(name.into(), value.into());
        self
    }
}

/// Theme data handed to a consuming framework: global tokens plus
/// per-component tokens, all with final values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkThemeConfig {
    pub token: IndexMap<String, String>,
    pub components: IndexMap<String, IndexMap<String, String>>,
}

/// Everything derived for one mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeTheme {
    /// External token name to final value.
    pub resolved_tokens: IndexMap<String, String>,
    /// CSS custom property name to final value.
    pub css_variable_map: IndexMap<String, String>,
    pub framework_theme_config: FrameworkThemeConfig,
}

/// Output of the theme factory, one [`ModeTheme`] per mode.
pub type ThemeBundle = PerMode<ModeTheme>;

/// Build the framework config of one mode.
///
/// A framework token's value is the final value of the external token its
/// design key is exposed as, so overrides apply to framework tokens too.
pub(crate) fn framework_config(
    mappings: &MappingSet,
    mode: Mode,
    resolved: &IndexMap<String, String>,
    key_names: &IndexMap<FlatKey, String>,
) -> Result<FrameworkThemeConfig> {
    let lookup = |label: String, key: &FlatKey| -> Result<String> {
        key_names
            .get(key)
            .and_then(|name| resolved.get(name))
            .cloned()
            .ok_or_else(|| TokenError::DanglingMapping {
                label,
                key: key.to_string(),
                mode,
            })
    };

    let token = mappings
        .tokens
        .iter()
        .map(|(name, key)| Ok((name.clone(), lookup(format!("tokens.{}", name), key)?)))
        .collect::<Result<IndexMap<_, _>>>()?;

    let components = mappings
        .components
        .iter()
        .map(|(component, table)| {
            let tokens = table
                .iter()
                .map(|(name, key)| {
                    let label = format!("components.{}.{}", component, name);
                    Ok((name.clone(), lookup(label, key)?))
                })
                .collect::<Result<IndexMap<_, _>>>()?;
            Ok((component.clone(), tokens))
        })
        .collect::<Result<IndexMap<_, _>>>()?;

    Ok(FrameworkThemeConfig { token, components })
}

/// Assemble a bundle from resolved values.
pub(crate) fn assemble(mappings: &MappingSet, values: ResolvedValues, prefix: &str) -> Result<ThemeBundle> {
    let key_names: IndexMap<FlatKey, String> = mappings
        .names
        .iter()
        .map(|(name, key)| (key.clone(), name.clone()))
        .collect();
    let css = tincture_export::css_variables(&values, prefix);

    let build = |mode: Mode,
                 resolved: IndexMap<String, String>,
                 css_variable_map: IndexMap<String, String>|
     -> Result<ModeTheme> {
        let framework_theme_config = framework_config(mappings, mode, &resolved, &key_names)?;
        Ok(ModeTheme {
            resolved_tokens: resolved,
            css_variable_map,
            framework_theme_config,
        })
    };

    Ok(PerMode::new(
        build(Mode::Light, values.light, css.light)?,
        build(Mode::Dark, values.dark, css.dark)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_core::MappingTable;

    fn mappings() -> MappingSet {
        let names: MappingTable = [
            ("bg".to_string(), FlatKey::from("Bg")),
            ("brand".to_string(), FlatKey::from("Brand")),
        ]
        .into_iter()
        .collect();
        let tokens: MappingTable = [("colorPrimary".to_string(), FlatKey::from("Brand"))]
            .into_iter()
            .collect();
        let mut components = tincture_core::ComponentMappingTable::new();
        components.insert(
            "Layout".to_string(),
            [("bodyBg".to_string(), FlatKey::from("Bg"))].into_iter().collect(),
        );
        MappingSet {
            names,
            tokens,
            components,
        }
    }

    fn values() -> ResolvedValues {
        let mut values = ResolvedValues::default();
        for (name, light, dark) in [("bg", "#fff", "#000"), ("brand", "#1677ff", "#4096ff")] {
            values.light.insert(name.into(), light.into());
            values.dark.insert(name.into(), dark.into());
        }
        values
    }

    #[test]
    fn test_assemble_fills_every_mode() {
        let bundle = assemble(&mappings(), values(), "ds").unwrap();

        assert_eq!(bundle.light.css_variable_map["--ds-brand"], "#1677ff");
        assert_eq!(bundle.dark.framework_theme_config.token["colorPrimary"], "#4096ff");
        assert_eq!(
            bundle.dark.framework_theme_config.components["Layout"]["bodyBg"],
            "#000"
        );
    }

    #[test]
    fn test_framework_key_without_name_is_dangling() {
        let mut set = mappings();
        set.tokens.insert("colorLink".into(), FlatKey::from("Link"));

        match assemble(&set, values(), "ds") {
            Err(TokenError::DanglingMapping { label, mode, .. }) => {
                assert_eq!(label, "tokens.colorLink");
                assert_eq!(mode, Mode::Light);
            }
            other => panic!("Expected dangling mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_theme_serializes_camel_case() {
        let bundle = assemble(&mappings(), values(), "ds").unwrap();
        let json = serde_json::to_value(&bundle.light).unwrap();

        assert!(json.get("resolvedTokens").is_some());
        assert!(json.get("cssVariableMap").is_some());
        assert_eq!(json["frameworkThemeConfig"]["token"]["colorPrimary"], "#1677ff");
    }
}
