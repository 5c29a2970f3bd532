//! Mapping table construction.

use indexmap::IndexMap;
use tincture_core::names::{css_var_stem, token_name};
use tincture_core::{
    ComponentMappingTable, FlatKey, MappingRules, MappingSet, MappingTable, MappingTarget,
    ResolvedTheme, Result, TokenError,
};
use tracing::debug;

use crate::pick::pick;

/// Derive the external-name table: one entry per theme key, named by
/// [`token_name`]. Two keys normalizing to the same name, or to names with
/// the same CSS custom property, are rejected.
pub fn token_names(theme: &ResolvedTheme) -> Result<MappingTable> {
    let mut table = MappingTable::new();
    let mut stems: IndexMap<String, FlatKey> = IndexMap::new();
    for key in theme.keys() {
        let name = token_name(key)?;
        if let Some(existing) = table.get(&name) {
            return Err(TokenError::InvalidName {
                reason: format!("both '{}' and '{}' normalize to it", existing, key),
                name,
            });
        }
        let stem = css_var_stem(&name);
        if let Some(existing) = stems.get(&stem) {
            return Err(TokenError::InvalidName {
                reason: format!(
                    "'{}' and '{}' map to the same CSS variable stem '{}'",
                    existing, key, stem
                ),
                name,
            });
        }
        stems.insert(stem, key.clone());
        table.insert(name, key.clone());
    }
    Ok(table)
}

/// Resolve the global framework-token rules against a theme.
pub fn build_tokens(
    theme: &ResolvedTheme,
    rules: &IndexMap<String, MappingTarget>,
) -> Result<MappingTable> {
    build_table(theme, rules, "tokens")
}

/// Resolve the per-component rules against a theme.
pub fn build_components(
    theme: &ResolvedTheme,
    rules: &IndexMap<String, IndexMap<String, MappingTarget>>,
) -> Result<ComponentMappingTable> {
    rules
        .iter()
        .map(|(component, component_rules)| {
            let scope = format!("components.{}", component);
            Ok((component.clone(), build_table(theme, component_rules, &scope)?))
        })
        .collect()
}

fn build_table(
    theme: &ResolvedTheme,
    rules: &IndexMap<String, MappingTarget>,
    scope: &str,
) -> Result<MappingTable> {
    rules
        .iter()
        .map(|(name, target)| {
            let label = format!("{}.{}", scope, name);
            let key: FlatKey = pick(theme, target, &label)?;
            Ok((name.clone(), key))
        })
        .collect()
}

/// Build every mapping table for `theme`.
pub fn build_mapping_set(theme: &ResolvedTheme, rules: &MappingRules) -> Result<MappingSet> {
    let set = MappingSet {
        names: token_names(theme)?,
        tokens: build_tokens(theme, &rules.tokens)?,
        components: build_components(theme, &rules.components)?,
    };
    debug!(
        names = set.names.len(),
        tokens = set.tokens.len(),
        components = set.components.len(),
        "built mapping tables"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_core::ThemeMap;

    fn theme(keys: &[&str]) -> ResolvedTheme {
        let light: ThemeMap = keys.iter().map(|k| (FlatKey::from(*k), "#fff".to_string())).collect();
        let dark: ThemeMap = keys.iter().map(|k| (FlatKey::from(*k), "#000".to_string())).collect();
        ResolvedTheme::new(light, dark).unwrap()
    }

    #[test]
    fn test_token_names_follow_theme_order() {
        let t = theme(&["Surface.Bg", "Text Colors.Primary", "Bg"]);
        let names = token_names(&t).unwrap();
        let entries: Vec<(&str, &str)> = names.iter().map(|(n, k)| (n.as_str(), k.as_str())).collect();
        assert_eq!(
            entries,
            vec![
                ("surface.bg", "Surface.Bg"),
                ("text-colors.primary", "Text Colors.Primary"),
                ("bg", "Bg"),
            ]
        );
    }

    #[test]
    fn test_token_names_reject_collisions() {
        let t = theme(&["Surface.Bg", "surface.bg"]);
        match token_names(&t) {
            Err(TokenError::InvalidName { name, reason }) => {
                assert_eq!(name, "surface.bg");
                assert!(reason.contains("Surface.Bg"));
            }
            other => panic!("Expected invalid name, got {:?}", other),
        }
    }

    #[test]
    fn test_token_names_reject_css_variable_collisions() {
        let t = theme(&["Bg Primary", "Bg.Primary"]);
        match token_names(&t) {
            Err(TokenError::InvalidName { name, reason }) => {
                assert_eq!(name, "bg.primary");
                assert!(reason.contains("'Bg Primary'"));
                assert!(reason.contains("'Bg.Primary'"));
                assert!(reason.contains("bg-primary"));
            }
            other => panic!("Expected invalid name, got {:?}", other),
        }
    }

    #[test]
    fn test_build_mapping_set() {
        let t = theme(&["Brand.Primary", "Surface.Bg", "Text.Primary"]);
        let rules = MappingRules::new()
            .token("colorPrimary", ["Brand.Primary New", "Brand.Primary"])
            .token("colorText", "Text.Primary")
            .component_token("Button", "colorBg", "Surface.Bg");

        let set = build_mapping_set(&t, &rules).unwrap();
        assert_eq!(set.names.len(), 3);
        assert_eq!(set.tokens["colorPrimary"].as_str(), "Brand.Primary");
        assert_eq!(set.tokens["colorText"].as_str(), "Text.Primary");
        assert_eq!(set.components["Button"]["colorBg"].as_str(), "Surface.Bg");
    }

    #[test]
    fn test_component_labels_are_scoped() {
        let t = theme(&["Surface.Bg"]);
        let rules = MappingRules::new().component_token("Card", "colorBorder", "Border.Default");

        match build_mapping_set(&t, &rules) {
            Err(TokenError::NoCandidate { label, .. }) => {
                assert_eq!(label, "components.Card.colorBorder")
            }
            other => panic!("Expected no candidate, got {:?}", other),
        }
    }
}
