//! Integrity validation.
//!
//! Cross-checks a theme against its mapping tables. Validation stops at the
//! first violation and reports the table label and key involved.

use std::collections::HashMap;

use tincture_core::names::{css_var_stem, validate_name};
use tincture_core::{FlatKey, MappingSet, Mode, ResolvedTheme, Result, TokenError};

/// Validate every table of `set` against `theme`.
pub fn validate(theme: &ResolvedTheme, set: &MappingSet) -> Result<()> {
    let mut stems: HashMap<String, &str> = HashMap::new();
    for (name, key) in &set.names {
        validate_name(name)?;
        if let Some(other) = stems.insert(css_var_stem(name), name.as_str()) {
            return Err(TokenError::InvalidName {
                name: name.clone(),
                reason: format!("shares its CSS variable with '{}'", other),
            });
        }
        check_target(theme, &format!("names.{}", name), key)?;
    }

    for (name, key) in &set.tokens {
        check_target(theme, &format!("tokens.{}", name), key)?;
    }

    for (component, table) in &set.components {
        for (name, key) in table {
            check_target(theme, &format!("components.{}.{}", component, name), key)?;
        }
    }

    Ok(())
}

fn check_target(theme: &ResolvedTheme, label: &str, key: &FlatKey) -> Result<()> {
    for mode in Mode::ALL {
        if !theme.mode(mode).contains_key(key) {
            return Err(TokenError::DanglingMapping {
                label: label.to_string(),
                key: key.to_string(),
                mode,
            });
        }
    }
    Ok(())
}
