//! Core value types for the token pipeline.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TokenError};

/// A dotted path uniquely identifying a token in the original export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatKey(String);

impl FlatKey {
    /// Build a key from raw path segments.
    ///
    /// Every segment but the last has whitespace runs collapsed to a single
    /// dash; the last keeps a single space so leaf names stay readable.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let last = segments.len().saturating_sub(1);
        let parts: Vec<String> = segments
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let sep = if i == last { " " } else { "-" };
                collapse_whitespace(s.as_ref(), sep)
            })
            .collect();
        FlatKey(parts.join("."))
    }

    /// Build a key from the body of a `{path}` reference.
    pub fn from_reference(path: &str) -> Self {
        let segments: Vec<&str> = path.split('.').collect();
        Self::from_segments(segments.as_slice())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-separated segments of this key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

fn collapse_whitespace(segment: &str, sep: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(sep)
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FlatKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FlatKey {
    fn from(s: &str) -> Self {
        FlatKey(s.to_string())
    }
}

impl From<String> for FlatKey {
    fn from(s: String) -> Self {
        FlatKey(s)
    }
}

/// A flat lookup from key to raw leaf value (references not yet expanded).
pub type FlatLookup = IndexMap<FlatKey, String>;

/// Resolved values of one mode, keyed by flat key.
pub type ThemeMap = IndexMap<FlatKey, String>;

/// One of the two supported theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair of values, one per mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerMode<T> {
    #[serde(default)]
    pub light: T,
    #[serde(default)]
    pub dark: T,
}

impl<T> PerMode<T> {
    pub fn new(light: T, dark: T) -> Self {
        Self { light, dark }
    }

    pub fn get(&self, mode: Mode) -> &T {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut T {
        match mode {
            Mode::Light => &mut self.light,
            Mode::Dark => &mut self.dark,
        }
    }

    /// Build both sides with a fallible function of the mode.
    pub fn try_build<F>(mut f: F) -> Result<Self>
    where
        F: FnMut(Mode) -> Result<T>,
    {
        Ok(Self {
            light: f(Mode::Light)?,
            dark: f(Mode::Dark)?,
        })
    }
}

/// A fully resolved `{light, dark}` theme.
///
/// Both modes always share exactly the same key set; the constructor
/// rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTheme {
    light: ThemeMap,
    dark: ThemeMap,
}

impl ResolvedTheme {
    /// Create a theme, checking that both modes have the same keys.
    pub fn new(light: ThemeMap, dark: ThemeMap) -> Result<Self> {
        ensure_same_keys(&light, &dark)?;
        Ok(Self { light, dark })
    }

    pub fn light(&self) -> &ThemeMap {
        &self.light
    }

    pub fn dark(&self) -> &ThemeMap {
        &self.dark
    }

    pub fn mode(&self, mode: Mode) -> &ThemeMap {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    /// Look up a resolved value.
    pub fn get(&self, mode: Mode, key: &str) -> Option<&str> {
        self.mode(mode).get(key).map(String::as_str)
    }

    /// Keys of the theme, in light-mode order.
    pub fn keys(&self) -> impl Iterator<Item = &FlatKey> {
        self.light.keys()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.light.contains_key(key) && self.dark.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.light.len()
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty()
    }
}

/// Check that two mode maps share exactly the same key set.
pub fn ensure_same_keys(light: &ThemeMap, dark: &ThemeMap) -> Result<()> {
    let light_only: Vec<String> = light
        .keys()
        .filter(|k| !dark.contains_key(k.as_str()))
        .map(|k| k.to_string())
        .collect();
    let dark_only: Vec<String> = dark
        .keys()
        .filter(|k| !light.contains_key(k.as_str()))
        .map(|k| k.to_string())
        .collect();

    if light_only.is_empty() && dark_only.is_empty() {
        Ok(())
    } else {
        Err(TokenError::key_skew(light_only, dark_only))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> ThemeMap {
        pairs
            .iter()
            .map(|(k, v)| (FlatKey::from(*k), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_segments_collapses_whitespace() {
        let key = FlatKey::from_segments(&["Brand  Colors", " Blue ", "Primary   Hover"]);
        assert_eq!(key.as_str(), "Brand-Colors.Blue.Primary Hover");
    }

    #[test]
    fn test_from_reference_matches_flattened_key() {
        let flattened = FlatKey::from_segments(&["Brand Colors", "Blue 500"]);
        let referenced = FlatKey::from_reference("Brand Colors.Blue 500");
        assert_eq!(flattened, referenced);
    }

    #[test]
    fn test_resolved_theme_accepts_equal_keys() {
        let theme = ResolvedTheme::new(
            map(&[("Bg", "#ffffff"), ("Fg", "#000000")]),
            map(&[("Fg", "#ffffff"), ("Bg", "#000000")]),
        )
        .unwrap();

        assert_eq!(theme.len(), 2);
        assert_eq!(theme.get(Mode::Light, "Bg"), Some("#ffffff"));
        assert_eq!(theme.get(Mode::Dark, "Bg"), Some("#000000"));
        assert!(theme.contains("Fg"));
        assert!(!theme.contains("Missing"));
    }

    #[test]
    fn test_resolved_theme_rejects_skew() {
        let result = ResolvedTheme::new(map(&[("A", "1"), ("B", "2")]), map(&[("B", "2")]));

        match result {
            Err(TokenError::KeySkew { light_only, dark_only, .. }) => {
                assert_eq!(light_only, vec!["A".to_string()]);
                assert!(dark_only.is_empty());
            }
            other => panic!("Expected key skew, got {:?}", other),
        }
    }

    #[test]
    fn test_theme_serializes_as_light_dark_object() {
        let theme = ResolvedTheme::new(map(&[("Bg", "#fff")]), map(&[("Bg", "#000")])).unwrap();
        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["light"]["Bg"], "#fff");
        assert_eq!(json["dark"]["Bg"], "#000");
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Light.to_string(), "light");
        assert_eq!(Mode::Dark.to_string(), "dark");
    }
}
