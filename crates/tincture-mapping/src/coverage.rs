//! Coverage check.
//!
//! Reports theme keys that no framework or component mapping uses. Keys a
//! maintainer deliberately leaves unmapped are listed as ignore patterns.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;
use tincture_core::{FlatKey, MappingSet, ResolvedTheme, Result, TokenError};

/// Patterns of keys that are expected to stay unmapped.
#[derive(Debug, Clone, Default)]
pub struct CoverageIgnore {
    patterns: Vec<Regex>,
}

impl CoverageIgnore {
    /// Compile a list of regular expressions.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| TokenError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn matches(&self, key: &FlatKey) -> bool {
        self.patterns.iter().any(|p| p.is_match(key.as_str()))
    }
}

/// Result of a coverage check.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Number of keys in the theme.
    pub total: usize,
    /// Keys targeted by at least one mapping.
    pub mapped: Vec<FlatKey>,
    /// Unmapped keys matching an ignore pattern.
    pub ignored: Vec<FlatKey>,
    /// Unmapped keys nobody accounted for.
    pub unexpected: Vec<FlatKey>,
}

impl CoverageReport {
    /// True when every key is either mapped or ignored.
    pub fn is_clean(&self) -> bool {
        self.unexpected.is_empty()
    }

    /// Share of keys that are mapped, in percent.
    pub fn mapped_percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.mapped.len() as f64 * 100.0 / self.total as f64
        }
    }
}

/// Classify every theme key as mapped, ignored or unexpected.
pub fn coverage(theme: &ResolvedTheme, set: &MappingSet, ignore: &CoverageIgnore) -> CoverageReport {
    let used: HashSet<&FlatKey> = set
        .tokens
        .values()
        .chain(set.components.values().flat_map(|table| table.values()))
        .collect();

    let mut report = CoverageReport {
        total: theme.len(),
        ..Default::default()
    };

    for key in theme.keys() {
        if used.contains(key) {
            report.mapped.push(key.clone());
        } else if ignore.matches(key) {
            report.ignored.push(key.clone());
        } else {
            report.unexpected.push(key.clone());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_core::{MappingTable, ThemeMap};

    fn theme(keys: &[&str]) -> ResolvedTheme {
        let map: ThemeMap = keys.iter().map(|k| (FlatKey::from(*k), "#fff".to_string())).collect();
        ResolvedTheme::new(map.clone(), map).unwrap()
    }

    fn table(pairs: &[(&str, &str)]) -> MappingTable {
        pairs
            .iter()
            .map(|(n, k)| (n.to_string(), FlatKey::from(*k)))
            .collect()
    }

    #[test]
    fn test_classifies_keys() {
        let t = theme(&["Bg", "Fg", "Chart.1", "Legacy"]);
        let mut set = MappingSet {
            tokens: table(&[("colorBgBase", "Bg")]),
            ..Default::default()
        };
        set.components.insert("Button".into(), table(&[("colorText", "Fg")]));

        let ignore = CoverageIgnore::new(&[r"^Chart\."]).unwrap();
        let report = coverage(&t, &set, &ignore);

        assert_eq!(report.total, 4);
        assert_eq!(report.mapped, vec![FlatKey::from("Bg"), FlatKey::from("Fg")]);
        assert_eq!(report.ignored, vec![FlatKey::from("Chart.1")]);
        assert_eq!(report.unexpected, vec![FlatKey::from("Legacy")]);
        assert!(!report.is_clean());
        assert!((report.mapped_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_name_table_does_not_count_as_coverage() {
        let t = theme(&["Bg"]);
        let set = MappingSet {
            names: table(&[("bg", "Bg")]),
            ..Default::default()
        };
        let report = coverage(&t, &set, &CoverageIgnore::default());
        assert_eq!(report.unexpected, vec![FlatKey::from("Bg")]);
    }

    #[test]
    fn test_clean_report() {
        let t = theme(&["Bg"]);
        let set = MappingSet {
            tokens: table(&[("colorBgBase", "Bg")]),
            ..Default::default()
        };
        assert!(coverage(&t, &set, &CoverageIgnore::default()).is_clean());
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        assert!(matches!(
            CoverageIgnore::new(&["(unclosed"]),
            Err(TokenError::InvalidPattern { .. })
        ));
    }
}
