//! Candidate selection.
//!
//! Every mapping entry goes through [`pick`], so fallback behavior is the
//! same for global tokens, component tokens and anything added later.

use tincture_core::{FlatKey, MappingTarget, ResolvedTheme, Result, TokenError};
use tracing::warn;

/// A set of keys candidates are checked against.
pub trait KeySource {
    fn has_key(&self, key: &str) -> bool;
}

/// A theme offers a key only when both modes define it.
impl KeySource for ResolvedTheme {
    fn has_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Return the first candidate of `target` present in `available`.
pub fn pick<S: KeySource + ?Sized>(
    available: &S,
    target: &MappingTarget,
    label: &str,
) -> Result<FlatKey> {
    let candidates = target.candidates();
    let position = candidates.iter().position(|key| available.has_key(key));

    match position {
        Some(index) => {
            let chosen = &candidates[index];
            if index > 0 {
                warn!(
                    label,
                    chosen = %chosen,
                    skipped = ?&candidates[..index],
                    "mapping fell back to a later candidate"
                );
            }
            Ok(FlatKey::from(chosen.as_str()))
        }
        None => Err(TokenError::NoCandidate {
            label: label.to_string(),
            candidates: candidates.to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tincture_core::ThemeMap;

    fn keys<S: AsRef<str>>(names: &[S]) -> ResolvedTheme {
        let map: ThemeMap = names
            .iter()
            .map(|n| (FlatKey::from(n.as_ref()), "#fff".to_string()))
            .collect();
        ResolvedTheme::new(map.clone(), map).unwrap()
    }

    #[test]
    fn test_single_key_present() {
        let available = keys(&["Brand.Primary"]);
        let target = MappingTarget::from("Brand.Primary");
        assert_eq!(
            pick(&available, &target, "colorPrimary").unwrap().as_str(),
            "Brand.Primary"
        );
    }

    #[test]
    fn test_falls_back_to_old_key() {
        let available = keys(&["old-key"]);
        let target = MappingTarget::from(["new-key", "old-key"]);
        assert_eq!(
            pick(&available, &target, "colorPrimary").unwrap().as_str(),
            "old-key"
        );
    }

    #[test]
    fn test_prefers_first_present_candidate() {
        let available = keys(&["old-key", "new-key"]);
        let target = MappingTarget::from(["new-key", "old-key"]);
        assert_eq!(pick(&available, &target, "x").unwrap().as_str(), "new-key");
    }

    #[test]
    fn test_no_candidate_names_label_and_list() {
        let available = keys(&["something-else"]);
        let target = MappingTarget::from(["new-key", "old-key"]);
        match pick(&available, &target, "components.Button.colorBg") {
            Err(TokenError::NoCandidate { label, candidates }) => {
                assert_eq!(label, "components.Button.colorBg");
                assert_eq!(candidates, vec!["new-key", "old-key"]);
            }
            other => panic!("Expected no candidate, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_candidate_list_fails() {
        let available = keys(&["a"]);
        let target = MappingTarget::Candidates(vec![]);
        assert!(matches!(
            pick(&available, &target, "empty"),
            Err(TokenError::NoCandidate { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_pick_returns_first_member(
            universe in prop::collection::vec("[a-e]", 0..5),
            candidates in prop::collection::vec("[a-e]", 0..5),
        ) {
            let available = keys(universe.as_slice());
            let target = MappingTarget::Candidates(candidates.clone());
            let expected = candidates.iter().find(|c| available.contains(c.as_str()));

            match (pick(&available, &target, "prop"), expected) {
                (Ok(key), Some(first)) => prop_assert_eq!(key.as_str(), first.as_str()),
                (Err(TokenError::NoCandidate { .. }), None) => {}
                (other, expected) => prop_assert!(false, "got {:?}, expected {:?}", other, expected),
            }
        }
    }
}
