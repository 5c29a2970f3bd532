//! Mapping table construction, integrity validation and coverage checks.
//!
//! Mapping rules are authored by maintainers as ordered candidate lists so
//! that a renamed design key can be absorbed without touching consumers.
//! Every rule is resolved through [`pick`]; the resulting tables are then
//! checked against the theme by [`validate`].

mod builder;
mod coverage;
mod pick;
mod validate;

pub use builder::{build_components, build_mapping_set, build_tokens, token_names};
pub use coverage::{coverage, CoverageIgnore, CoverageReport};
pub use pick::{pick, KeySource};
pub use validate::validate;
