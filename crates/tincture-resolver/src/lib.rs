//! Reference resolution, tree flattening and theme normalization.
//!
//! This crate turns a design-tool token export into a [`ResolvedTheme`]:
//! - Tree flattening (nested groups -> dotted flat keys)
//! - Reference resolution (`{Grey.18}` -> `#ffffff`)
//! - Normalization of either document shape into `{light, dark}`

mod flatten;
mod normalize;
mod references;

pub use flatten::{flatten, TokenLeaf, TypeFilter};
pub use normalize::{
    normalize, normalize_str, resolved_document, NormalizeOptions, TokenDocument, FORMAT_KEY,
    RESOLVED_FORMAT,
};
pub use references::{reference_target, resolve, resolve_all, resolve_with};

pub use tincture_core::ResolvedTheme;
