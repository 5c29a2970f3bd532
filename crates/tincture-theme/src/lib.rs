//! Design system loading and the theme factory.
//!
//! A [`DesignSystem`] is created by an explicit initialization step that
//! validates the mapping tables against a resolved theme. Themes for a
//! consuming framework are then produced by [`DesignSystem::create_theme`].

mod bundle;
mod system;

pub use bundle::{FrameworkThemeConfig, ModeTheme, ThemeBundle, ThemeOptions};
pub use system::{CssTextOptions, DesignSystem, SystemOptions};
