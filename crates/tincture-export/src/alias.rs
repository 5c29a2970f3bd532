//! SCSS and LESS alias emission.
//!
//! Aliases always point at the CSS custom property so the CSS stays the
//! single place literal values live.

use tincture_core::names::css_var;

/// Preprocessor dialect of an alias file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasDialect {
    Scss,
    Less,
}

impl AliasDialect {
    fn sigil(&self) -> char {
        match self {
            AliasDialect::Scss => '$',
            AliasDialect::Less => '@',
        }
    }
}

/// Emit one alias declaration per token name.
pub fn emit_aliases<'a, I>(names: I, prefix: &str, dialect: AliasDialect) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for name in names {
        let var = css_var(prefix, name);
        let alias = var.trim_start_matches('-');
        out.push_str(&format!("{}{}: var({});\n", dialect.sigil(), alias, var));
    }
    out
}

/// Emit SCSS variables aliasing the CSS custom properties.
pub fn emit_scss<'a, I>(names: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    emit_aliases(names, prefix, AliasDialect::Scss)
}

/// Emit LESS variables aliasing the CSS custom properties.
pub fn emit_less<'a, I>(names: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    emit_aliases(names, prefix, AliasDialect::Less)
}
