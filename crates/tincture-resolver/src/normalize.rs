//! Theme normalization.
//!
//! A token document arrives in one of two shapes:
//! - a design-tool export with a shared `base/base` namespace plus one
//!   `*/Light` and one `*/Dark` group, or
//! - an already resolved `{ "light": {...}, "dark": {...} }` theme.
//!
//! [`TokenDocument::classify`] decides the shape once; [`normalize`] turns
//! either shape into a [`ResolvedTheme`].

use serde_json::{Map, Value};
use tincture_core::{FlatKey, FlatLookup, ResolvedTheme, Result, ThemeMap, TokenError};
use tracing::debug;

use crate::flatten::{flatten, TypeFilter};
use crate::references::resolve;

/// Marker key identifying the format of a resolved document.
pub const FORMAT_KEY: &str = "$format";

/// Format marker written on resolved documents.
pub const RESOLVED_FORMAT: &str = "tincture.resolved/1";

/// Normalization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Name of the shared reference namespace.
    pub base_section: String,
    /// Suffix of the light-mode group.
    pub light_suffix: String,
    /// Suffix of the dark-mode group.
    pub dark_suffix: String,
    /// Leaf type harvested from the mode groups.
    pub type_filter: TypeFilter,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            base_section: "base/base".to_string(),
            light_suffix: "/Light".to_string(),
            dark_suffix: "/Dark".to_string(),
            type_filter: TypeFilter::only("color"),
        }
    }
}

/// A token document, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenDocument<'a> {
    /// An already resolved `{light, dark}` theme.
    Resolved {
        light: &'a Map<String, Value>,
        dark: &'a Map<String, Value>,
    },
    /// A raw design-tool export.
    Export(&'a Map<String, Value>),
}

impl<'a> TokenDocument<'a> {
    /// Classify a raw JSON document.
    ///
    /// A `$format` marker wins. Without one, a document is treated as
    /// resolved only when it has no base namespace and both `light` and
    /// `dark` are objects.
    pub fn classify(raw: &'a Value, options: &NormalizeOptions) -> Result<Self> {
        let root = raw
            .as_object()
            .ok_or_else(|| TokenError::malformed("top level is not a JSON object"))?;

        if let Some(format) = root.get(FORMAT_KEY) {
            return match format.as_str() {
                Some(RESOLVED_FORMAT) => Self::resolved_parts(root)
                    .ok_or_else(|| {
                        TokenError::malformed(format!(
                            "document marked {} has no object-valued light/dark",
                            RESOLVED_FORMAT
                        ))
                    }),
                _ => Err(TokenError::malformed(format!(
                    "unsupported {} marker {}",
                    FORMAT_KEY, format
                ))),
            };
        }

        if !root.contains_key(&options.base_section) {
            if let Some(doc) = Self::resolved_parts(root) {
                return Ok(doc);
            }
        }

        Ok(TokenDocument::Export(root))
    }

    fn resolved_parts(root: &'a Map<String, Value>) -> Option<Self> {
        let light = root.get("light")?.as_object()?;
        let dark = root.get("dark")?.as_object()?;
        Some(TokenDocument::Resolved { light, dark })
    }

    /// Convert the document into a resolved theme.
    pub fn into_theme(self, options: &NormalizeOptions) -> Result<ResolvedTheme> {
        match self {
            TokenDocument::Resolved { light, dark } => {
                let light = string_map(light, "light")?;
                let dark = string_map(dark, "dark")?;
                ResolvedTheme::new(light, dark)
            }
            TokenDocument::Export(root) => normalize_export(root, options),
        }
    }
}

/// Normalize a raw token document into a resolved theme.
pub fn normalize(raw: &Value, options: &NormalizeOptions) -> Result<ResolvedTheme> {
    let doc = TokenDocument::classify(raw, options)?;
    let theme = doc.into_theme(options)?;
    debug!(keys = theme.len(), "normalized token document");
    Ok(theme)
}

/// Parse and normalize a JSON token document.
pub fn normalize_str(json: &str, options: &NormalizeOptions) -> Result<ResolvedTheme> {
    let raw: Value = serde_json::from_str(json)?;
    normalize(&raw, options)
}

/// Render a theme as a resolved document carrying the format marker.
pub fn resolved_document(theme: &ResolvedTheme) -> Result<Value> {
    let mut doc = Map::new();
    doc.insert(FORMAT_KEY.to_string(), Value::from(RESOLVED_FORMAT));
    doc.insert("light".to_string(), serde_json::to_value(theme.light())?);
    doc.insert("dark".to_string(), serde_json::to_value(theme.dark())?);
    Ok(Value::Object(doc))
}

fn string_map(values: &Map<String, Value>, mode: &str) -> Result<ThemeMap> {
    values
        .iter()
        .map(|(key, value)| match value.as_str() {
            Some(s) => Ok((FlatKey::from(key.as_str()), s.to_string())),
            None => Err(TokenError::malformed(format!(
                "{}.{} is not a string value",
                mode, key
            ))),
        })
        .collect()
}

fn normalize_export(root: &Map<String, Value>, options: &NormalizeOptions) -> Result<ResolvedTheme> {
    let base = match root.get(&options.base_section) {
        Some(Value::Object(base)) => base,
        Some(_) => {
            return Err(TokenError::malformed(format!(
                "section '{}' is not an object",
                options.base_section
            )))
        }
        None => {
            return Err(TokenError::MissingSection {
                section: format!("'{}' (shared reference namespace)", options.base_section),
            })
        }
    };

    let light_group = find_group(root, &options.light_suffix)?;
    let dark_group = find_group(root, &options.dark_suffix)?;

    let base_lookup = flatten(base, &[], &TypeFilter::Any)?;
    debug!(
        base = base_lookup.len(),
        section = %options.base_section,
        "built base lookup"
    );

    let light = resolve_group(light_group, &base_lookup, options)?;
    let dark = resolve_group(dark_group, &base_lookup, options)?;
    ResolvedTheme::new(light, dark)
}

/// A mode group and its top-level name.
type Group<'a> = (&'a str, &'a Map<String, Value>);

fn find_group<'a>(root: &'a Map<String, Value>, suffix: &str) -> Result<Group<'a>> {
    let matches: Vec<(&String, &Value)> = root
        .iter()
        .filter(|(name, _)| name.ends_with(suffix))
        .collect();

    match matches.as_slice() {
        [] => Err(TokenError::MissingSection {
            section: format!("a top-level group ending in '{}'", suffix),
        }),
        &[(name, group)] => group
            .as_object()
            .map(move |group| (name.as_str(), group))
            .ok_or_else(|| TokenError::malformed(format!("group '{}' is not an object", name))),
        many => Err(TokenError::malformed(format!(
            "ambiguous mode groups ending in '{}': {:?}",
            suffix,
            many.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>()
        ))),
    }
}

fn resolve_group(
    (group_name, group): Group<'_>,
    base_lookup: &FlatLookup,
    options: &NormalizeOptions,
) -> Result<ThemeMap> {
    flatten(group, &[], &options.type_filter)?
        .into_iter()
        .map(|(key, raw)| {
            let value = resolve(&raw, base_lookup)
                .map_err(|err| with_origin(err, &format!("{} > {}", group_name, key)))?;
            Ok((key, value))
        })
        .collect()
}

/// Put the mode token a reference chain started from at the head of the
/// chain.
fn with_origin(err: TokenError, origin: &str) -> TokenError {
    let prepend = |chain: Vec<String>| -> Vec<String> {
        std::iter::once(origin.to_string()).chain(chain).collect()
    };
    match err {
        TokenError::UnresolvedReference { reference, chain } => TokenError::UnresolvedReference {
            reference,
            chain: prepend(chain),
        },
        TokenError::Cycle { chain } => TokenError::Cycle {
            chain: prepend(chain),
        },
        other => other,
    }
}
