//! The validated design system.
//!
//! [`DesignSystem`] is built once by an explicit initialization call that
//! resolves the mapping rules and validates every table against the theme.
//! Nothing is computed lazily afterwards: a system that exists is a system
//! that passed validation.

use tincture_core::names::validate_prefix;
use tincture_core::{MappingRules, MappingSet, Mode, ResolvedTheme, Result, TokenError};
use tincture_export::{
    css_variables, emit_css_blocks, resolve_all_mappings, CssVariables, ResolvedValues,
    ValueResolver, DEFAULT_DARK_SELECTOR, DEFAULT_LIGHT_SELECTOR,
};
use tincture_mapping::{build_mapping_set, validate};
use tincture_resolver::{normalize, NormalizeOptions};
use tracing::{debug, info};

use crate::bundle::{assemble, ThemeBundle, ThemeOptions};

/// Settings fixed for the lifetime of a system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOptions {
    /// CSS custom property prefix.
    pub prefix: String,
    pub light_selector: String,
    pub dark_selector: String,
}

impl Default for SystemOptions {
    fn default() -> Self {
        Self {
            prefix: "ds".to_string(),
            light_selector: DEFAULT_LIGHT_SELECTOR.to_string(),
            dark_selector: DEFAULT_DARK_SELECTOR.to_string(),
        }
    }
}

/// Input of [`DesignSystem::css_text`].
#[derive(Debug, Clone, Default)]
pub struct CssTextOptions {
    pub light_selector: Option<String>,
    pub dark_selector: Option<String>,
    /// Custom property maps to emit instead of the system's own.
    pub vars: Option<CssVariables>,
}

/// A resolved theme together with its validated mapping tables.
#[derive(Debug, Clone)]
pub struct DesignSystem {
    theme: ResolvedTheme,
    rules: Option<MappingRules>,
    mappings: MappingSet,
    values: ResolvedValues,
    options: SystemOptions,
}

impl DesignSystem {
    /// Resolve `rules` against `theme` and validate the result.
    pub fn initialize(theme: ResolvedTheme, rules: MappingRules) -> Result<Self> {
        Self::initialize_with(theme, rules, SystemOptions::default())
    }

    /// Like [`initialize`](Self::initialize) with explicit options.
    pub fn initialize_with(
        theme: ResolvedTheme,
        rules: MappingRules,
        options: SystemOptions,
    ) -> Result<Self> {
        let mappings = build_mapping_set(&theme, &rules)?;
        Self::load(theme, Some(rules), mappings, options)
    }

    /// Load previously generated mapping tables, validating them against
    /// `theme` before use.
    pub fn from_tables(
        theme: ResolvedTheme,
        mappings: MappingSet,
        options: SystemOptions,
    ) -> Result<Self> {
        Self::load(theme, None, mappings, options)
    }

    /// Normalize a token document and initialize a system from it.
    pub fn from_json(
        tokens: &serde_json::Value,
        rules: MappingRules,
        normalize_options: &NormalizeOptions,
        options: SystemOptions,
    ) -> Result<Self> {
        let theme = normalize(tokens, normalize_options)?;
        Self::initialize_with(theme, rules, options)
    }

    fn load(
        theme: ResolvedTheme,
        rules: Option<MappingRules>,
        mappings: MappingSet,
        options: SystemOptions,
    ) -> Result<Self> {
        validate_prefix(&options.prefix)?;
        validate(&theme, &mappings)?;
        let values = resolve_all_mappings(&ValueResolver::new(&theme), &mappings.names)?;

        info!(
            keys = theme.len(),
            tokens = mappings.tokens.len(),
            components = mappings.components.len(),
            "design system initialized"
        );

        Ok(Self {
            theme,
            rules,
            mappings,
            values,
            options,
        })
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    pub fn mappings(&self) -> &MappingSet {
        &self.mappings
    }

    pub fn options(&self) -> &SystemOptions {
        &self.options
    }

    /// Final values of every external token, without overrides.
    pub fn values(&self) -> &ResolvedValues {
        &self.values
    }

    /// Value of external token `name` in `mode`.
    pub fn token(&self, mode: Mode, name: &str) -> Result<&str> {
        self.values
            .get(mode)
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TokenError::UnknownToken {
                name: name.to_string(),
                mode,
            })
    }

    /// Build resolved tokens, CSS variables and framework config for both
    /// modes.
    pub fn create_theme(&self, options: ThemeOptions) -> Result<ThemeBundle> {
        let ThemeOptions {
            base_theme,
            overrides,
        } = options;

        let rebased;
        let (theme, mappings) = match base_theme {
            Some(theme) => {
                debug!(keys = theme.len(), "creating theme from a replacement base theme");
                let mappings = match &self.rules {
                    Some(rules) => build_mapping_set(&theme, rules)?,
                    None => self.mappings.clone(),
                };
                validate(&theme, &mappings)?;
                rebased = (theme, mappings);
                (&rebased.0, &rebased.1)
            }
            None => (&self.theme, &self.mappings),
        };

        let resolver = ValueResolver::with_overrides(theme, &overrides);
        let values = resolve_all_mappings(&resolver, &mappings.names)?;
        assemble(mappings, values, &self.options.prefix)
    }

    /// CSS text with one block per mode.
    pub fn css_text(&self, options: CssTextOptions) -> String {
        let light = options
            .light_selector
            .as_deref()
            .unwrap_or(&self.options.light_selector);
        let dark = options
            .dark_selector
            .as_deref()
            .unwrap_or(&self.options.dark_selector);

        match &options.vars {
            Some(vars) => emit_css_blocks(vars, light, dark),
            None => emit_css_blocks(&self.css_variables(), light, dark),
        }
    }

    /// Custom property name to value, per mode, without overrides.
    pub fn css_variables(&self) -> CssVariables {
        css_variables(&self.values, &self.options.prefix)
    }
}
