//! Build configuration.
//!
//! Settings come from `tincture.json` (or the file named by `--config`),
//! then command-line flags override individual values. Relative paths in a
//! config file are taken relative to the file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tincture_export::{DEFAULT_DARK_SELECTOR, DEFAULT_LIGHT_SELECTOR};
use tincture_resolver::{NormalizeOptions, TypeFilter};
use tincture_theme::SystemOptions;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tincture.json";

/// `type_filter` value that keeps leaves of every type.
pub const ANY_TYPE: &str = "*";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Token document, in either export or resolved shape.
    pub input: PathBuf,
    /// Mapping rules JSON.
    pub rules: PathBuf,
    /// Optional `{ "light": {...}, "dark": {...} }` override values.
    pub overrides: Option<PathBuf>,
    /// Directory receiving generated artifacts.
    pub out_dir: PathBuf,
    pub prefix: String,
    /// Leaf type harvested from the mode groups, or `*` for all.
    pub type_filter: String,
    pub light_selector: String,
    pub dark_selector: String,
    /// Regexes of keys that may stay unmapped.
    pub coverage_ignore: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("tokens.json"),
            rules: PathBuf::from("mapping.rules.json"),
            overrides: None,
            out_dir: PathBuf::from("dist"),
            prefix: "ds".to_string(),
            type_filter: "color".to_string(),
            light_selector: DEFAULT_LIGHT_SELECTOR.to_string(),
            dark_selector: DEFAULT_DARK_SELECTOR.to_string(),
            coverage_ignore: Vec::new(),
        }
    }
}

/// Flags overriding config file values.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Token document
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,
    /// Mapping rules file
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,
    /// Override values file
    #[arg(long, global = true)]
    pub overrides: Option<PathBuf>,
    /// Output directory
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,
    /// CSS custom property prefix
    #[arg(long, global = true)]
    pub prefix: Option<String>,
}

impl BuildConfig {
    /// Load the config named by `explicit`, or `tincture.json` in `cwd` if
    /// it exists, or the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = cwd.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default().rebased(cwd))
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: BuildConfig = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config.rebased(dir))
    }

    fn rebased(mut self, dir: &Path) -> Self {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        rebase(&mut self.input);
        rebase(&mut self.rules);
        rebase(&mut self.out_dir);
        if let Some(overrides) = self.overrides.as_mut() {
            rebase(overrides);
        }
        self
    }

    /// Apply command-line flags on top of file values.
    pub fn apply(&mut self, args: &ConfigArgs) {
        if let Some(input) = &args.input {
            self.input = input.clone();
        }
        if let Some(rules) = &args.rules {
            self.rules = rules.clone();
        }
        if let Some(overrides) = &args.overrides {
            self.overrides = Some(overrides.clone());
        }
        if let Some(out_dir) = &args.out_dir {
            self.out_dir = out_dir.clone();
        }
        if let Some(prefix) = &args.prefix {
            self.prefix = prefix.clone();
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        let type_filter = if self.type_filter == ANY_TYPE {
            TypeFilter::Any
        } else {
            TypeFilter::only(self.type_filter.as_str())
        };
        NormalizeOptions {
            type_filter,
            ..Default::default()
        }
    }

    pub fn system_options(&self) -> SystemOptions {
        SystemOptions {
            prefix: self.prefix.clone(),
            light_selector: self.light_selector.clone(),
            dark_selector: self.dark_selector.clone(),
        }
    }
}
