//! Command implementations. All file I/O of the pipeline lives here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tincture_core::{MappingRules, Mode, PerMode};
use tincture_export::{color_preset, emit_less, emit_scss, preset_json, table_names, ModeOverrides};
use tincture_mapping::{coverage as coverage_check, CoverageIgnore, CoverageReport};
use tincture_resolver::{normalize, resolved_document};
use tincture_theme::{CssTextOptions, DesignSystem, ThemeOptions};
use tracing::info;

use crate::config::BuildConfig;

pub const RESOLVED_THEME_FILE: &str = "theme.resolved.json";
pub const TOKENS_MAPPING_FILE: &str = "mapping.tokens.json";
pub const COMPONENTS_MAPPING_FILE: &str = "mapping.components.json";
pub const NAMES_MAPPING_FILE: &str = "mapping.names.json";
pub const CSS_FILE: &str = "tokens.css";
pub const SCSS_FILE: &str = "tokens.scss";
pub const LESS_FILE: &str = "tokens.less";
pub const PRESET_FILE: &str = "colors.preset.json";

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} {}", what, path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid {} {}", what, path.display()))
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "wrote artifact");
    Ok(())
}

/// Normalize the token document and initialize a validated system.
pub fn load_system(config: &BuildConfig) -> Result<DesignSystem> {
    let tokens: serde_json::Value = read_json(&config.input, "token document")?;
    let rules: MappingRules = read_json(&config.rules, "mapping rules")?;

    let theme = normalize(&tokens, &config.normalize_options())
        .with_context(|| format!("Failed to normalize {}", config.input.display()))?;
    let system = DesignSystem::initialize_with(theme, rules, config.system_options())
        .with_context(|| format!("Mapping rules {} do not fit the theme", config.rules.display()))?;
    Ok(system)
}

fn load_overrides(config: &BuildConfig) -> Result<ModeOverrides> {
    match &config.overrides {
        Some(path) => read_json(path, "overrides"),
        None => Ok(ModeOverrides::default()),
    }
}

/// Write every artifact into the output directory; returns the written
/// paths in write order.
pub fn build(config: &BuildConfig) -> Result<Vec<PathBuf>> {
    let system = load_system(config)?;
    let overrides = load_overrides(config)?;
    let bundle = system.create_theme(ThemeOptions {
        base_theme: None,
        overrides,
    })?;

    let out = &config.out_dir;
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let mappings = system.mappings();
    let prefix = &config.prefix;
    let mut written = Vec::new();
    let mut emit = |file: &str, text: String| -> Result<()> {
        let path = out.join(file);
        write_text(&path, &text)?;
        written.push(path);
        Ok(())
    };

    emit(RESOLVED_THEME_FILE, pretty_json(&resolved_document(system.theme())?)?)?;
    emit(TOKENS_MAPPING_FILE, pretty_json(&mappings.tokens)?)?;
    emit(COMPONENTS_MAPPING_FILE, pretty_json(&mappings.components)?)?;
    emit(NAMES_MAPPING_FILE, pretty_json(&mappings.names)?)?;

    let vars = PerMode::new(
        bundle.light.css_variable_map,
        bundle.dark.css_variable_map,
    );
    emit(
        CSS_FILE,
        system.css_text(CssTextOptions {
            vars: Some(vars),
            ..Default::default()
        }),
    )?;
    emit(SCSS_FILE, emit_scss(table_names(&mappings.names), prefix))?;
    emit(LESS_FILE, emit_less(table_names(&mappings.names), prefix))?;
    emit(
        PRESET_FILE,
        pretty_json(&preset_json(&color_preset(table_names(&mappings.names), prefix))?)?,
    )?;

    info!(count = written.len(), out_dir = %out.display(), "build finished");
    Ok(written)
}

/// Run the coverage check.
pub fn coverage(config: &BuildConfig) -> Result<CoverageReport> {
    let system = load_system(config)?;
    let ignore = CoverageIgnore::new(&config.coverage_ignore)?;
    Ok(coverage_check(system.theme(), system.mappings(), &ignore))
}

/// Human-readable coverage summary.
pub fn format_report(report: &CoverageReport) -> String {
    let mut out = format!(
        "{} of {} keys mapped ({:.1}%), {} ignored, {} unexpected\n",
        report.mapped.len(),
        report.total,
        report.mapped_percent(),
        report.ignored.len(),
        report.unexpected.len()
    );
    for key in &report.unexpected {
        out.push_str(&format!("  unmapped: {}\n", key));
    }
    out
}

/// Final value of one external token.
pub fn lookup(config: &BuildConfig, mode: Mode, name: &str) -> Result<String> {
    let system = load_system(config)?;
    let value = system.token(mode, name)?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXPORT: &str = r##"{
        "base/base": {
            "Grey": {
                "0": { "value": "#000000", "type": "color" },
                "18": { "value": "#ffffff", "type": "color" }
            },
            "Blue": { "6": { "value": "#1677ff", "type": "color" } }
        },
        "Core/Light": {
            "Bg": { "value": "{Grey.18}", "type": "color" },
            "Bg.Primary": { "value": "{Blue.6}", "type": "color" },
            "Text": { "value": "{Grey.0}", "type": "color" },
            "Radius": { "value": "6", "type": "number" }
        },
        "Core/Dark": {
            "Bg": { "value": "{Grey.0}", "type": "color" },
            "Bg.Primary": { "value": "#4096ff", "type": "color" },
            "Text": { "value": "{Grey.18}", "type": "color" },
            "Radius": { "value": "6", "type": "number" }
        }
    }"##;

    const RULES: &str = r#"{
        "tokens": { "colorBgBase": ["Background", "Bg"], "colorPrimary": "Bg.Primary" },
        "components": { "Button": { "colorPrimary": "Bg.Primary" } }
    }"#;

    fn workspace() -> (TempDir, BuildConfig) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tokens.json"), EXPORT).unwrap();
        fs::write(dir.path().join("mapping.rules.json"), RULES).unwrap();
        let config = BuildConfig::load(None, dir.path()).unwrap();
        (dir, config)
    }

    fn read(dir: &TempDir, file: &str) -> String {
        fs::read_to_string(dir.path().join("dist").join(file)).unwrap()
    }

    #[test]
    fn test_build_writes_every_artifact() {
        let (dir, config) = workspace();
        let written = build(&config).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                RESOLVED_THEME_FILE,
                TOKENS_MAPPING_FILE,
                COMPONENTS_MAPPING_FILE,
                NAMES_MAPPING_FILE,
                CSS_FILE,
                SCSS_FILE,
                LESS_FILE,
                PRESET_FILE,
            ]
        );

        let css = read(&dir, CSS_FILE);
        assert!(css.starts_with(":root {\n  --ds-bg: #ffffff;\n  --ds-bg-primary: #1677ff;\n"));
        assert!(css.contains("[data-theme='dark'] {\n  --ds-bg: #000000;\n"));
        assert!(!css.contains("radius"));

        assert_eq!(
            read(&dir, SCSS_FILE).lines().next(),
            Some("$ds-bg: var(--ds-bg);")
        );
        assert_eq!(
            read(&dir, LESS_FILE).lines().nth(1),
            Some("@ds-bg-primary: var(--ds-bg-primary);")
        );

        let preset: serde_json::Value = serde_json::from_str(&read(&dir, PRESET_FILE)).unwrap();
        assert_eq!(preset["bg"]["DEFAULT"], "var(--ds-bg)");
        assert_eq!(preset["bg"]["primary"], "var(--ds-bg-primary)");

        let tokens: serde_json::Value =
            serde_json::from_str(&read(&dir, TOKENS_MAPPING_FILE)).unwrap();
        assert_eq!(tokens["colorBgBase"], "Bg");
    }

    #[test]
    fn test_resolved_output_reloads_as_input() {
        let (dir, mut config) = workspace();
        build(&config).unwrap();

        config.input = dir.path().join("dist").join(RESOLVED_THEME_FILE);
        let reloaded = load_system(&config).unwrap();
        assert_eq!(reloaded.token(Mode::Dark, "bg.primary").unwrap(), "#4096ff");
    }

    #[test]
    fn test_build_applies_overrides() {
        let (dir, mut config) = workspace();
        let overrides = dir.path().join("overrides.json");
        fs::write(&overrides, r##"{ "dark": { "bg": "#141414" } }"##).unwrap();
        config.overrides = Some(overrides);

        build(&config).unwrap();
        let css = read(&dir, CSS_FILE);
        assert!(css.contains("[data-theme='dark'] {\n  --ds-bg: #141414;\n"));
        assert!(css.contains(":root {\n  --ds-bg: #ffffff;\n"));
    }

    #[test]
    fn test_build_fails_on_missing_candidate() {
        let (dir, config) = workspace();
        fs::write(
            dir.path().join("mapping.rules.json"),
            r#"{ "tokens": { "colorError": ["Status.Error"] } }"#,
        )
        .unwrap();

        let err = build(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("No candidate found for 'tokens.colorError'"));
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_missing_input_names_the_file() {
        let (dir, config) = workspace();
        fs::remove_file(dir.path().join("tokens.json")).unwrap();

        let err = build(&config).unwrap_err();
        assert!(err.to_string().contains("tokens.json"));
    }

    #[test]
    fn test_coverage_reports_unmapped_keys() {
        let (_dir, mut config) = workspace();
        let report = coverage(&config).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.unexpected.len(), 1);
        assert_eq!(report.unexpected[0].as_str(), "Text");
        assert!(format_report(&report).contains("unmapped: Text"));

        config.coverage_ignore = vec!["^Text$".to_string()];
        let report = coverage(&config).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.ignored.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let (_dir, config) = workspace();
        assert_eq!(lookup(&config, Mode::Light, "bg").unwrap(), "#ffffff");
        assert!(lookup(&config, Mode::Light, "radius").is_err());
    }
}
