use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable naming the hatchery root.
pub const ROOT_ENV: &str = "HATCHERY_HOME";
/// Environment variable naming the color theme.
pub const THEME_ENV: &str = "HATCH_THEME";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub hatchery: Option<HatcheryConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatcheryConfig {
    pub root: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/hatch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hatch").join("config.toml"))
}

/// Load config by cascading CWD `.hatch.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".hatch.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        hatchery: Some(HatcheryConfig {
            root: overlay
                .hatchery
                .and_then(|h| h.root)
                .or_else(|| base.hatchery.and_then(|h| h.root)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .and_then(|d| d.theme)
                .or_else(|| base.display.and_then(|d| d.theme)),
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the hatchery root: environment > config file > `~/hatchery`.
pub fn resolve_root(env_value: Option<&str>, file: &ConfigFile) -> anyhow::Result<PathBuf> {
    let configured = non_empty(env_value).or_else(|| {
        non_empty(
            file.hatchery
                .as_ref()
                .and_then(|h| h.root.as_deref()),
        )
    });

    if let Some(value) = configured {
        return hatch_core::expand_path(value)
            .with_context(|| format!("resolve hatchery root {value:?}"));
    }

    let home = dirs::home_dir().context("resolve home directory")?;
    Ok(home.join("hatchery"))
}

/// Resolve the theme name: CLI flag > environment > config file > `default`.
pub fn resolve_theme(flag: Option<&str>, env_value: Option<&str>, file: &ConfigFile) -> String {
    non_empty(flag)
        .or_else(|| non_empty(env_value))
        .or_else(|| non_empty(file.display.as_ref().and_then(|d| d.theme.as_deref())))
        .unwrap_or("default")
        .to_string()
}
