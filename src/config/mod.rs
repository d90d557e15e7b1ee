use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "boxart";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_DOCUMENT_PREFIX: &str = "boxart";

/// Families offered by the font picker when the config does not list its own.
pub const DEFAULT_FONTS: &[&str] = &[
    "Impact",
    "Michroma",
    "GTW",
    "Roboto",
    "Teko",
    "DejaVu Sans",
    "Liberation Sans",
    "Keepon Truckin",
    "Noto Sans",
    "Unknown Gothic",
];

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub export_dir: Option<PathBuf>,
    pub font_dirs: Vec<PathBuf>,
    pub fonts: Vec<String>,
    pub document_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            font_dirs: Vec::new(),
            fonts: DEFAULT_FONTS.iter().map(|font| font.to_string()).collect(),
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Names of the fields that differ from [`AppConfig::default`].
    pub fn overridden_fields(&self) -> Vec<&'static str> {
        let defaults = Self::default();
        let mut fields = Vec::new();
        if self.export_dir != defaults.export_dir {
            fields.push("export_dir");
        }
        if self.font_dirs != defaults.font_dirs {
            fields.push("font_dirs");
        }
        if self.fonts != defaults.fonts {
            fields.push("fonts");
        }
        if self.document_prefix != defaults.document_prefix {
            fields.push("document_prefix");
        }
        fields
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory: neither XDG_CONFIG_HOME nor HOME is set")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_app_config() -> AppConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

/// Reads `config.json` under the resolved config root, falling back to defaults on any failure.
pub fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    match read_app_config(xdg_config_home, home) {
        Ok(Some(config)) => {
            tracing::info!(
                overridden = ?config.overridden_fields(),
                "loaded config.json"
            );
            config
        }
        Ok(None) => {
            tracing::debug!("no config.json; using defaults");
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(%err, "using default config");
            AppConfig::default()
        }
    }
}

fn read_app_config(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<Option<AppConfig>, ConfigError> {
    let path = config_file_path(xdg_config_home, home)?;
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path, source })
}

/// `$XDG_CONFIG_HOME/boxart/config.json`, else `$HOME/.config/boxart/config.json`.
pub fn config_file_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let root = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home.ok_or(ConfigError::NoConfigDir)?.join(".config"),
    };
    Ok(root.join(APP_DIR).join(APP_CONFIG_FILE))
}
