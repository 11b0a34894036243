//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeviz/treeviz.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREEVIZ_*` prefix, `__` for nested tables
//!    (`TREEVIZ_MODE`, `TREEVIZ_LAYOUT__MARGIN`)

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Which builder turns the input sequence into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    /// Rebuild the exact shape encoded breadth-first
    #[default]
    LevelOrder,
    /// Insert keys one by one into an AVL tree
    Balanced,
}

/// How balanced-tree keys are parsed and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyKind {
    /// Signed integers, numeric order
    #[default]
    Int,
    /// Plain text, lexicographic order
    Text,
}

/// Spacing used when positioning nodes, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighbouring columns (node box 60 + gap 10)
    pub horizontal_spacing: u32,
    /// Distance between levels
    pub vertical_spacing: u32,
    /// Offset of column 0 / depth 0 from the canvas edge
    pub margin: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 70,
            vertical_spacing: 70,
            margin: 30,
        }
    }
}

/// Raw layout config; `None` means "not specified, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutConfig {
    pub horizontal_spacing: Option<u32>,
    pub vertical_spacing: Option<u32>,
    pub margin: Option<u32>,
}

impl LayoutConfig {
    pub fn merge(&self, overlay: &RawLayoutConfig) -> Self {
        Self {
            horizontal_spacing: overlay
                .horizontal_spacing
                .unwrap_or(self.horizontal_spacing),
            vertical_spacing: overlay.vertical_spacing.unwrap_or(self.vertical_spacing),
            margin: overlay.margin.unwrap_or(self.margin),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub absent_token: Option<String>,
    pub mode: Option<BuildMode>,
    pub key_kind: Option<KeyKind>,
    pub show_heights: Option<bool>,
    #[serde(default)]
    pub layout: RawLayoutConfig,
}

/// Unified configuration for treeviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Token meaning "no node here", compared case-insensitively
    pub absent_token: String,
    /// Builder used when the command does not name one
    pub mode: BuildMode,
    /// Key type for balanced trees
    pub key_kind: KeyKind,
    /// Annotate balanced nodes with their stored height
    pub show_heights: bool,
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            absent_token: "none".into(),
            mode: BuildMode::default(),
            key_kind: KeyKind::default(),
            show_heights: false,
            layout: LayoutConfig::default(),
        }
    }
}

/// Get the XDG config directory for treeviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeviz.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
pub fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// Scalar options: overlay wins if Some, otherwise keep base.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            absent_token: overlay
                .absent_token
                .clone()
                .unwrap_or_else(|| self.absent_token.clone()),
            mode: overlay.mode.unwrap_or(self.mode),
            key_kind: overlay.key_kind.unwrap_or(self.key_kind),
            show_heights: overlay.show_heights.unwrap_or(self.show_heights),
            layout: self.layout.merge(&overlay.layout),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; unlike the global
    ///   file it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("loading config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current.apply_env(None)
    }

    /// Apply TREEVIZ_* variables as explicit overrides.
    ///
    /// `vars` replaces the process environment when given.
    pub fn apply_env(mut self, vars: Option<Map<String, String>>) -> Result<Self, ApplicationError> {
        let env = Environment::with_prefix("TREEVIZ")
            .prefix_separator("_")
            .separator("__")
            .source(vars);
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("absent_token") {
            self.absent_token = val;
        }
        if let Ok(val) = config.get::<BuildMode>("mode") {
            self.mode = val;
        }
        if let Ok(val) = config.get::<KeyKind>("key_kind") {
            self.key_kind = val;
        }
        if let Ok(val) = config.get_bool("show_heights") {
            self.show_heights = val;
        }
        if let Ok(val) = config.get::<u32>("layout.horizontal_spacing") {
            self.layout.horizontal_spacing = val;
        }
        if let Ok(val) = config.get::<u32>("layout.vertical_spacing") {
            self.layout.vertical_spacing = val;
        }
        if let Ok(val) = config.get::<u32>("layout.margin") {
            self.layout.margin = val;
        }

        Ok(self)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
