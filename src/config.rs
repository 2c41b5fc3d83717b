//! Chart policy configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides. Looked up at `~/.xpchart/config.json` unless a path is given.

use crate::services::binner::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::services::layout::{
    LayoutOptions, BAR_PADDING, DEFAULT_TICK_COUNT, LABEL_CHAR_WIDTH, LABEL_MAX_CHARS,
    LABEL_OFFSET, LABEL_ROTATION_DEG,
};
use crate::services::summary::PISCINE_XP_TARGET;
use crate::types::{Margins, Result, XpchartError};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub xp_top_n: usize,
    pub skills_top_n: usize,
    pub collaborators_top_n: usize,
    pub tick_count: usize,
    pub bar_padding: f64,
    pub label_max_chars: usize,
    pub label_rotation: f64,
    pub label_offset: f64,
    pub label_char_width: f64,
    pub margins: Margins,
    pub activity_window_days: u32,
    pub piscine_xp_target: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            xp_top_n: 10,
            skills_top_n: 10,
            collaborators_top_n: 8,
            tick_count: DEFAULT_TICK_COUNT,
            bar_padding: BAR_PADDING,
            label_max_chars: LABEL_MAX_CHARS,
            label_rotation: LABEL_ROTATION_DEG,
            label_offset: LABEL_OFFSET,
            label_char_width: LABEL_CHAR_WIDTH,
            margins: Margins::default(),
            activity_window_days: DEFAULT_WINDOW_DAYS,
            piscine_xp_target: PISCINE_XP_TARGET,
        }
    }
}

impl ChartConfig {
    /// Default config location (`~/.xpchart/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(".xpchart").join("config.json"))
    }

    /// Load from `path`, or from the default location if it exists, or
    /// fall back to defaults. An explicit path that cannot be read is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::from_file(&default),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| XpchartError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&content)
            .map_err(|e| XpchartError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| XpchartError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.bar_padding) {
            return Err(XpchartError::Config(format!(
                "bar_padding must be in [0, 1), got {}",
                self.bar_padding
            )));
        }
        if !(self.piscine_xp_target.is_finite() && self.piscine_xp_target > 0.0) {
            return Err(XpchartError::Config(format!(
                "piscine_xp_target must be positive, got {}",
                self.piscine_xp_target
            )));
        }
        if self.activity_window_days > MAX_WINDOW_DAYS {
            return Err(XpchartError::Config(format!(
                "activity_window_days must be at most {}, got {}",
                MAX_WINDOW_DAYS, self.activity_window_days
            )));
        }
        Ok(())
    }

    /// Layout policy for a chart keeping `top_n` bars
    pub fn layout_options(&self, top_n: usize) -> LayoutOptions {
        LayoutOptions {
            top_n,
            padding: self.bar_padding,
            tick_count: self.tick_count,
            label_max_chars: self.label_max_chars,
            label_rotation: self.label_rotation,
            label_offset: self.label_offset,
            label_char_width: self.label_char_width,
        }
    }
}
