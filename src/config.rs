//! Runtime configuration handling
//!
//! One immutable [`QrsmithConfig`] is built at startup and passed explicitly
//! to the components that need it; nothing reads process-wide state after
//! that. Values come from an optional `qrsmith.toml`/`qrsmith.yaml` file,
//! `QRSMITH_*` environment overrides, and finally the CLI flags, in that
//! order of increasing precedence.

use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrsmithConfig {
    /// Default render attributes applied when the CLI flags are absent
    pub render: RenderOptions,
    /// Preview window appearance
    pub preview: PreviewOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrsmithConfig {
    /// Load configuration from an explicit path or fall back to discovered
    /// defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::debug!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrsmith.toml", "qrsmith.yaml", "qrsmith.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrsmith");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        self.preview.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Default render attributes, overridable per run via CLI flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Color of dark modules
    pub foreground: Color,
    /// Color of light modules
    pub background: Color,
    /// Output scale factor, clamped up to 1.0 at use
    pub scale: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            scale: 1.0,
        }
    }
}

impl RenderOptions {
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("QRSMITH_FOREGROUND") {
            if let Ok(color) = value.parse::<Color>() {
                self.foreground = color;
            }
        }
        if let Ok(value) = env::var("QRSMITH_BACKGROUND") {
            if let Ok(color) = value.parse::<Color>() {
                self.background = color;
            }
        }
        if let Ok(value) = env::var("QRSMITH_SCALE") {
            if let Ok(scale) = value.parse::<f32>() {
                self.scale = scale;
            }
        }
    }
}

/// Preview window appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Title of the preview window
    pub window_title: String,
    /// Side length in pixels of one checkerboard box
    pub checker_box_size: u32,
    /// Darker checkerboard shade
    pub checker_dark: Color,
    /// Lighter checkerboard shade
    pub checker_light: Color,
    /// Color cleared behind the checkerboard tiling
    pub clear_color: Color,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            window_title: "qrsmith".to_string(),
            checker_box_size: 8,
            checker_dark: Color::new(102, 102, 102, 255),
            checker_light: Color::new(153, 153, 153, 255),
            clear_color: Color::new(0xE2, 0x7D, 0x60, 255),
        }
    }
}

impl PreviewOptions {
    fn apply_env_overrides(&mut self) {
        if let Ok(title) = env::var("QRSMITH_WINDOW_TITLE") {
            self.window_title = title;
        }
        if let Ok(value) = env::var("QRSMITH_CHECKER_BOX_SIZE") {
            if let Ok(size) = value.parse::<u32>() {
                self.checker_box_size = size.max(1);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRSMITH_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
        }
    }
}

impl LoggingOptions {
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRSMITH_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRSMITH_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRSMITH_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
    }
}
