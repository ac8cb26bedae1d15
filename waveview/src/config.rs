/*!
Configuration management for the waveform viewer.
*/

use anyhow::{Context, Result};
use linecode::defaults;
use linecode::{BitSequence, RenderStyle, Scheme};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Selector value that shows every scheme
pub const VIEW_ALL: &str = "all";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub gui: GuiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            render: RenderConfig::default(),
            gui: GuiConfig::default(),
            session: SessionConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path.as_ref()).unwrap_or_else(|e| {
            warn!("⚠️ Using default configuration: {:#}", e);
            Self::new()
        })
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface layout and export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Fixed surface height in pixels
    pub height: f32,

    /// Margin between plot area and surface edge
    pub padding: f32,

    /// Width subtracted from the available container width
    pub container_margin: f32,

    /// Waveform stroke width
    pub signal_line_width: f32,

    /// Surface width for SVG export when no window width is known
    pub export_width: f32,

    /// Directory for exported SVG files
    pub export_directory: String,
}

impl RenderConfig {
    /// Renderer style derived from this configuration
    pub fn style(&self) -> RenderStyle {
        RenderStyle::default()
            .with_padding(self.padding)
            .with_signal_width(self.signal_line_width)
    }

    /// Surface width for a container of the given width
    pub fn surface_width(&self, container_width: f32) -> f32 {
        (container_width - self.container_margin).max(0.0)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height: defaults::SURFACE_HEIGHT,
            padding: defaults::PADDING,
            container_margin: defaults::CONTAINER_MARGIN,
            signal_line_width: 3.0,
            export_width: 800.0,
            export_directory: "./exports".to_string(),
        }
    }
}

/// GUI specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Window width
    pub window_width: f32,

    /// Window height
    pub window_height: f32,

    /// Enable dark mode
    pub dark_mode: bool,

    /// Auto-save configuration on exit
    pub auto_save_config: bool,

    /// "all", or the selector of the single scheme to show
    pub view: String,
}

impl GuiConfig {
    /// Schemes shown by the current view; an unknown selector shows none
    pub fn visible_schemes(&self) -> Vec<Scheme> {
        visible_schemes(&self.view)
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            dark_mode: true,
            auto_save_config: true,
            view: VIEW_ALL.to_string(),
        }
    }
}

/// Schemes selected by a view string
pub fn visible_schemes(view: &str) -> Vec<Scheme> {
    if view == VIEW_ALL {
        return Scheme::ALL.to_vec();
    }
    match Scheme::from_selector(view) {
        Some(scheme) => vec![scheme],
        None => {
            debug!(view, "unknown scheme selector, nothing to draw");
            Vec::new()
        }
    }
}

/// State carried between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Last bit string that passed validation
    pub last_input: String,
}

impl SessionConfig {
    /// Cached sequence, if the stored string is still valid
    pub fn cached_bits(&self) -> Option<BitSequence> {
        BitSequence::parse(&self.last_input).ok()
    }

    pub fn remember(&mut self, bits: &BitSequence) {
        self.last_input = bits.to_string();
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            last_input: defaults::INITIAL_INPUT.to_string(),
        }
    }
}
