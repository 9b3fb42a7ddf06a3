//! UI settings: input behaviour, window constraints and rendering switches.
//!
//! [`Settings`] has sensible defaults, `with_*` builders, and deserializes
//! from TOML with every field optional:
//!
//! ```toml
//! natural_scrolling = false
//! max_combo_size = 2
//! min_window_size = [320.0, 240.0]
//! ```

use serde::Deserialize;

/// Invalid settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Host platform. On macOS the command key can stand in for control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Other,
}

impl Default for Platform {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Settings for a [`Ui`](crate::app::Ui). Times are in nanoseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Collect and log frame statistics.
    pub debug: bool,
    pub platform: Platform,
    /// Longest gap between two releases that still continues a click combo.
    pub combo_max_interval: u64,
    /// Longest click combo (3 = triple click).
    pub max_combo_size: u32,
    /// When a combo is maxed, start again at 1 instead of staying at the max.
    pub clear_combo_when_maxed: bool,
    /// On macOS, treat the left command key as left control.
    pub command_acts_as_control: bool,
    /// When false, scroll amounts are negated.
    pub natural_scrolling: bool,
    pub scroll_multiplier: (f32, f32),
    pub min_window_size: Option<(f32, f32)>,
    pub max_window_size: Option<(f32, f32)>,
    /// Width to height ratio the window is held to on resize.
    pub window_aspect_ratio: Option<(f32, f32)>,
    pub framebuffers_enabled: bool,
    pub root_is_framebuffer: bool,
    /// A drawable with more children than this renders through a framebuffer.
    pub min_drawables_for_framebuffer: usize,
    /// Skip rendering when nothing changed.
    pub render_pausing_enabled: bool,
    /// How often frame statistics roll over.
    pub debug_stats_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            platform: Platform::default(),
            combo_max_interval: 200_000_000,
            max_combo_size: 3,
            clear_combo_when_maxed: false,
            command_acts_as_control: true,
            natural_scrolling: true,
            scroll_multiplier: (1.0, 1.0),
            min_window_size: None,
            max_window_size: None,
            window_aspect_ratio: None,
            framebuffers_enabled: true,
            root_is_framebuffer: false,
            min_drawables_for_framebuffer: 20,
            render_pausing_enabled: true,
            debug_stats_interval: 1_000_000_000,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML and validate the result. Missing fields take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_combo_size == 0 {
            return Err(SettingsError::Invalid {
                field: "max_combo_size",
                reason: "must be at least 1".into(),
            });
        }
        if let (Some(min), Some(max)) = (self.min_window_size, self.max_window_size) {
            if min.0 > max.0 || min.1 > max.1 {
                return Err(SettingsError::Invalid {
                    field: "min_window_size",
                    reason: format!("{min:?} exceeds max_window_size {max:?}"),
                });
            }
        }
        if let Some((w, h)) = self.window_aspect_ratio {
            if w <= 0.0 || h <= 0.0 {
                return Err(SettingsError::Invalid {
                    field: "window_aspect_ratio",
                    reason: format!("{w}:{h} is not a positive ratio"),
                });
            }
        }
        Ok(())
    }

    /// Whether the left command key should count as left control.
    pub fn meta_is_control(&self) -> bool {
        self.platform == Platform::MacOs && self.command_acts_as_control
    }

    // -----------------------------------------------------------------------
    // Builder
    // -----------------------------------------------------------------------

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_combo_max_interval(mut self, nanos: u64) -> Self {
        self.combo_max_interval = nanos;
        self
    }

    pub fn with_max_combo_size(mut self, size: u32) -> Self {
        self.max_combo_size = size;
        self
    }

    pub fn with_clear_combo_when_maxed(mut self, clear: bool) -> Self {
        self.clear_combo_when_maxed = clear;
        self
    }

    pub fn with_command_acts_as_control(mut self, enabled: bool) -> Self {
        self.command_acts_as_control = enabled;
        self
    }

    pub fn with_natural_scrolling(mut self, natural: bool) -> Self {
        self.natural_scrolling = natural;
        self
    }

    pub fn with_scroll_multiplier(mut self, x: f32, y: f32) -> Self {
        self.scroll_multiplier = (x, y);
        self
    }

    pub fn with_min_window_size(mut self, width: f32, height: f32) -> Self {
        self.min_window_size = Some((width, height));
        self
    }

    pub fn with_max_window_size(mut self, width: f32, height: f32) -> Self {
        self.max_window_size = Some((width, height));
        self
    }

    pub fn with_window_aspect_ratio(mut self, width: f32, height: f32) -> Self {
        self.window_aspect_ratio = Some((width, height));
        self
    }

    pub fn with_framebuffers(mut self, enabled: bool) -> Self {
        self.framebuffers_enabled = enabled;
        self
    }

    pub fn with_root_is_framebuffer(mut self, enabled: bool) -> Self {
        self.root_is_framebuffer = enabled;
        self
    }

    pub fn with_min_drawables_for_framebuffer(mut self, count: usize) -> Self {
        self.min_drawables_for_framebuffer = count;
        self
    }

    pub fn with_render_pausing(mut self, enabled: bool) -> Self {
        self.render_pausing_enabled = enabled;
        self
    }

    pub fn with_debug_stats_interval(mut self, nanos: u64) -> Self {
        self.debug_stats_interval = nanos;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
