use serde::Deserialize;
use std::path::Path;

/// Recoloring configuration loaded from config.yaml (or built in code).
///
/// Everything here is tuning, not core logic: the substitution rules
/// themselves are fixed. Hosts that construct their viewport tracker read
/// `visibility_margin_px` / `visibility_threshold` when setting it up.
#[derive(Debug, Deserialize, Clone)]
pub struct RecolorConfig {
    /// Background fallback when the host theme is dark and no container
    /// reports a background color.
    #[serde(default = "default_dark_fallback")]
    pub dark_fallback: String,

    /// Background fallback when the host theme is light.
    #[serde(default = "default_light_fallback")]
    pub light_fallback: String,

    /// Pre-trigger margin in pixels around the viewport; elements are
    /// processed this far before they scroll into view.
    #[serde(default = "default_visibility_margin")]
    pub visibility_margin_px: u32,

    /// Minimal intersection ratio for a visibility event to count.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,

    /// Quiet window for the trailing-edge scroll debounce, in milliseconds.
    #[serde(default = "default_scroll_quiet_ms")]
    pub scroll_quiet_ms: u64,
}

fn default_dark_fallback() -> String {
    "#202020".to_string()
}

fn default_light_fallback() -> String {
    "white".to_string()
}

fn default_visibility_margin() -> u32 {
    200
}

fn default_visibility_threshold() -> f32 {
    0.01
}

fn default_scroll_quiet_ms() -> u64 {
    150
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            dark_fallback: default_dark_fallback(),
            light_fallback: default_light_fallback(),
            visibility_margin_px: default_visibility_margin(),
            visibility_threshold: default_visibility_threshold(),
            scroll_quiet_ms: default_scroll_quiet_ms(),
        }
    }
}

impl RecolorConfig {
    /// Load configuration from a YAML file, falling back to defaults on any
    /// read or parse failure.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
