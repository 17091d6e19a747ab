// Keyflick Settings Module
// User-tunable gesture, haptic, geometry and resolver parameters

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::geometry::GeometryConfig;
use crate::gesture::{GestureConfig, HapticConfig};
use crate::transform::ModifierResolver;

/// Settings for keyflick
///
/// Loaded from a TOML file (default: ~/.config/keyflick/settings.toml).
/// Missing sections and keys keep their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    gesture: GestureConfig,
    geometry: GeometryConfig,
    resolver_cache: bool,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    gesture: Option<GestureSettings>,

    #[serde(default)]
    haptics: Option<HapticSettings>,

    #[serde(default)]
    geometry: Option<GeometrySettings>,

    #[serde(default)]
    resolver: Option<ResolverSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GestureSettings {
    sub_value_dist: Option<f32>,
    long_press_timeout_ms: Option<u64>,
    long_press_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HapticSettings {
    enabled: Option<bool>,
    pulse_ms: Option<u64>,
    min_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GeometrySettings {
    keys_per_row: Option<f32>,
    key_height: Option<f32>,
    vertical_margin: Option<f32>,
    horizontal_margin: Option<f32>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ResolverSettings {
    cache: Option<bool>,
}

impl Settings {
    /// Create settings with every default
    pub fn new() -> Self {
        Self {
            gesture: GestureConfig::default(),
            geometry: GeometryConfig::default(),
            resolver_cache: true,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(gesture) = toml_settings.gesture {
            if let Some(dist) = gesture.sub_value_dist {
                settings.gesture.sub_value_dist = non_negative("gesture.sub_value_dist", dist)?;
            }
            if let Some(ms) = gesture.long_press_timeout_ms {
                settings.gesture.long_press_timeout = Duration::from_millis(ms);
            }
            if let Some(ms) = gesture.long_press_interval_ms {
                if ms == 0 {
                    return Err(SettingsError::InvalidValue(
                        "gesture.long_press_interval_ms must be greater than zero".to_string(),
                    ));
                }
                settings.gesture.long_press_interval = Duration::from_millis(ms);
            }
        }

        if let Some(haptics) = toml_settings.haptics {
            let config = &mut settings.gesture.haptics;
            if let Some(enabled) = haptics.enabled {
                config.enabled = enabled;
            }
            if let Some(ms) = haptics.pulse_ms {
                config.pulse = Duration::from_millis(ms);
            }
            if let Some(ms) = haptics.min_interval_ms {
                config.min_interval = Duration::from_millis(ms);
            }
        }

        if let Some(geometry) = toml_settings.geometry {
            if let Some(keys) = geometry.keys_per_row {
                if !(keys.is_finite() && keys > 0.0) {
                    return Err(SettingsError::InvalidValue(format!(
                        "geometry.keys_per_row must be positive, got {}",
                        keys
                    )));
                }
                settings.geometry.keys_per_row = keys;
            }
            if let Some(height) = geometry.key_height {
                if !(height.is_finite() && height > 0.0) {
                    return Err(SettingsError::InvalidValue(format!(
                        "geometry.key_height must be positive, got {}",
                        height
                    )));
                }
                settings.geometry.key_height = height;
            }
            if let Some(margin) = geometry.vertical_margin {
                settings.geometry.vertical_margin =
                    non_negative("geometry.vertical_margin", margin)?;
            }
            if let Some(margin) = geometry.horizontal_margin {
                settings.geometry.horizontal_margin =
                    non_negative("geometry.horizontal_margin", margin)?;
            }
        }

        if let Some(resolver) = toml_settings.resolver {
            if let Some(cache) = resolver.cache {
                settings.resolver_cache = cache;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyflick").join("settings.toml"))
    }

    /// Load from default location (~/.config/keyflick/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn gesture(&self) -> &GestureConfig {
        &self.gesture
    }

    pub fn haptics(&self) -> &HapticConfig {
        &self.gesture.haptics
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn resolver_cache(&self) -> bool {
        self.resolver_cache
    }

    /// Build a resolver honoring the cache setting
    pub fn resolver(&self) -> ModifierResolver {
        ModifierResolver::with_cache(self.resolver_cache)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn non_negative(name: &str, value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::InvalidValue(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keyflick Settings
# Place this file at: ~/.config/keyflick/settings.toml

[gesture]
# Drag distance before a corner value is selected
sub_value_dist = 6.0
# Hold time before a key starts repeating, and the repeat period
long_press_timeout_ms = 800
long_press_interval_ms = 90

[haptics]
enabled = true
pulse_ms = 25
min_interval_ms = 100

[geometry]
# Unit keys across the full width
keys_per_row = 10.0
key_height = 50.0
vertical_margin = 5.0
horizontal_margin = 5.0

[resolver]
# Memoize modifier resolution
cache = true
"#
}
