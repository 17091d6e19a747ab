// Keyflick Haptics
// Rate-limited, best-effort vibration feedback

use std::time::{Duration, Instant};

/// Errors a haptic device may report. Never propagated past [`Vibrator`].
#[derive(Debug, thiserror::Error)]
pub enum HapticError {
    #[error("Haptic device unavailable")]
    Unavailable,

    #[error("Haptic device error: {0}")]
    Device(String),
}

/// A device that can produce a vibration pulse
pub trait HapticFeedback: Send {
    fn vibrate(&mut self, duration: Duration) -> Result<(), HapticError>;
}

/// Haptics for hosts without a vibrator
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn vibrate(&mut self, _duration: Duration) -> Result<(), HapticError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticConfig {
    pub enabled: bool,
    /// Length of one pulse
    pub pulse: Duration,
    /// Pulses closer together than this are dropped
    pub min_interval: Duration,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pulse: Duration::from_millis(25),
            min_interval: Duration::from_millis(100),
        }
    }
}

/// Rate limiter in front of a haptic device
pub struct Vibrator {
    device: Box<dyn HapticFeedback>,
    config: HapticConfig,
    last_pulse: Option<Instant>,
}

impl Vibrator {
    pub fn new(device: Box<dyn HapticFeedback>, config: HapticConfig) -> Self {
        Self {
            device,
            config,
            last_pulse: None,
        }
    }

    /// Request a pulse. Returns whether the device was asked to vibrate.
    ///
    /// Device failures are logged and swallowed.
    pub fn pulse(&mut self, now: Instant) -> bool {
        if !self.config.enabled {
            return false;
        }
        if let Some(last) = self.last_pulse {
            if now.saturating_duration_since(last) <= self.config.min_interval {
                return false;
            }
        }

        self.last_pulse = Some(now);
        if let Err(e) = self.device.vibrate(self.config.pulse) {
            log::warn!("haptic feedback failed: {}", e);
        }
        true
    }

    pub fn config(&self) -> &HapticConfig {
        &self.config
    }
}

impl Default for Vibrator {
    fn default() -> Self {
        Self::new(Box::new(NoHaptics), HapticConfig::default())
    }
}

impl std::fmt::Debug for Vibrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vibrator")
            .field("config", &self.config)
            .field("last_pulse", &self.last_pulse)
            .finish_non_exhaustive()
    }
}
