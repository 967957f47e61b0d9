//! Underglow configuration
//!
//! Everything the board supplies at build or start time: strip length,
//! timing, brightness window, start values and step sizes.

use embassy_time::Duration;

use crate::color::{BrightnessRange, Hsb};
use crate::effect::{EffectId, IndicatorConfig};
use crate::error::ConfigError;
use crate::state::UnderglowState;

/// Default render period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(25);

/// Default delay between the last change and the settings write
pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(60_000);

/// Default color after a factory reset
pub const DEFAULT_COLOR: Hsb = Hsb::new(0, 100, 100);

pub const DEFAULT_SPEED: u8 = 3;

/// Amount applied by one hue/saturation/brightness adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSizes {
    /// Degrees
    pub hue: u16,
    /// Percent
    pub saturation: u8,
    /// Percent
    pub brightness: u8,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            hue: 10,
            saturation: 10,
            brightness: 10,
        }
    }
}

/// Values used when nothing has been persisted yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartValues {
    pub color: Hsb,
    pub speed: u8,
    pub effect: EffectId,
    pub on: bool,
}

impl Default for StartValues {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            speed: DEFAULT_SPEED,
            effect: EffectId::Indicator,
            on: true,
        }
    }
}

impl StartValues {
    pub const fn to_state(self) -> UnderglowState {
        UnderglowState {
            color: self.color,
            animation_speed: self.speed,
            current_effect: self.effect,
            animation_step: 0,
            on: self.on,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnderglowConfig {
    /// Number of pixels on the strip
    pub strip_len: usize,
    /// Render period
    pub tick_period: Duration,
    /// Output brightness window
    pub brightness: BrightnessRange,
    pub start: StartValues,
    pub steps: StepSizes,
    /// Quiet time before a settings write
    pub save_debounce: Duration,
    pub indicator: IndicatorConfig,
}

impl UnderglowConfig {
    /// Configuration with default timing and start values
    pub fn new(strip_len: usize) -> Self {
        Self {
            strip_len,
            tick_period: DEFAULT_TICK_PERIOD,
            brightness: BrightnessRange::FULL,
            start: StartValues::default(),
            steps: StepSizes::default(),
            save_debounce: DEFAULT_SAVE_DEBOUNCE,
            indicator: IndicatorConfig::default(),
        }
    }

    /// Check the configuration against a frame buffer of `capacity` pixels
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.strip_len > capacity {
            return Err(ConfigError::StripTooLong {
                len: self.strip_len,
                capacity,
            });
        }
        self.start
            .to_state()
            .validate()
            .map_err(ConfigError::Defaults)?;
        self.indicator.layout.validate(self.strip_len)
    }
}
