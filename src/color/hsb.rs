//! Hue/saturation/brightness color
//!
//! Hue is stored in degrees (`0..360`), saturation and brightness
//! as percentages (`0..=100`).

use super::{Rgb, hsb_to_rgb};
use crate::error::InvalidArgument;

/// Size of the hue circle in degrees
pub const HUE_MAX: u16 = 360;
/// Maximum saturation in percent
pub const SAT_MAX: u8 = 100;
/// Maximum brightness in percent
pub const BRT_MAX: u8 = 100;

/// HSB color as used by the underglow effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsb {
    pub hue: u16,
    pub saturation: u8,
    pub brightness: u8,
}

impl Hsb {
    pub const fn new(hue: u16, saturation: u8, brightness: u8) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Check that every component is inside its range
    pub const fn validate(self) -> Result<Self, InvalidArgument> {
        if self.hue >= HUE_MAX {
            return Err(InvalidArgument::Hue(self.hue));
        }
        if self.saturation > SAT_MAX {
            return Err(InvalidArgument::Saturation(self.saturation));
        }
        if self.brightness > BRT_MAX {
            return Err(InvalidArgument::Brightness(self.brightness));
        }
        Ok(self)
    }

    pub fn to_rgb(self) -> Rgb {
        hsb_to_rgb(self)
    }

    /// Rotate the hue by `delta` degrees, wrapping around the circle
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn shift_hue(self, delta: i32) -> Self {
        let hue = (i32::from(self.hue) + delta).rem_euclid(i32::from(HUE_MAX));
        Self {
            hue: hue as u16,
            ..self
        }
    }

    /// Change saturation by `delta` percent, clamped to `0..=100`
    #[must_use]
    pub fn shift_saturation(self, delta: i16) -> Self {
        Self {
            saturation: shift_percent(self.saturation, delta, SAT_MAX),
            ..self
        }
    }

    /// Change brightness by `delta` percent, clamped to `0..=100`
    #[must_use]
    pub fn shift_brightness(self, delta: i16) -> Self {
        Self {
            brightness: shift_percent(self.brightness, delta, BRT_MAX),
            ..self
        }
    }

    /// Replace brightness, keeping hue and saturation
    #[must_use]
    pub const fn with_brightness(self, brightness: u8) -> Self {
        Self { brightness, ..self }
    }

    /// Replace hue, keeping saturation and brightness
    #[must_use]
    pub const fn with_hue(self, hue: u16) -> Self {
        Self { hue, ..self }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shift_percent(value: u8, delta: i16, max: u8) -> u8 {
    (i16::from(value) + delta).clamp(0, i16::from(max)) as u8
}
