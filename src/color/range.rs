use super::{BRT_MAX, Hsb};
use crate::error::ConfigError;

/// Output brightness window, in percent
///
/// Effects that should always glow a little map their brightness onto
/// `[min, max]`, effects that must be able to go fully dark map onto
/// `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessRange {
    min: u8,
    max: u8,
}

impl BrightnessRange {
    /// Full range, `0..=100`
    pub const FULL: Self = Self::new(0, BRT_MAX);

    /// Create a new range
    ///
    /// Panics when `min > max` or `max > 100`. In a `const` item this is a
    /// compile-time error.
    pub const fn new(min: u8, max: u8) -> Self {
        assert!(
            min <= max,
            "RGB underglow maximum brightness is less than minimum brightness"
        );
        assert!(max <= BRT_MAX, "RGB underglow maximum brightness exceeds 100");
        Self { min, max }
    }

    /// Create a new range, reporting invalid bounds as an error
    pub const fn try_new(min: u8, max: u8) -> Result<Self, ConfigError> {
        if min > max || max > BRT_MAX {
            return Err(ConfigError::BrightnessRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn min(self) -> u8 {
        self.min
    }

    pub const fn max(self) -> u8 {
        self.max
    }

    /// Map brightness `0..=100` linearly onto `[min, max]`
    #[must_use]
    pub fn scale(self, hsb: Hsb) -> Hsb {
        let span = u16::from(self.max - self.min);
        let offset = span * u16::from(hsb.brightness.min(BRT_MAX)) / u16::from(BRT_MAX);
        hsb.with_brightness(self.min + narrow(offset))
    }

    /// Map brightness `0..=100` linearly onto `[0, max]`
    #[must_use]
    pub fn scale_from_zero(self, hsb: Hsb) -> Hsb {
        let scaled =
            u16::from(hsb.brightness.min(BRT_MAX)) * u16::from(self.max) / u16::from(BRT_MAX);
        hsb.with_brightness(narrow(scaled))
    }
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self::FULL
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn narrow(value: u16) -> u8 {
    value as u8
}
