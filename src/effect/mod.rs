//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and keeps its phase in
//! `UnderglowState::animation_step`.

mod breathe;
pub mod indicator;
mod solid;
mod spectrum;
mod swirl;

pub use breathe::BreatheEffect;
pub use indicator::{IndicatorConfig, IndicatorEffect, StatusSnapshot};
pub use solid::SolidEffect;
pub use spectrum::SpectrumEffect;
pub use swirl::SwirlEffect;

use crate::color::{BrightnessRange, Rgb};
use crate::state::UnderglowState;

const EFFECT_NAME_INDICATOR: &str = "indicator";
const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_SPECTRUM: &str = "spectrum";
const EFFECT_NAME_SWIRL: &str = "swirl";

const EFFECT_ID_INDICATOR: u8 = 0;
const EFFECT_ID_SOLID: u8 = 1;
const EFFECT_ID_BREATHE: u8 = 2;
const EFFECT_ID_SPECTRUM: u8 = 3;
const EFFECT_ID_SWIRL: u8 = 4;

/// Inputs available to an effect while rendering one frame
pub struct EffectContext<'a> {
    /// Shared underglow state, effects advance `animation_step`
    pub state: &'a mut UnderglowState,
    /// Configured output brightness window
    pub brightness: BrightnessRange,
    /// Keyboard status, read once per tick
    pub status: &'a StatusSnapshot,
}

pub trait Effect {
    /// Render a single frame and advance the animation step
    fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]);

    /// Reset effect-local state
    fn reset(&mut self) {}
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Keyboard status display
    Indicator(IndicatorEffect),
    /// Single color on every pixel
    Solid(SolidEffect),
    /// Fade in and out
    Breathe(BreatheEffect),
    /// Whole strip sweeping through the hue wheel
    Spectrum(SpectrumEffect),
    /// Rotating rainbow gradient
    Swirl(SwirlEffect),
}

/// Known effect ids that can be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Indicator = EFFECT_ID_INDICATOR,
    Solid = EFFECT_ID_SOLID,
    Breathe = EFFECT_ID_BREATHE,
    Spectrum = EFFECT_ID_SPECTRUM,
    Swirl = EFFECT_ID_SWIRL,
}

impl EffectId {
    /// Number of selectable effects
    pub const COUNT: u8 = 5;

    /// All effects in selection order
    pub const ALL: [Self; Self::COUNT as usize] = [
        Self::Indicator,
        Self::Solid,
        Self::Breathe,
        Self::Spectrum,
        Self::Swirl,
    ];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_INDICATOR => Self::Indicator,
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_SPECTRUM => Self::Spectrum,
            EFFECT_ID_SWIRL => Self::Swirl,
            _ => return None,
        })
    }

    /// Effect `direction` positions away, wrapping in both directions
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cycle(self, direction: i8) -> Self {
        let next =
            (i16::from(self as u8) + i16::from(direction)).rem_euclid(i16::from(Self::COUNT));
        Self::ALL[next as usize]
    }

    pub fn to_slot(self, indicator: &IndicatorConfig) -> EffectSlot {
        match self {
            Self::Indicator => EffectSlot::Indicator(IndicatorEffect::new(indicator.clone())),
            Self::Solid => EffectSlot::Solid(SolidEffect),
            Self::Breathe => EffectSlot::Breathe(BreatheEffect),
            Self::Spectrum => EffectSlot::Spectrum(SpectrumEffect),
            Self::Swirl => EffectSlot::Swirl(SwirlEffect),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indicator => EFFECT_NAME_INDICATOR,
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Spectrum => EFFECT_NAME_SPECTRUM,
            Self::Swirl => EFFECT_NAME_SWIRL,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_INDICATOR => Some(Self::Indicator),
            EFFECT_NAME_SOLID => Some(Self::Solid),
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_SPECTRUM => Some(Self::Spectrum),
            EFFECT_NAME_SWIRL => Some(Self::Swirl),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Render the current effect
    pub fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        match self {
            Self::Indicator(effect) => effect.render(ctx, leds),
            Self::Solid(effect) => effect.render(ctx, leds),
            Self::Breathe(effect) => effect.render(ctx, leds),
            Self::Spectrum(effect) => effect.render(ctx, leds),
            Self::Swirl(effect) => effect.render(ctx, leds),
        }
    }

    /// Reset the effect state
    pub fn reset(&mut self) {
        match self {
            Self::Indicator(effect) => Effect::reset(effect),
            Self::Solid(effect) => Effect::reset(effect),
            Self::Breathe(effect) => Effect::reset(effect),
            Self::Spectrum(effect) => Effect::reset(effect),
            Self::Swirl(effect) => Effect::reset(effect),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Indicator(_) => EffectId::Indicator,
            Self::Solid(_) => EffectId::Solid,
            Self::Breathe(_) => EffectId::Breathe,
            Self::Spectrum(_) => EffectId::Spectrum,
            Self::Swirl(_) => EffectId::Swirl,
        }
    }
}
