//! Breathing effect
//!
//! Brightness follows a triangular wave over `0..BREATHE_PERIOD`: full at
//! both ends, dark at the midpoint. The wave is mapped onto `[0, max]` so
//! the strip really goes dark between breaths.

use super::{Effect, EffectContext};
use crate::color::{BRT_MAX, Rgb, hsb_to_rgb};

/// Length of one breath in step units
const BREATHE_PERIOD: u16 = 2400;
const BREATHE_MIDPOINT: u16 = BREATHE_PERIOD / 2;
/// Step units per brightness percent
#[allow(clippy::cast_lossless)]
const STEPS_PER_PERCENT: u16 = BREATHE_MIDPOINT / BRT_MAX as u16;
/// Step advance per tick at speed 1
const SPEED_FACTOR: u16 = 10;

#[derive(Debug, Clone, Default)]
pub struct BreatheEffect;

impl BreatheEffect {
    /// Brightness percentage for a step
    #[allow(clippy::cast_possible_truncation)]
    pub fn brightness_at(step: u16) -> u8 {
        let distance = step.abs_diff(BREATHE_MIDPOINT) / STEPS_PER_PERCENT;
        distance.min(u16::from(BRT_MAX)) as u8
    }
}

impl Effect for BreatheEffect {
    fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        let state = &mut *ctx.state;
        let hsb = state.color.with_brightness(Self::brightness_at(state.animation_step));
        leds.fill(hsb_to_rgb(ctx.brightness.scale_from_zero(hsb)));

        state.animation_step = state
            .animation_step
            .saturating_add(u16::from(state.animation_speed) * SPEED_FACTOR);
        if state.animation_step >= BREATHE_PERIOD {
            state.animation_step = 0;
        }
    }
}
