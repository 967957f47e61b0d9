//! Spectrum effect
//!
//! The whole strip shows one color that sweeps through the hue wheel.

use super::{Effect, EffectContext};
use crate::color::{HUE_MAX, Rgb, hsb_to_rgb};

#[derive(Debug, Clone, Default)]
pub struct SpectrumEffect;

impl Effect for SpectrumEffect {
    fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        let state = &mut *ctx.state;
        let hsb = state.color.with_hue(state.animation_step % HUE_MAX);
        leds.fill(hsb_to_rgb(ctx.brightness.scale(hsb)));

        state.animation_step =
            (state.animation_step % HUE_MAX + u16::from(state.animation_speed)) % HUE_MAX;
    }
}
