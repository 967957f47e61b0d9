//! Swirl effect
//!
//! Spreads the hue wheel across the strip and rotates it.

use super::{Effect, EffectContext};
use crate::color::{HUE_MAX, Rgb, hsb_to_rgb};

/// Step advance per tick at speed 1
const SPEED_FACTOR: u16 = 2;

#[derive(Debug, Clone, Default)]
pub struct SwirlEffect;

impl Effect for SwirlEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        let state = &mut *ctx.state;
        let offset = usize::from(state.animation_step % HUE_MAX);
        let hue_max = usize::from(HUE_MAX);

        if !leds.is_empty() {
            let spacing = hue_max / leds.len();
            for (i, led) in leds.iter_mut().enumerate() {
                let hue = ((spacing * i + offset) % hue_max) as u16;
                *led = hsb_to_rgb(ctx.brightness.scale(state.color.with_hue(hue)));
            }
        }

        state.animation_step =
            (state.animation_step % HUE_MAX + u16::from(state.animation_speed) * SPEED_FACTOR)
                % HUE_MAX;
    }
}
