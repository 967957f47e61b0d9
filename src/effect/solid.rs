//! Solid color fill effect

use super::{Effect, EffectContext};
use crate::color::{Rgb, hsb_to_rgb};

/// Fills every LED with the base color, inside the configured brightness range
#[derive(Debug, Clone, Default)]
pub struct SolidEffect;

impl Effect for SolidEffect {
    fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        let color = hsb_to_rgb(ctx.brightness.scale(ctx.state.color));
        leds.fill(color);
    }
}
