//! Status indicator effect
//!
//! Shows lock keys, the active layer, the Bluetooth profile and the battery
//! level on dedicated pixels, on top of the base color. Overlays are drawn
//! in that order, so a later overlay wins when two share a pixel. Overlay
//! colors are fixed RGB values scaled by the configured indicator
//! brightness.

mod layout;
mod status;

pub use layout::{
    GRID_COLUMN_STARTS, IndicatorLayout, MAX_BATTERY_SLOTS, MAX_LAYER_SLOTS, MAX_PROFILE_SLOTS,
    grid_pixel,
};
pub use status::{LockKey, LockKeys, ProfileStatus, StatusSnapshot, StatusSource};

use super::{Effect, EffectContext};
use crate::color::{BLACK, Rgb, hsb_to_rgb};
use crate::math8::scale_rgb;

/// Ticks between blink toggles while the profile is open
pub const OPEN_BLINK_TICKS: u16 = 4;
/// Ticks between blink toggles while the profile is disconnected
pub const DISCONNECTED_BLINK_TICKS: u16 = 15;

pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const YELLOW: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 0,
};
pub const ORANGE: Rgb = Rgb {
    r: 255,
    g: 140,
    b: 0,
};
pub const MAGENTA: Rgb = Rgb {
    r: 255,
    g: 0,
    b: 255,
};
pub const CYAN: Rgb = Rgb {
    r: 0,
    g: 255,
    b: 255,
};

const LOCK_KEY_COLOR: Rgb = WHITE;
const LAYER_COLORS: [Rgb; MAX_LAYER_SLOTS] =
    [WHITE, WHITE, BLUE, GREEN, RED, MAGENTA, CYAN, YELLOW];
const PROFILE_COLORS: [Rgb; 4] = [WHITE, BLUE, RED, GREEN];

/// Indicator layout and overlay brightness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub layout: IndicatorLayout,
    /// Overlay brightness (0-255)
    pub brightness: u8,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            layout: IndicatorLayout::grid(),
            brightness: u8::MAX,
        }
    }
}

/// Battery gauge color for a state of charge
///
/// Buckets are half-open from below: `81..=100` green, `51..=80` yellow,
/// `21..=50` orange, `0..=20` red.
pub const fn battery_color(percent: u8) -> Rgb {
    match percent {
        81.. => GREEN,
        51..=80 => YELLOW,
        21..=50 => ORANGE,
        _ => RED,
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorEffect {
    config: IndicatorConfig,
    /// Blink phase used while the profile is open
    open_visible: bool,
    /// Blink phase used while the profile is disconnected
    disconnected_visible: bool,
}

impl IndicatorEffect {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config,
            open_visible: false,
            disconnected_visible: false,
        }
    }

    fn set(&self, leds: &mut [Rgb], index: u8, color: Rgb) {
        if let Some(led) = leds.get_mut(usize::from(index)) {
            *led = scale_rgb(color, self.config.brightness);
        }
    }

    fn draw_lock_keys(&self, ctx: &EffectContext<'_>, leds: &mut [Rgb]) {
        let layout = &self.config.layout;
        let keys = ctx.status.lock_keys;
        for (pixel, key) in [
            (layout.caps_lock, LockKey::CapsLock),
            (layout.num_lock, LockKey::NumLock),
            (layout.scroll_lock, LockKey::ScrollLock),
        ] {
            if let Some(index) = pixel
                && keys.contains(key)
            {
                self.set(leds, index, LOCK_KEY_COLOR);
            }
        }
    }

    fn draw_layer(&self, ctx: &EffectContext<'_>, leds: &mut [Rgb]) {
        let Some(layer) = ctx.status.layer else {
            return;
        };
        // Layers without a palette entry are not drawn
        let slot = usize::from(layer);
        if let (Some(&index), Some(&color)) =
            (self.config.layout.layers.get(slot), LAYER_COLORS.get(slot))
        {
            self.set(leds, index, color);
        }
    }

    fn draw_profile(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        let Some(profile) = ctx.status.profile else {
            return;
        };
        let step = &mut ctx.state.animation_step;
        let visible = if profile.open {
            advance_blink(&mut self.open_visible, step, OPEN_BLINK_TICKS)
        } else if !profile.connected {
            advance_blink(&mut self.disconnected_visible, step, DISCONNECTED_BLINK_TICKS)
        } else {
            true
        };

        if let Some(&index) = self.config.layout.profiles.get(usize::from(profile.index)) {
            let color = if visible {
                PROFILE_COLORS
                    .get(usize::from(profile.index))
                    .copied()
                    .unwrap_or(WHITE)
            } else {
                BLACK
            };
            self.set(leds, index, color);
        }
    }

    fn draw_battery(&self, ctx: &EffectContext<'_>, leds: &mut [Rgb]) {
        let Some(percent) = ctx.status.battery_percent else {
            return;
        };
        let color = battery_color(percent);
        for &index in &self.config.layout.battery {
            self.set(leds, index, color);
        }
    }
}

impl Effect for IndicatorEffect {
    fn render(&mut self, ctx: &mut EffectContext<'_>, leds: &mut [Rgb]) {
        let background = hsb_to_rgb(ctx.brightness.scale(ctx.state.color));
        leds.fill(background);

        self.draw_lock_keys(ctx, leds);
        self.draw_layer(ctx, leds);
        self.draw_profile(ctx, leds);
        self.draw_battery(ctx, leds);
    }

    fn reset(&mut self) {
        self.open_visible = false;
        self.disconnected_visible = false;
    }
}

/// Count one tick and flip `visible` every `period` ticks
///
/// Returns the phase to show for the current tick.
fn advance_blink(visible: &mut bool, step: &mut u16, period: u16) -> bool {
    let shown = *visible;
    *step = step.saturating_add(1);
    if *step >= period {
        *visible = !*visible;
        *step = 0;
    }
    shown
}
