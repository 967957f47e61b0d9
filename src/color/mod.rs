mod convert;
mod hsb;
mod range;

pub use convert::hsb_to_rgb;
pub use hsb::{BRT_MAX, HUE_MAX, Hsb, SAT_MAX};
pub use range::BrightnessRange;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
