use super::{BRT_MAX, HUE_MAX, Hsb, Rgb, SAT_MAX};

/// Width of one hue sextant in degrees
const SEXTANT: u16 = HUE_MAX / 6;

/// Convert an HSB color to an 8-bit RGB pixel
///
/// The hue circle is split into six sextants of 60°. Inside a sextant the
/// fractional position selects one of the canonical `(v, t, p)` rotations.
/// Zero saturation always produces a gray with `r == g == b`.
#[allow(clippy::many_single_char_names)]
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    let sextant = (hsb.hue / SEXTANT) % 6;
    let v = f32::from(hsb.brightness.min(BRT_MAX)) / f32::from(BRT_MAX);
    let s = f32::from(hsb.saturation.min(SAT_MAX)) / f32::from(SAT_MAX);
    let f = f32::from(hsb.hue % SEXTANT) / f32::from(SEXTANT);

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sextant {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: to_channel(r),
        g: to_channel(g),
        b: to_channel(b),
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    libm::roundf(value * 255.0).clamp(0.0, 255.0) as u8
}
