pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{BLACK, Hsv, PackedColor, Rgb},
    math8::{blend8, scale8},
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Scale every channel of a color by `scale` (0-255)
#[inline]
pub fn fade_by(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Additive blend, saturating each channel at 255
#[inline]
pub fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
///
/// The white byte of a packed `0xWWRRGGBB` value is ignored.
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color as `0x00RRGGBB`
pub const fn pack_rgb(color: Rgb) -> PackedColor {
    pack_rgbw(color, 0)
}

/// Pack an RGB color and a white component as `0xWWRRGGBB`
#[allow(clippy::cast_lossless)]
pub const fn pack_rgbw(color: Rgb, white: u8) -> PackedColor {
    ((white as u32) << 24) | ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Split a packed `0xWWRRGGBB` value into its color and white parts
#[allow(clippy::cast_possible_truncation)]
pub const fn unpack_rgbw(packed: PackedColor) -> (Rgb, u8) {
    (rgb_from_u32(packed), (packed >> 24) as u8)
}

/// Sample a palette at position t (0-255), blending between neighbours
#[allow(clippy::cast_possible_truncation)]
pub fn sample_palette(palette: &[Rgb], t: u8) -> Rgb {
    let segments = palette.len().saturating_sub(1);
    if segments == 0 {
        return palette.first().copied().unwrap_or(BLACK);
    }

    let scaled = usize::from(t) * segments; // 0..255*(N-1)
    let segment = (scaled >> 8).min(segments - 1);
    let local_t = (scaled & 0xFF) as u8;

    blend_colors(palette[segment], palette[segment + 1], local_t)
}

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`,
/// with the red, green and blue sectors starting at 0, 85 and 171.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let Rgb { r, g, b } = rgb;
    let max = r.max(g).max(b);
    let delta = i32::from(max - r.min(g).min(b));
    if delta == 0 {
        return Hsv {
            hue: 0,
            sat: 0,
            val: max,
        };
    }

    let (sector, rising, falling) = if max == r {
        (0, g, b)
    } else if max == g {
        (85, b, r)
    } else {
        (171, r, g)
    };
    let hue = sector + 43 * (i32::from(rising) - i32::from(falling)) / delta;

    Hsv {
        hue: hue.rem_euclid(256) as u8,
        sat: (delta * 255 / i32::from(max)) as u8,
        val: max,
    }
}
