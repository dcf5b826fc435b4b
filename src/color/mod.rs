//! Color types, packed-color conversions and the color math every effect
//! shares.

mod math;
mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use math::{
    Easing, apply_easing, brighten, complementary, dim, heat_to_color, hue_to_rgb, hue_wheel,
    lerp, rainbow, rotate_hue,
};
pub use utils::{
    add_colors, blend_colors, fade_by, hsv2rgb, pack_rgb, pack_rgbw, rgb_from_u32, rgb2hsv,
    sample_palette, unpack_rgbw,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Packed `0xWWRRGGBB` pixel value as stored by channels
pub type PackedColor = u32;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
