use crate::color::{Rgb, rgb2hsv};

const EASING_NAME_LINEAR: &str = "linear";
const EASING_NAME_EASE_IN: &str = "ease_in";
const EASING_NAME_EASE_OUT: &str = "ease_out";
const EASING_NAME_EASE_IN_OUT: &str = "ease_in_out";

/// Easing curve applied to a 0.0-1.0 progress value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => EASING_NAME_LINEAR,
            Self::EaseIn => EASING_NAME_EASE_IN,
            Self::EaseOut => EASING_NAME_EASE_OUT,
            Self::EaseInOut => EASING_NAME_EASE_IN_OUT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EASING_NAME_LINEAR => Some(Self::Linear),
            EASING_NAME_EASE_IN => Some(Self::EaseIn),
            EASING_NAME_EASE_OUT => Some(Self::EaseOut),
            EASING_NAME_EASE_IN_OUT => Some(Self::EaseInOut),
            _ => None,
        }
    }

    /// Reshape `t` (clamped to 0.0-1.0) along this curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Reshape a progress value with an easing curve
#[inline]
pub fn apply_easing(progress: f32, curve: Easing) -> f32 {
    curve.apply(progress)
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(value: u8, factor: f32) -> u8 {
    (f32::from(value) * factor).min(255.0) as u8
}

/// Dim a color by `factor` (clamped to 0.0-1.0), truncating each channel
pub fn dim(color: Rgb, factor: f32) -> Rgb {
    let factor = factor.clamp(0.0, 1.0);
    Rgb {
        r: scale_channel(color.r, factor),
        g: scale_channel(color.g, factor),
        b: scale_channel(color.b, factor),
    }
}

/// Brighten a color by `factor`, saturating each channel at 255
pub fn brighten(color: Rgb, factor: f32) -> Rgb {
    let factor = factor.max(0.0);
    Rgb {
        r: scale_channel(color.r, factor),
        g: scale_channel(color.g, factor),
        b: scale_channel(color.b, factor),
    }
}

/// Linear interpolation between two colors, `t` clamped to 0.0-1.0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| -> u8 {
        let from = f32::from(from);
        (from + (f32::from(to) - from) * t) as u8
    };
    Rgb {
        r: mix(a.r, b.r),
        g: mix(a.g, b.g),
        b: mix(a.b, b.b),
    }
}

/// Map a cyclic wheel position to a color
///
/// Three 85-wide linear segments: red to green, green to blue, blue back
/// to red.
pub const fn hue_wheel(position: u8) -> Rgb {
    let pos = position;
    if pos < 85 {
        Rgb {
            r: 255 - pos * 3,
            g: pos * 3,
            b: 0,
        }
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb {
            r: 0,
            g: 255 - pos * 3,
            b: pos * 3,
        }
    } else {
        let pos = pos - 170;
        Rgb {
            r: pos * 3,
            g: 0,
            b: 255 - pos * 3,
        }
    }
}

/// Map a fractional hue (wraps at 1.0) onto the wheel
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hue_to_rgb(hue: f32) -> Rgb {
    let mut hue = hue % 1.0;
    if hue < 0.0 {
        hue += 1.0;
    }
    hue_wheel((hue * 255.0) as u8)
}

/// `count` colors spread evenly around the wheel, shifted by `offset`
#[allow(clippy::cast_possible_truncation)]
pub fn rainbow(count: usize, offset: u8) -> Vec<Rgb> {
    (0..count)
        .map(|i| {
            let pos = (i * 256 / count + usize::from(offset)) & 0xFF;
            hue_wheel(pos as u8)
        })
        .collect()
}

/// The wheel color opposite to `color`
pub fn complementary(color: Rgb) -> Rgb {
    hue_wheel(rgb2hsv(color).hue.wrapping_add(128))
}

/// Rotate the hue of `color` around the wheel by `degrees`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rotate_hue(color: Rgb, degrees: i32) -> Rgb {
    let shift = (degrees * 256 / 360).rem_euclid(256) as u8;
    hue_wheel(rgb2hsv(color).hue.wrapping_add(shift))
}

/// Map a heat value through black, red, yellow and white, scaled by
/// `intensity`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn heat_to_color(heat: u8, intensity: f32) -> Rgb {
    let t192 = libm::roundf(f32::from(heat) / 255.0 * 191.0) as u8;
    let ramp = (t192 & 0x3F) << 2;

    let color = if t192 & 0x80 != 0 {
        Rgb {
            r: 255,
            g: 255,
            b: ramp,
        }
    } else if t192 & 0x40 != 0 {
        Rgb {
            r: 255,
            g: ramp,
            b: 0,
        }
    } else {
        Rgb { r: ramp, g: 0, b: 0 }
    };

    dim(color, intensity)
}
