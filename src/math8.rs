//! 8-bit fixed-point helpers for brightness and blend factors.

use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// A scale of 255 keeps the value unchanged.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((u16::from(value) * (u16::from(scale) + 1)) >> 8) as u8
}

/// Mix `a` towards `b` by `amount_of_b` (0 = all a, 255 = all b), rounding
/// to nearest
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let amount = u32::from(amount_of_b);
    let mixed = u32::from(a) * (255 - amount) + u32::from(b) * amount;
    ((mixed + 127) / 255) as u8
}

/// Calculate progress (0-255) based on elapsed time and duration
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 0;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}

/// Convert a unit float (0.0-1.0) to a 0-255 scale factor
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
