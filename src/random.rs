//! Randomized colors and positions.
//!
//! Every generator draws from a caller-provided [`fastrand::Rng`] so that
//! effect runs can be seeded and replayed.

use fastrand::Rng;

use crate::color::Rgb;

/// Color with every channel drawn from `min..=max`
pub fn random_color(rng: &mut Rng, min: u8, max: u8) -> Rgb {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    Rgb {
        r: rng.u8(min..=max),
        g: rng.u8(min..=max),
        b: rng.u8(min..=max),
    }
}

/// Pick from `palette`, or any color when the palette is empty
pub fn random_color_from_palette(rng: &mut Rng, palette: &[Rgb]) -> Rgb {
    rng.choice(palette.iter().copied())
        .unwrap_or_else(|| random_color(rng, 0, 255))
}

/// Pure red, green or blue at the given brightness
pub fn random_primary_color(rng: &mut Rng, brightness: u8) -> Rgb {
    match rng.u8(0..3) {
        0 => Rgb {
            r: brightness,
            g: 0,
            b: 0,
        },
        1 => Rgb {
            r: 0,
            g: brightness,
            b: 0,
        },
        _ => Rgb {
            r: 0,
            g: 0,
            b: brightness,
        },
    }
}

/// Soft color with every channel in `150..=255`
pub fn random_pastel_color(rng: &mut Rng) -> Rgb {
    random_color(rng, 150, 255)
}

/// Saturated color: one channel at 255, one at 0, one in `0..=128`
pub fn random_vibrant_color(rng: &mut Rng) -> Rgb {
    let mut channels = [255, rng.u8(0..=128), 0];
    rng.shuffle(&mut channels);
    Rgb {
        r: channels[0],
        g: channels[1],
        b: channels[2],
    }
}

/// `count` independent colors with channels in `min..=max`
pub fn random_colors(rng: &mut Rng, count: usize, min: u8, max: u8) -> Vec<Rgb> {
    (0..count).map(|_| random_color(rng, min, max)).collect()
}

/// Pixel index in `min..=max`
pub fn random_pixel(rng: &mut Rng, min: usize, max: usize) -> usize {
    if max <= min {
        return min;
    }
    rng.usize(min..=max)
}

/// `a` with probability `probability`, otherwise `b`
pub fn random_choice<T>(rng: &mut Rng, a: T, b: T, probability: f32) -> T {
    if rng.f32() < probability { a } else { b }
}

/// Float in `min..max`
pub fn random_float(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibrant_has_saturated_and_dark_channel() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..64 {
            let color = random_vibrant_color(&mut rng);
            let channels = [color.r, color.g, color.b];
            assert!(channels.contains(&255));
            assert!(channels.contains(&0));
        }
    }

    #[test]
    fn test_pastel_channels_are_high() {
        let mut rng = Rng::with_seed(11);
        for _ in 0..64 {
            let color = random_pastel_color(&mut rng);
            assert!(color.r >= 150 && color.g >= 150 && color.b >= 150);
        }
    }

    #[test]
    fn test_primary_has_one_lit_channel() {
        let mut rng = Rng::with_seed(5);
        for _ in 0..32 {
            let color = random_primary_color(&mut rng, 90);
            let mut channels = [color.r, color.g, color.b];
            channels.sort_unstable();
            assert_eq!(channels, [0, 0, 90]);
        }
    }

    #[test]
    fn test_random_colors_respect_bounds() {
        let mut rng = Rng::with_seed(9);
        let colors = random_colors(&mut rng, 20, 30, 40);
        assert_eq!(colors.len(), 20);
        for color in colors {
            for channel in [color.r, color.g, color.b] {
                assert!((30..=40).contains(&channel));
            }
        }
        assert!(random_colors(&mut rng, 0, 0, 255).is_empty());

        let swapped = random_color(&mut rng, 200, 100);
        assert!((100..=200).contains(&swapped.r));
    }

    #[test]
    fn test_random_pixel_range() {
        let mut rng = Rng::with_seed(13);
        for _ in 0..64 {
            assert!((3..=7).contains(&random_pixel(&mut rng, 3, 7)));
        }
        assert_eq!(random_pixel(&mut rng, 4, 4), 4);
        assert_eq!(random_pixel(&mut rng, 9, 2), 9);
    }

    #[test]
    fn test_random_choice_extremes() {
        let mut rng = Rng::with_seed(17);
        for _ in 0..32 {
            assert_eq!(random_choice(&mut rng, 'a', 'b', 1.0), 'a');
            assert_eq!(random_choice(&mut rng, 'a', 'b', 0.0), 'b');
        }
    }

    #[test]
    fn test_random_float_half_open() {
        let mut rng = Rng::with_seed(19);
        for _ in 0..256 {
            let value = random_float(&mut rng, 0.0, 1.0);
            assert!((0.0..1.0).contains(&value));
            let scaled = random_float(&mut rng, -2.0, 2.0);
            assert!((-2.0..2.0).contains(&scaled));
        }
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut rng = Rng::with_seed(3);
        let palette = [Rgb { r: 1, g: 2, b: 3 }];
        assert_eq!(random_color_from_palette(&mut rng, &palette), palette[0]);
        let _ = random_color_from_palette(&mut rng, &[]);
    }
}
