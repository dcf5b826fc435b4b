//! Moving multi-color gradient.

use super::{finish, millis};
use crate::{
    Error, Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{BLUE, GREEN, RED, Rgb, lerp},
    timing::{self, FrameControl},
};

/// Color at `position` on a looping gradient with one stop per whole unit
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn looped_gradient(stops: &[Rgb], position: f32) -> Rgb {
    let index = libm::floorf(position) as usize % stops.len();
    let next = (index + 1) % stops.len();
    lerp(stops[index], stops[next], position - libm::floorf(position))
}

effect_options! {
    pub struct GradientOptions {
        /// Gradient stops, wrapping from the last back to the first
        colors: Vec<Rgb> = vec![RED, GREEN, BLUE],
        /// Time to shift the gradient by one pixel
        speed_ms: u64 = 50,
        /// Pixels between two stops
        spread: f32 = 3.0,
    }
}

/// Looping gradient scrolling along the channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientEffect;

impl Effect for GradientEffect {
    const ID: AnimationId = AnimationId::Gradient;
    type Options = GradientOptions;

    #[allow(clippy::cast_precision_loss)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &GradientOptions,
    ) -> Result<()> {
        if options.colors.is_empty() {
            return Err(Error::InvalidOption {
                key: "colors".into(),
                expected: "a non-empty list of colors",
            });
        }
        let count = channel.pixel_count();
        let spread = if options.spread > 0.0 {
            options.spread
        } else {
            1.0
        };
        let span = count as f32 * spread;

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |elapsed, _| {
                let offset = (elapsed / options.speed_ms.max(1)) as f32 % span;
                for pixel in 0..count {
                    let position = (pixel as f32 + offset) / spread;
                    channel.set_pixel_rgb(pixel, looped_gradient(&options.colors, position))?;
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looped_gradient_wraps_to_first_stop() {
        let stops = [RED, BLUE];
        assert_eq!(looped_gradient(&stops, 0.0), RED);
        assert_eq!(looped_gradient(&stops, 1.0), BLUE);
        assert_eq!(looped_gradient(&stops, 2.0), RED);
        assert_eq!(
            looped_gradient(&stops, 1.5),
            Rgb {
                r: 127,
                g: 0,
                b: 127
            }
        );
    }
}
