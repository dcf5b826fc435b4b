//! Fireworks: random bursts that fade out.

use super::{fade_lit, finish, millis, offset_pixel};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::dim,
    random::random_vibrant_color,
    timing::{self, FrameControl},
};

const FIREWORKS_FRAME_MS: u64 = 50;

effect_options! {
    pub struct FireworksOptions {
        /// Chance of a new burst per frame
        frequency: f32 = 0.05,
        /// Brightness kept per frame by older bursts
        fade_speed: f32 = 0.85,
        /// Width of a burst in pixels
        explosion_size: usize = 5,
    }
}

/// Vibrant bursts at random points, brightest at their center.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireworksEffect;

impl Effect for FireworksEffect {
    const ID: AnimationId = AnimationId::Fireworks;
    type Options = FireworksOptions;

    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &FireworksOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let size = options.explosion_size;
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        timing::run_for_duration(duration_ms, millis(FIREWORKS_FRAME_MS), &cancel, |_, _| {
            fade_lit(channel, options.fade_speed)?;

            if rng.f32() < options.frequency {
                let center = rng.usize(..count);
                let color = random_vibrant_color(rng);
                for i in 0..size {
                    let offset = i as isize - (size / 2) as isize;
                    if let Some(pixel) = offset_pixel(center, offset, count) {
                        let level = 1.0 - offset.unsigned_abs() as f32 / size as f32;
                        channel.set_pixel_rgb(pixel, dim(color, level))?;
                    }
                }
            }

            channel.show()?;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}
