//! Wave and motion effects.

use std::collections::VecDeque;

use super::{fade_lit, finish, millis};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{BLUE, RED, Rgb, dim},
    timing::{self, FrameControl},
};

const SAW_FRAME_MS: u64 = 20;

effect_options! {
    pub struct SawOptions {
        color: Rgb = RED,
        /// Length of one ramp
        cycle_ms: u64 = 1000,
        /// Ramp down instead of up
        reverse: bool = false,
    }
}

/// Sawtooth brightness ramp over the whole channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SawEffect;

impl Effect for SawEffect {
    const ID: AnimationId = AnimationId::Saw;
    type Options = SawOptions;

    #[allow(clippy::cast_precision_loss)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &SawOptions,
    ) -> Result<()> {
        let cycle = options.cycle_ms.max(1);

        timing::run_for_duration(
            duration_ms,
            millis(SAW_FRAME_MS),
            &ctx.cancel_token(),
            |elapsed, _| {
                let phase = (elapsed % cycle) as f32 / cycle as f32;
                let level = if options.reverse { 1.0 - phase } else { phase };
                channel.fill_rgb(dim(options.color, level))?;
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct RainOptions {
        color: Rgb = BLUE,
        /// Chance of a new drop per frame
        intensity: f32 = 0.1,
        speed_ms: u64 = 50,
        /// Brightness kept per frame by a drop's streak
        fade_factor: f32 = 0.7,
    }
}

/// Drops entering at pixel 0 and falling one pixel per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RainEffect;

impl Effect for RainEffect {
    const ID: AnimationId = AnimationId::Rain;
    type Options = RainOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RainOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();
        // Positions, oldest drop (lowest on the channel) first. At most one
        // drop spawns per frame, so no more than `count` are ever in flight.
        let mut drops: VecDeque<usize> = VecDeque::with_capacity(count);

        timing::run_for_duration(duration_ms, millis(options.speed_ms), &cancel, |_, _| {
            fade_lit(channel, options.fade_factor)?;

            if rng.f32() < options.intensity {
                drops.push_back(0);
            }
            for position in drops.iter_mut() {
                channel.set_pixel_rgb(*position, options.color)?;
                *position += 1;
            }
            while drops.front().is_some_and(|&position| position >= count) {
                drops.pop_front();
            }

            channel.show()?;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}
