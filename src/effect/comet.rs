//! Comets and meteors: bright heads dragging fading tails.

use super::{finish, millis, offset_pixel, tail_level};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{Rgb, WHITE, dim},
    timing::{self, FrameControl},
};

effect_options! {
    pub struct CometOptions {
        color: Rgb = WHITE,
        speed_ms: u64 = 30,
        tail_length: usize = 10,
        /// Travel from the last pixel towards the first
        reverse: bool = false,
    }
}

/// A comet wrapping around the channel with a quadratic tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct CometEffect;

impl Effect for CometEffect {
    const ID: AnimationId = AnimationId::Comet;
    type Options = CometOptions;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &CometOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let tail = options.tail_length;
        let step: isize = if options.reverse { 1 } else { -1 };

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |elapsed, _| {
                let travelled = (elapsed / options.speed_ms.max(1)) as usize % count;
                let head = if options.reverse {
                    count - 1 - travelled
                } else {
                    travelled
                };

                channel.clear()?;
                channel.set_pixel_rgb(head, options.color)?;
                for i in 1..=tail {
                    if let Some(pixel) = offset_pixel(head, step * i as isize, count) {
                        let level = libm::powf(1.0 - i as f32 / tail as f32, 2.0);
                        channel.set_pixel_rgb(pixel, dim(options.color, level))?;
                    }
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct MeteorShowerOptions {
        color: Rgb = WHITE,
        meteor_count: usize = 5,
        tail_length: usize = 8,
        speed_ms: u64 = 50,
    }
}

/// Several staggered meteors falling through the channel.
///
/// Each meteor enters at pixel 0, moves one pixel per frame and wraps once
/// its tail has left the far end.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeteorShowerEffect;

impl Effect for MeteorShowerEffect {
    const ID: AnimationId = AnimationId::MeteorShower;
    type Options = MeteorShowerOptions;

    #[allow(clippy::cast_possible_wrap)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &MeteorShowerOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let tail = options.tail_length;
        let cycle = count + tail;
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        let offsets: Vec<usize> = (0..options.meteor_count)
            .map(|_| rng.usize(0..=count))
            .collect();

        let mut frame = 0;
        timing::run_for_duration(duration_ms, millis(options.speed_ms), &cancel, |_, _| {
            channel.clear()?;
            for &offset in &offsets {
                let head = (offset + frame) % cycle;
                for t in 0..tail {
                    if let Some(pixel) = offset_pixel(head, -(t as isize), count) {
                        channel.set_pixel_rgb(pixel, dim(options.color, tail_level(t, tail)))?;
                    }
                }
            }
            channel.show()?;
            frame += 1;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}
