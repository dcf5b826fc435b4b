//! Dissolves: pixels switch to the next color one at a time in random
//! order.

use fastrand::Rng;

use super::{finish, millis};
use crate::{
    Error, Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{BLUE, GREEN, RED, Rgb},
    random::random_color,
    timing::{self, CancelToken, FrameControl},
};

/// How often the idle loop checks whether the next dissolve is due.
const POLL_MS: u64 = 100;

/// Switch every pixel to `color` in a shuffled order over `transition_ms`
fn dissolve_to(
    channel: &mut dyn Channel,
    rng: &mut Rng,
    color: Rgb,
    transition_ms: u64,
    cancel: &CancelToken,
) -> Result<()> {
    let count = channel.pixel_count();
    let mut order: Vec<usize> = (0..count).collect();
    rng.shuffle(&mut order);

    let per_pixel = millis(transition_ms / count.max(1) as u64);
    let frames = u32::try_from(count).unwrap_or(u32::MAX);
    timing::run_for_frames(frames, per_pixel, cancel, |frame, _| {
        channel.set_pixel_rgb(order[frame as usize], color)?;
        channel.show()?;
        Ok(FrameControl::Continue)
    })?;
    Ok(())
}

/// Run dissolves back to back for `duration_ms`, asking `next_color` for
/// each target
fn run_dissolves(
    ctx: &mut EffectContext,
    channel: &mut dyn Channel,
    duration_ms: u64,
    transition_ms: u64,
    mut next_color: impl FnMut(&mut Rng) -> Rgb,
) -> Result<()> {
    let cancel = ctx.cancel_token();
    let rng = ctx.rng();
    let mut due = transition_ms;

    timing::run_for_duration(duration_ms, millis(POLL_MS), &cancel, |elapsed, progress| {
        if progress < 1.0 && elapsed >= due {
            let color = next_color(rng);
            dissolve_to(channel, rng, color, transition_ms, &cancel)?;
            due = elapsed + transition_ms;
        }
        Ok(FrameControl::Continue)
    })?;
    finish(channel)
}

effect_options! {
    pub struct DissolveOptions {
        /// Colors dissolved through in order, wrapping around
        colors: Vec<Rgb> = vec![RED, GREEN, BLUE],
        transition_ms: u64 = 2000,
    }
}

/// Dissolve through a fixed list of colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DissolveEffect;

impl Effect for DissolveEffect {
    const ID: AnimationId = AnimationId::Dissolve;
    type Options = DissolveOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &DissolveOptions,
    ) -> Result<()> {
        let colors = &options.colors;
        let Some(&first) = colors.first() else {
            return Err(Error::InvalidOption {
                key: "colors".into(),
                expected: "a non-empty list of colors",
            });
        };

        channel.fill_rgb(first)?;
        channel.show()?;

        let mut index = 0;
        run_dissolves(ctx, channel, duration_ms, options.transition_ms, |_| {
            index = (index + 1) % colors.len();
            colors[index]
        })
    }
}

effect_options! {
    pub struct DissolveRandomOptions {
        transition_ms: u64 = 2000,
    }
}

/// Dissolve through random colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DissolveRandomEffect;

impl Effect for DissolveRandomEffect {
    const ID: AnimationId = AnimationId::DissolveRandom;
    type Options = DissolveRandomOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &DissolveRandomOptions,
    ) -> Result<()> {
        channel.fill_rgb(random_color(ctx.rng(), 0, 255))?;
        channel.show()?;
        run_dissolves(ctx, channel, duration_ms, options.transition_ms, |rng| {
            random_color(rng, 0, 255)
        })
    }
}
