//! Running lights and chases.

use super::{bounce, fade_lit, finish, millis, offset_pixel};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{BLUE, RED, Rgb, WHITE, dim, hue_wheel},
    random::random_color,
    timing::{self, FrameControl},
};

/// How long a chase flash stays lit.
const FLASH_MS: u64 = 50;

/// Bouncing position for a loop that has run `elapsed_ms`
#[allow(clippy::cast_possible_truncation)]
fn position_at(elapsed_ms: u64, speed_ms: u64, count: usize) -> (usize, isize) {
    bounce((elapsed_ms / speed_ms.max(1)) as usize, count)
}

/// Wheel color of `pixel` in a rainbow chase at `step`
#[allow(clippy::cast_possible_truncation)]
fn chase_hue(pixel: usize, count: usize, step: usize) -> Rgb {
    hue_wheel(((pixel * 256 / count + step * 2) % 256) as u8)
}

/// Pixels lit by a group chase at `step`
fn in_group(pixel: usize, step: usize, group_size: usize) -> bool {
    (pixel + step) % group_size.max(1) == 0
}

effect_options! {
    pub struct RunningOptions {
        color: Rgb = RED,
        speed_ms: u64 = 50,
        /// Dimmed pixels drawn behind the dot
        trail_length: usize = 0,
    }
}

/// One dot bouncing end to end, with an optional trail.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningEffect;

impl Effect for RunningEffect {
    const ID: AnimationId = AnimationId::Running;
    type Options = RunningOptions;

    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RunningOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let trail = options.trail_length;

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |elapsed, _| {
                let (pixel, direction) = position_at(elapsed, options.speed_ms, count);
                channel.clear()?;
                for t in 1..=trail {
                    if let Some(behind) = offset_pixel(pixel, -(t as isize) * direction, count) {
                        let level = 1.0 - t as f32 / (trail + 1) as f32;
                        channel.set_pixel_rgb(behind, dim(options.color, level))?;
                    }
                }
                channel.set_pixel_rgb(pixel, options.color)?;
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct RunningColorOptions {
        color: Rgb = RED,
        speed_ms: u64 = 50,
        /// Brightness kept per frame by the wake
        fade_factor: f32 = 0.85,
    }
}

/// Bouncing dot leaving a fading wake.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningColorEffect;

impl Effect for RunningColorEffect {
    const ID: AnimationId = AnimationId::RunningColor;
    type Options = RunningColorOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RunningColorOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |elapsed, _| {
                let (pixel, _) = position_at(elapsed, options.speed_ms, count);
                fade_lit(channel, options.fade_factor)?;
                channel.set_pixel_rgb(pixel, options.color)?;
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct RunningRedBlueOptions {
        speed_ms: u64 = 50,
        fade_factor: f32 = 0.85,
    }
}

/// A red dot and a blue dot running towards each other and wrapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningRedBlueEffect;

impl Effect for RunningRedBlueEffect {
    const ID: AnimationId = AnimationId::RunningRedBlue;
    type Options = RunningRedBlueOptions;

    #[allow(clippy::cast_possible_truncation)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RunningRedBlueOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |elapsed, _| {
                let red = (elapsed / options.speed_ms.max(1)) as usize % count;
                let blue = count - 1 - red;
                fade_lit(channel, options.fade_factor)?;
                channel.set_pixel_rgb(red, RED)?;
                if blue != red {
                    channel.set_pixel_rgb(blue, BLUE)?;
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct RunningRandomOptions {
        speed_ms: u64 = 50,
        fade_factor: f32 = 0.85,
        /// Frames drawn before switching to a new random color
        color_change_interval: u32 = 5,
    }
}

/// Bouncing dot with a fading wake that changes color every few steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningRandomEffect;

impl Effect for RunningRandomEffect {
    const ID: AnimationId = AnimationId::RunningRandom;
    type Options = RunningRandomOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RunningRandomOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();
        let mut color = random_color(rng, 0, 255);
        let mut since_change = 0;

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &cancel,
            |elapsed, _| {
                let (pixel, _) = position_at(elapsed, options.speed_ms, count);
                if since_change >= options.color_change_interval {
                    color = random_color(rng, 0, 255);
                    since_change = 0;
                }
                since_change += 1;

                fade_lit(channel, options.fade_factor)?;
                channel.set_pixel_rgb(pixel, color)?;
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct LarsonScannerOptions {
        color: Rgb = RED,
        speed_ms: u64 = 30,
        /// Width of the bright eye
        eye_size: usize = 3,
        fade_factor: f32 = 0.75,
    }
}

/// Larson scanner: a wide eye sweeping back and forth over a fading wake.
#[derive(Debug, Clone, Copy, Default)]
pub struct LarsonScannerEffect;

impl Effect for LarsonScannerEffect {
    const ID: AnimationId = AnimationId::LarsonScanner;
    type Options = LarsonScannerOptions;

    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &LarsonScannerOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let eye = options.eye_size;

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |elapsed, _| {
                let (center, _) = position_at(elapsed, options.speed_ms, count);
                fade_lit(channel, options.fade_factor)?;
                for i in 0..eye {
                    let offset = i as isize - (eye / 2) as isize;
                    if let Some(pixel) = offset_pixel(center, offset, count) {
                        let level = 1.0 - offset.unsigned_abs() as f32 / eye as f32;
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
    pub struct ChaseFlashOptions {
        color: Rgb = RED,
        speed_ms: u64 = 100,
        group_size: usize = 3,
        /// Chase steps between whole-channel flashes
        flash_interval: usize = 10,
        flash_color: Rgb = WHITE,
    }
}

/// Group chase interrupted by periodic full flashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseFlashEffect;

impl Effect for ChaseFlashEffect {
    const ID: AnimationId = AnimationId::ChaseFlash;
    type Options = ChaseFlashOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ChaseFlashOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let mut step = 0;

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |_, _| {
                let current = step;
                step += 1;
                if current % options.flash_interval.max(1) == 0 {
                    channel.fill_rgb(options.flash_color)?;
                    channel.show()?;
                    // Flash, then a pause of the same length.
                    return Ok(FrameControl::Delay(millis(FLASH_MS * 2)));
                }

                channel.clear()?;
                for pixel in 0..count {
                    if in_group(pixel, current, options.group_size) {
                        channel.set_pixel_rgb(pixel, options.color)?;
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
    pub struct ChaseRainbowWhiteOptions {
        speed_ms: u64 = 100,
        group_size: usize = 3,
    }
}

/// Rainbow pixels chasing through a white channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseRainbowWhiteEffect;

impl Effect for ChaseRainbowWhiteEffect {
    const ID: AnimationId = AnimationId::ChaseRainbowWhite;
    type Options = ChaseRainbowWhiteOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ChaseRainbowWhiteOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let mut step = 0;

        timing::run_for_duration(
            duration_ms,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |_, _| {
                for pixel in 0..count {
                    let color = if in_group(pixel, step, options.group_size) {
                        chase_hue(pixel, count, step)
                    } else {
                        WHITE
                    };
                    channel.set_pixel_rgb(pixel, color)?;
                }
                channel.show()?;
                step += 1;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

/// Shared loop of the blackout chases: pattern, blackout, advance.
fn run_blackout_chase(
    ctx: &EffectContext,
    channel: &mut dyn Channel,
    duration_ms: u64,
    speed_ms: u64,
    blackout_ms: u64,
    mut color_of: impl FnMut(usize, usize) -> Option<Rgb>,
) -> Result<()> {
    let count = channel.pixel_count();
    let mut step = 0;
    let mut lit = false;

    timing::run_for_duration(duration_ms, millis(speed_ms), &ctx.cancel_token(), |_, _| {
        lit = !lit;
        channel.clear()?;
        if !lit {
            channel.show()?;
            step += 1;
            return Ok(FrameControl::Delay(millis(blackout_ms)));
        }

        for pixel in 0..count {
            if let Some(color) = color_of(pixel, step) {
                channel.set_pixel_rgb(pixel, color)?;
            }
        }
        channel.show()?;
        Ok(FrameControl::Delay(millis(speed_ms)))
    })?;
    finish(channel)
}

effect_options! {
    pub struct ChaseBlackoutOptions {
        color: Rgb = RED,
        speed_ms: u64 = 150,
        group_size: usize = 3,
        /// Dark pause between chase steps
        blackout_ms: u64 = 75,
    }
}

/// Group chase with a full blackout between steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseBlackoutEffect;

impl Effect for ChaseBlackoutEffect {
    const ID: AnimationId = AnimationId::ChaseBlackout;
    type Options = ChaseBlackoutOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ChaseBlackoutOptions,
    ) -> Result<()> {
        run_blackout_chase(
            ctx,
            channel,
            duration_ms,
            options.speed_ms,
            options.blackout_ms,
            |pixel, step| in_group(pixel, step, options.group_size).then_some(options.color),
        )
    }
}

effect_options! {
    pub struct ChaseBlackoutRainbowOptions {
        speed_ms: u64 = 150,
        group_size: usize = 3,
        blackout_ms: u64 = 75,
    }
}

/// Rainbow group chase with a full blackout between steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseBlackoutRainbowEffect;

impl Effect for ChaseBlackoutRainbowEffect {
    const ID: AnimationId = AnimationId::ChaseBlackoutRainbow;
    type Options = ChaseBlackoutRainbowOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ChaseBlackoutRainbowOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        run_blackout_chase(
            ctx,
            channel,
            duration_ms,
            options.speed_ms,
            options.blackout_ms,
            |pixel, step| {
                in_group(pixel, step, options.group_size).then(|| chase_hue(pixel, count, step))
            },
        )
    }
}
