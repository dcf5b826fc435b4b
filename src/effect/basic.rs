//! Basic effects: solid colors, blinks, wipes, sweeps and color cycles.

use super::{
    SMOOTH_FRAME_DELAY, bounce, draw_theater, finish, hold, millis, offset_pixel, periods_in,
    pick_color, tail_level,
};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{BLACK, BLUE, Easing, GREEN, RED, Rgb, WHITE, add_colors, dim, hue_wheel, lerp},
    timing::{self, CancelToken, FrameControl, frame_delay_for_fps},
};

/// Delay that spreads `count` wipe steps over `span_ms`
fn wipe_step_delay(count: usize, span_ms: u64) -> embassy_time::Duration {
    let fps = (count as u64 * 1000 / span_ms.max(1)).max(1);
    frame_delay_for_fps(u32::try_from(fps).unwrap_or(u32::MAX))
}

/// Light pixels `0..count` one per frame, in order or reversed
fn wipe_pass(
    channel: &mut dyn Channel,
    color: Rgb,
    reverse: bool,
    span_ms: u64,
    cancel: &CancelToken,
) -> Result<()> {
    let count = channel.pixel_count();
    let frames = u32::try_from(count).unwrap_or(u32::MAX);
    timing::run_for_frames(frames, wipe_step_delay(count, span_ms), cancel, |frame, _| {
        let frame = frame as usize;
        let pixel = if reverse { count - 1 - frame } else { frame };
        channel.set_pixel_rgb(pixel, color)?;
        channel.show()?;
        Ok(FrameControl::Continue)
    })?;
    Ok(())
}

effect_options! {
    pub struct StaticOptions {
        color: Rgb = WHITE,
    }
}

/// Solid color held for the whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEffect;

impl Effect for StaticEffect {
    const ID: AnimationId = AnimationId::Static;
    type Options = StaticOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &StaticOptions,
    ) -> Result<()> {
        channel.fill_rgb(options.color)?;
        channel.show()?;
        hold(duration_ms, &ctx.cancel_token())?;
        finish(channel)
    }
}

effect_options! {
    pub struct BlinkOptions {
        color: Rgb = WHITE,
        blink_speed_ms: u64 = 500,
        /// Fraction of each period spent lit
        duty_cycle: f32 = 0.5,
    }
}

/// Whole-channel on/off blinking.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlinkEffect;

impl Effect for BlinkEffect {
    const ID: AnimationId = AnimationId::Blink;
    type Options = BlinkOptions;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &BlinkOptions,
    ) -> Result<()> {
        let period = options.blink_speed_ms;
        let on_ms = (period as f32 * options.duty_cycle.clamp(0.0, 1.0)) as u64;
        let off_ms = period.saturating_sub(on_ms);
        let blinks = periods_in(duration_ms, period);

        let cancel = ctx.cancel_token();
        timing::run_for_frames(
            blinks.saturating_mul(2),
            millis(0),
            &cancel,
            |frame, _| {
                if frame % 2 == 0 {
                    channel.fill_rgb(options.color)?;
                    channel.show()?;
                    Ok(FrameControl::Delay(millis(on_ms)))
                } else {
                    channel.clear()?;
                    channel.show()?;
                    Ok(FrameControl::Delay(millis(off_ms)))
                }
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct BreatheOptions {
        color: Rgb = BLUE,
        /// Length of one in-and-out breath
        breath_speed_ms: u64 = 2000,
        curve: Easing = Easing::EaseInOut,
    }
}

/// Eased brightness swell and fall of one color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreatheEffect;

impl Effect for BreatheEffect {
    const ID: AnimationId = AnimationId::Breathe;
    type Options = BreatheOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &BreatheOptions,
    ) -> Result<()> {
        let cycles = periods_in(duration_ms, options.breath_speed_ms);
        let half = options.breath_speed_ms / 2;
        let cancel = ctx.cancel_token();

        for _ in 0..cycles {
            if cancel.is_cancelled() {
                break;
            }
            timing::run_for_duration(half, SMOOTH_FRAME_DELAY, &cancel, |_, progress| {
                channel.fill_rgb(dim(options.color, options.curve.apply(progress)))?;
                channel.show()?;
                Ok(FrameControl::Continue)
            })?;
            timing::run_for_duration(half, SMOOTH_FRAME_DELAY, &cancel, |_, progress| {
                channel.fill_rgb(dim(options.color, options.curve.apply(1.0 - progress)))?;
                channel.show()?;
                Ok(FrameControl::Continue)
            })?;
        }
        finish(channel)
    }
}

effect_options! {
    pub struct WipeOptions {
        color: Rgb = RED,
        reverse: bool = false,
        /// Wipe back to black in the second half of the run
        clear_after: bool = true,
    }
}

/// Fill the channel one pixel at a time.
///
/// With `clear_after` the run is split in two halves and the second one
/// wipes back to black from the far end. Without it the channel is left lit.
#[derive(Debug, Clone, Copy, Default)]
pub struct WipeEffect;

impl Effect for WipeEffect {
    const ID: AnimationId = AnimationId::Wipe;
    type Options = WipeOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &WipeOptions,
    ) -> Result<()> {
        let span = if options.clear_after {
            duration_ms / 2
        } else {
            duration_ms
        };
        let cancel = ctx.cancel_token();

        wipe_pass(channel, options.color, options.reverse, span, &cancel)?;
        if options.clear_after && !cancel.is_cancelled() {
            wipe_pass(channel, BLACK, !options.reverse, span, &cancel)?;
        }
        Ok(())
    }
}

effect_options! {
    pub struct WipeRandomOptions {
        wipes: u32 = 3,
        reverse: bool = false,
        vibrant: bool = true,
    }
}

/// Successive wipes, each in a new random color.
#[derive(Debug, Clone, Copy, Default)]
pub struct WipeRandomEffect;

impl Effect for WipeRandomEffect {
    const ID: AnimationId = AnimationId::WipeRandom;
    type Options = WipeRandomOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &WipeRandomOptions,
    ) -> Result<()> {
        let wipe_ms = duration_ms / u64::from(options.wipes.max(1));
        let cancel = ctx.cancel_token();

        for _ in 0..options.wipes {
            if cancel.is_cancelled() {
                break;
            }
            let color = pick_color(ctx.rng(), options.vibrant);
            wipe_pass(channel, color, options.reverse, wipe_ms, &cancel)?;
        }
        finish(channel)
    }
}

effect_options! {
    pub struct RandomColorsOptions {
        change_speed_ms: u64 = 500,
        vibrant: bool = false,
        /// Recolor every pixel per change instead of a single one
        change_all: bool = true,
    }
}

/// Random colors, either all at once or one pixel at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColorsEffect;

impl Effect for RandomColorsEffect {
    const ID: AnimationId = AnimationId::RandomColors;
    type Options = RandomColorsOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RandomColorsOptions,
    ) -> Result<()> {
        let changes = periods_in(duration_ms, options.change_speed_ms);
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        timing::run_for_frames(
            changes,
            millis(options.change_speed_ms),
            &cancel,
            |_, _| {
                if options.change_all {
                    for pixel in 0..count {
                        channel.set_pixel_rgb(pixel, pick_color(rng, options.vibrant))?;
                    }
                } else {
                    let pixel = rng.usize(..count);
                    channel.set_pixel_rgb(pixel, pick_color(rng, options.vibrant))?;
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct SweepOptions {
        color: Rgb = GREEN,
        speed_ms: u64 = 30,
        /// Leave swept pixels lit
        trail: bool = false,
    }
}

/// A single pixel sweeping back and forth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepEffect;

impl Effect for SweepEffect {
    const ID: AnimationId = AnimationId::Sweep;
    type Options = SweepOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &SweepOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let mut step = 0;

        timing::run_for_duration(duration_ms, millis(options.speed_ms), &cancel, |_, _| {
            if !options.trail {
                channel.clear()?;
            }
            channel.set_pixel_rgb(bounce(step, count).0, options.color)?;
            channel.show()?;
            step += 1;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}

effect_options! {
    pub struct DynamicOptions {
        /// Length of each crossfade
        transition_ms: u64 = 2000,
        vibrant: bool = true,
    }
}

/// Smooth crossfades between random whole-channel colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicEffect;

impl Effect for DynamicEffect {
    const ID: AnimationId = AnimationId::Dynamic;
    type Options = DynamicOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &DynamicOptions,
    ) -> Result<()> {
        let transitions = periods_in(duration_ms, options.transition_ms).max(2);
        let cancel = ctx.cancel_token();

        let mut current = pick_color(ctx.rng(), options.vibrant);
        channel.fill_rgb(current)?;
        channel.show()?;

        for _ in 0..transitions {
            if cancel.is_cancelled() {
                break;
            }
            let next = pick_color(ctx.rng(), options.vibrant);
            timing::run_for_duration(
                options.transition_ms,
                SMOOTH_FRAME_DELAY,
                &cancel,
                |_, progress| {
                    channel.fill_rgb(lerp(current, next, progress))?;
                    channel.show()?;
                    Ok(FrameControl::Continue)
                },
            )?;
            current = next;
        }
        finish(channel)
    }
}

effect_options! {
    pub struct ColorloopOptions {
        /// Time per wheel step
        speed_ms: u64 = 50,
    }
}

/// Whole channel stepping around the color wheel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorloopEffect;

impl Effect for ColorloopEffect {
    const ID: AnimationId = AnimationId::Colorloop;
    type Options = ColorloopOptions;

    #[allow(clippy::cast_possible_truncation)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ColorloopOptions,
    ) -> Result<()> {
        let steps = periods_in(duration_ms, options.speed_ms).max(1);
        timing::run_for_frames(
            steps,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |step, _| {
                channel.fill_rgb(hue_wheel(step as u8))?;
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct RainbowOptions {
        /// Time per wheel step
        speed_ms: u64 = 50,
        /// Full wheel turns; 0 runs for the requested duration
        cycles: u32 = 0,
    }
}

/// Rainbow spread across the channel, rotating along it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowEffect;

impl Effect for RainbowEffect {
    const ID: AnimationId = AnimationId::Rainbow;
    type Options = RainbowOptions;

    #[allow(clippy::cast_possible_truncation)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &RainbowOptions,
    ) -> Result<()> {
        let steps = if options.cycles == 0 {
            periods_in(duration_ms, options.speed_ms).max(1)
        } else {
            options.cycles.saturating_mul(256)
        };
        let count = channel.pixel_count();

        timing::run_for_frames(
            steps,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |step, _| {
                for pixel in 0..count {
                    let position = (pixel * 256 / count + step as usize) & 0xFF;
                    channel.set_pixel_rgb(pixel, hue_wheel(position as u8))?;
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct ScanOptions {
        color: Rgb = RED,
        tail_length: usize = 3,
        speed_ms: u64 = 30,
    }
}

/// Bouncing scanner with a fading tail behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanEffect;

impl Effect for ScanEffect {
    const ID: AnimationId = AnimationId::Scan;
    type Options = ScanOptions;

    #[allow(clippy::cast_possible_wrap)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ScanOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let mut step = 0;

        timing::run_for_duration(duration_ms, millis(options.speed_ms), &cancel, |_, _| {
            let (position, direction) = bounce(step, count);
            channel.clear()?;
            for t in 0..options.tail_length {
                if let Some(pixel) = offset_pixel(position, -(t as isize) * direction, count) {
                    let level = tail_level(t, options.tail_length);
                    channel.set_pixel_rgb(pixel, dim(options.color, level))?;
                }
            }
            channel.show()?;
            step += 1;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}

effect_options! {
    pub struct ScanDualOptions {
        color1: Rgb = RED,
        color2: Rgb = BLUE,
        tail_length: usize = 3,
        speed_ms: u64 = 30,
    }
}

/// One bouncing scanner of a dual scan.
struct Scanner {
    position: isize,
    direction: isize,
}

impl Scanner {
    /// Advance one pixel, turning around at either end
    fn advance(&mut self, count: isize) {
        self.position += self.direction;
        if self.position >= count - 1 {
            self.position = count - 1;
            self.direction = -1;
        } else if self.position <= 0 {
            self.position = 0;
            self.direction = 1;
        }
    }

    /// Pixels of the head and tail with their brightness
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn trail(&self, tail_length: usize, count: usize) -> impl Iterator<Item = (usize, f32)> {
        let (position, direction) = (self.position, self.direction);
        (0..tail_length).filter_map(move |t| {
            let pixel = position - t as isize * direction;
            (0..count as isize)
                .contains(&pixel)
                .then(|| (pixel as usize, tail_level(t, tail_length)))
        })
    }
}

/// Two scanners bouncing in opposite directions.
///
/// Where they overlap their colors are added channel-wise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanDualEffect;

impl Effect for ScanDualEffect {
    const ID: AnimationId = AnimationId::ScanDual;
    type Options = ScanDualOptions;

    #[allow(clippy::cast_possible_wrap)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &ScanDualOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let mut first = Scanner {
            position: 0,
            direction: 1,
        };
        let mut second = Scanner {
            position: count as isize - 1,
            direction: -1,
        };

        timing::run_for_duration(duration_ms, millis(options.speed_ms), &cancel, |_, _| {
            channel.clear()?;
            for (pixel, level) in first.trail(options.tail_length, count) {
                channel.set_pixel_rgb(pixel, dim(options.color1, level))?;
            }
            for (pixel, level) in second.trail(options.tail_length, count) {
                let color = dim(options.color2, level);
                let existing = channel.pixel_rgb(pixel)?;
                channel.set_pixel_rgb(pixel, add_colors(existing, color))?;
            }
            channel.show()?;

            first.advance(count as isize);
            second.advance(count as isize);
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}

effect_options! {
    pub struct FadeOptions {
        from: Rgb = BLACK,
        to: Rgb = RED,
        curve: Easing = Easing::EaseInOut,
        /// Pause at the target color before fading back
        hold_time_ms: u64 = 500,
        /// Fade back to the start color in the second half
        reverse: bool = true,
    }
}

/// Eased whole-channel fade between two colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeEffect;

impl FadeEffect {
    fn fade(
        channel: &mut dyn Channel,
        from: Rgb,
        to: Rgb,
        curve: Easing,
        duration_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        timing::run_for_duration(duration_ms, SMOOTH_FRAME_DELAY, cancel, |_, progress| {
            channel.fill_rgb(lerp(from, to, curve.apply(progress)))?;
            channel.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }
}

impl Effect for FadeEffect {
    const ID: AnimationId = AnimationId::Fade;
    type Options = FadeOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &FadeOptions,
    ) -> Result<()> {
        let cancel = ctx.cancel_token();
        let (from, to, curve) = (options.from, options.to, options.curve);

        if options.reverse {
            let span = (duration_ms / 2).saturating_sub(options.hold_time_ms);
            Self::fade(channel, from, to, curve, span, &cancel)?;
            hold(options.hold_time_ms, &cancel)?;
            Self::fade(channel, to, from, curve, span, &cancel)?;
        } else {
            Self::fade(channel, from, to, curve, duration_ms, &cancel)?;
        }
        finish(channel)
    }
}

effect_options! {
    pub struct TheaterChaseOptions {
        color: Rgb = WHITE,
        /// Distance between lit pixels
        spacing: usize = 3,
        speed_ms: u64 = 50,
        /// Passes over every offset; 0 derives it from the duration
        cycles: u32 = 0,
    }
}

fn chase_cycles(cycles: u32, duration_ms: u64, speed_ms: u64, spacing: usize) -> u32 {
    if cycles > 0 {
        return cycles;
    }
    periods_in(duration_ms, speed_ms.saturating_mul(spacing as u64)).max(1)
}

/// Marquee-style crawling lights.
#[derive(Debug, Clone, Copy, Default)]
pub struct TheaterChaseEffect;

impl Effect for TheaterChaseEffect {
    const ID: AnimationId = AnimationId::TheaterChase;
    type Options = TheaterChaseOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &TheaterChaseOptions,
    ) -> Result<()> {
        let spacing = options.spacing.max(1);
        let cycles = chase_cycles(options.cycles, duration_ms, options.speed_ms, spacing);
        let frames = cycles.saturating_mul(u32::try_from(spacing).unwrap_or(u32::MAX));

        timing::run_for_frames(
            frames,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |frame, _| {
                draw_theater(channel, frame as usize % spacing, spacing, options.color)?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct TheaterChaseRainbowOptions {
        spacing: usize = 3,
        speed_ms: u64 = 50,
        cycles: u32 = 0,
    }
}

/// Theater chase whose color walks the wheel once over the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TheaterChaseRainbowEffect;

impl Effect for TheaterChaseRainbowEffect {
    const ID: AnimationId = AnimationId::TheaterChaseRainbow;
    type Options = TheaterChaseRainbowOptions;

    #[allow(clippy::cast_possible_truncation)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &TheaterChaseRainbowOptions,
    ) -> Result<()> {
        let spacing = options.spacing.max(1);
        let cycles = chase_cycles(options.cycles, duration_ms, options.speed_ms, spacing);
        let frames = cycles.saturating_mul(u32::try_from(spacing).unwrap_or(u32::MAX));

        timing::run_for_frames(
            frames,
            millis(options.speed_ms),
            &ctx.cancel_token(),
            |frame, _| {
                let cycle = u64::from(frame) / spacing as u64;
                let color = hue_wheel((cycle * 256 / u64::from(cycles)) as u8);
                draw_theater(channel, frame as usize % spacing, spacing, color)?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}
