//! Sparkle and twinkle effects: random short-lived highlights.

use super::{fade_lit, finish, hold, millis, periods_in};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::{BLACK, Rgb, WHITE, dim, hue_wheel, lerp},
    timing::{self, FrameControl},
};

const TWINKLE_FRAME_MS: u64 = 50;
const TWINKLE_FLOOR: f32 = 0.01;
const SPARKLE_PLUS_FRAME_MS: u64 = 50;
const STROBE_FADE_FRAME_MS: u64 = 8;

effect_options! {
    pub struct TwinkleOptions {
        color: Rgb = WHITE,
        /// Chance per dark pixel and frame to light up
        density: f32 = 0.1,
        /// Brightness kept per frame by a lit pixel
        fade_speed: f32 = 0.9,
    }
}

/// Pixels that flash on at random and decay geometrically.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwinkleEffect;

impl Effect for TwinkleEffect {
    const ID: AnimationId = AnimationId::Twinkle;
    type Options = TwinkleOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &TwinkleOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let mut levels = vec![0.0_f32; count];
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        timing::run_for_duration(duration_ms, millis(TWINKLE_FRAME_MS), &cancel, |_, _| {
            for level in &mut levels {
                if *level <= 0.0 && rng.f32() < options.density {
                    *level = 1.0;
                }
            }
            for (pixel, level) in levels.iter_mut().enumerate() {
                if *level > 0.0 {
                    channel.set_pixel_rgb(pixel, dim(options.color, *level))?;
                    *level *= options.fade_speed;
                    if *level < TWINKLE_FLOOR {
                        *level = 0.0;
                    }
                } else {
                    channel.set_pixel_rgb(pixel, BLACK)?;
                }
            }
            channel.show()?;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}

effect_options! {
    pub struct SparkleOptions {
        color: Rgb = WHITE,
        /// New sparkles per frame
        density: u32 = 3,
        /// Brightness kept per frame by older sparkles
        dim_factor: f32 = 0.7,
        frame_delay_ms: u64 = 50,
    }
}

/// Random sparkles that dim away over the following frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkleEffect;

impl Effect for SparkleEffect {
    const ID: AnimationId = AnimationId::Sparkle;
    type Options = SparkleOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &SparkleOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let frames = periods_in(duration_ms, options.frame_delay_ms);
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        timing::run_for_frames(
            frames,
            millis(options.frame_delay_ms),
            &cancel,
            |frame, _| {
                if frame > 0 {
                    fade_lit(channel, options.dim_factor)?;
                }
                for _ in 0..options.density {
                    channel.set_pixel_rgb(rng.usize(..count), options.color)?;
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct SparkleDarkOptions {
        color: Rgb = WHITE,
        density: u32 = 3,
        /// How long each set of sparkles stays lit
        flash_duration_ms: u64 = 50,
    }
}

/// Fresh sparkles on a black channel every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkleDarkEffect;

impl Effect for SparkleDarkEffect {
    const ID: AnimationId = AnimationId::SparkleDark;
    type Options = SparkleDarkOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &SparkleDarkOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        timing::run_for_duration(
            duration_ms,
            millis(options.flash_duration_ms),
            &cancel,
            |_, _| {
                channel.clear()?;
                for _ in 0..options.density {
                    channel.set_pixel_rgb(rng.usize(..count), options.color)?;
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

effect_options! {
    pub struct SparklePlusOptions {
        /// Base color the sparkles sit on
        color: Rgb = WHITE,
        density: u32 = 2,
        /// Pixels on each side a sparkle bleeds into
        bleed_distance: usize = 2,
    }
}

/// White sparkles on a base color, bleeding into their neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparklePlusEffect;

impl Effect for SparklePlusEffect {
    const ID: AnimationId = AnimationId::SparklePlus;
    type Options = SparklePlusOptions;

    #[allow(clippy::cast_precision_loss)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &SparklePlusOptions,
    ) -> Result<()> {
        let count = channel.pixel_count();
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();
        let bleed = options.bleed_distance;

        channel.fill_rgb(options.color)?;
        channel.show()?;

        timing::run_for_duration(
            duration_ms,
            millis(SPARKLE_PLUS_FRAME_MS),
            &cancel,
            |_, _| {
                channel.fill_rgb(options.color)?;
                for _ in 0..options.density {
                    let center = rng.usize(..count);
                    channel.set_pixel_rgb(center, WHITE)?;
                    for distance in 1..=bleed {
                        let level = 1.0 - distance as f32 / (bleed + 1) as f32;
                        let color = lerp(options.color, WHITE, level);
                        if let Some(left) = center.checked_sub(distance) {
                            channel.set_pixel_rgb(left, color)?;
                        }
                        if center + distance < count {
                            channel.set_pixel_rgb(center + distance, color)?;
                        }
                    }
                }
                channel.show()?;
                Ok(FrameControl::Continue)
            },
        )?;
        finish(channel)
    }
}

/// Lit and dark time of an instant flash: a quarter on, the rest off
fn flash_split(period_ms: u64) -> (u64, u64) {
    let lit = period_ms / 4;
    (lit, period_ms - lit)
}

/// Rest after a faded flash, zero once both ramps fill the period
fn fade_rest(period_ms: u64, fade_ms: u64) -> u64 {
    period_ms.saturating_sub(fade_ms.saturating_mul(2))
}

effect_options! {
    pub struct StrobeOptions {
        color: Rgb = WHITE,
        /// Length of one flash period
        strobe_speed_ms: u64 = 100,
        /// Ramp time on each side of a flash; 0 flashes instantly
        fade_duration_ms: u64 = 30,
    }
}

/// Periodic whole-channel flashes.
///
/// Instant flashes stay lit for a quarter of the period. Faded flashes ramp
/// up and down over `fade_duration_ms` each, then rest for what remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrobeEffect;

impl Effect for StrobeEffect {
    const ID: AnimationId = AnimationId::Strobe;
    type Options = StrobeOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &StrobeOptions,
    ) -> Result<()> {
        let period = options.strobe_speed_ms;
        let fade = options.fade_duration_ms;
        let strobes = periods_in(duration_ms, period);
        let cancel = ctx.cancel_token();

        if fade == 0 {
            let (lit, dark) = flash_split(period);
            timing::run_for_frames(strobes.saturating_mul(2), millis(0), &cancel, |frame, _| {
                if frame % 2 == 0 {
                    channel.fill_rgb(options.color)?;
                    channel.show()?;
                    Ok(FrameControl::Delay(millis(lit)))
                } else {
                    channel.clear()?;
                    channel.show()?;
                    Ok(FrameControl::Delay(millis(dark)))
                }
            })?;
            return finish(channel);
        }

        for _ in 0..strobes {
            if cancel.is_cancelled() {
                break;
            }
            timing::run_for_duration(fade, millis(STROBE_FADE_FRAME_MS), &cancel, |_, progress| {
                channel.fill_rgb(dim(options.color, progress))?;
                channel.show()?;
                Ok(FrameControl::Continue)
            })?;
            timing::run_for_duration(fade, millis(STROBE_FADE_FRAME_MS), &cancel, |_, progress| {
                channel.fill_rgb(dim(options.color, 1.0 - progress))?;
                channel.show()?;
                Ok(FrameControl::Continue)
            })?;
            hold(fade_rest(period, fade), &cancel)?;
        }
        finish(channel)
    }
}

effect_options! {
    pub struct BlinkRainbowOptions {
        blink_speed_ms: u64 = 200,
        /// Blinks per trip around the color wheel
        colors_per_cycle: u32 = 8,
    }
}

/// Blinking that steps around the color wheel with every flash.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlinkRainbowEffect;

impl Effect for BlinkRainbowEffect {
    const ID: AnimationId = AnimationId::BlinkRainbow;
    type Options = BlinkRainbowOptions;

    #[allow(clippy::cast_possible_truncation)]
    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &BlinkRainbowOptions,
    ) -> Result<()> {
        let blinks = periods_in(duration_ms, options.blink_speed_ms);
        let half = millis(options.blink_speed_ms / 2);
        let color_step = 256 / options.colors_per_cycle.clamp(1, 256);

        timing::run_for_frames(
            blinks.saturating_mul(2),
            half,
            &ctx.cancel_token(),
            |frame, _| {
                if frame % 2 == 0 {
                    let blink = frame / 2;
                    channel.fill_rgb(hue_wheel((blink.wrapping_mul(color_step) & 0xFF) as u8))?;
                } else {
                    channel.clear()?;
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
    fn test_flash_split_covers_period() {
        assert_eq!(flash_split(100), (25, 75));
        assert_eq!(flash_split(10), (2, 8));
        assert_eq!(flash_split(u64::MAX), (u64::MAX / 4, u64::MAX - u64::MAX / 4));
    }

    #[test]
    fn test_fade_rest_saturates() {
        assert_eq!(fade_rest(100, 30), 40);
        assert_eq!(fade_rest(100, 60), 0);
        assert_eq!(fade_rest(100, u64::MAX), 0);
        assert_eq!(fade_rest(u64::MAX, u64::MAX / 2 + 1), 0);
    }
}
