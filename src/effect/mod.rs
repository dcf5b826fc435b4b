//! Built-in effects, one file per category.
//!
//! Every effect is a unit struct implementing [`Effect`] with its own
//! options struct. [`builtin`] maps each [`AnimationId`] to a constructor.

mod basic;
mod chase;
mod comet;
mod fire;
mod fireworks;
mod gradient;
mod motion;
mod physics;
mod sparkle;

use std::rc::Rc;

use embassy_time::Duration;
use fastrand::Rng;

pub use basic::{
    BlinkEffect, BlinkOptions, BreatheEffect, BreatheOptions, ColorloopEffect, ColorloopOptions,
    DynamicEffect, DynamicOptions, FadeEffect, FadeOptions, RainbowEffect, RainbowOptions,
    RandomColorsEffect, RandomColorsOptions, ScanDualEffect, ScanDualOptions, ScanEffect,
    ScanOptions, StaticEffect, StaticOptions, SweepEffect, SweepOptions, TheaterChaseEffect,
    TheaterChaseOptions, TheaterChaseRainbowEffect, TheaterChaseRainbowOptions, WipeEffect,
    WipeOptions, WipeRandomEffect, WipeRandomOptions,
};
pub use chase::{
    ChaseBlackoutEffect, ChaseBlackoutOptions, ChaseBlackoutRainbowEffect,
    ChaseBlackoutRainbowOptions, ChaseFlashEffect, ChaseFlashOptions, ChaseRainbowWhiteEffect,
    ChaseRainbowWhiteOptions, LarsonScannerEffect, LarsonScannerOptions, RunningColorEffect,
    RunningColorOptions, RunningEffect, RunningOptions, RunningRandomEffect, RunningRandomOptions,
    RunningRedBlueEffect, RunningRedBlueOptions,
};
pub use comet::{CometEffect, CometOptions, MeteorShowerEffect, MeteorShowerOptions};
pub use fire::{FireFlickerEffect, FireFlickerOptions};
pub use fireworks::{FireworksEffect, FireworksOptions};
pub use gradient::{GradientEffect, GradientOptions};
pub use motion::{RainEffect, RainOptions, SawEffect, SawOptions};
pub use physics::{DissolveEffect, DissolveOptions, DissolveRandomEffect, DissolveRandomOptions};
pub use sparkle::{
    BlinkRainbowEffect, BlinkRainbowOptions, SparkleDarkEffect, SparkleDarkOptions,
    SparkleEffect, SparkleOptions, SparklePlusEffect, SparklePlusOptions, StrobeEffect,
    StrobeOptions, TwinkleEffect, TwinkleOptions,
};

use crate::{
    Result,
    animation::{Animation, AnimationConstructor, AnimationId},
    channel::Channel,
    color::{BLACK, Rgb, dim},
    random::{random_color, random_vibrant_color},
    timing::{self, CancelToken, DEFAULT_FRAME_DELAY, FrameControl, LoopExit},
};

/// Frame spacing of the smooth fades (about 60 FPS).
const SMOOTH_FRAME_DELAY: Duration = Duration::from_millis(16);

fn construct<A: Animation + Default + 'static>() -> Rc<dyn Animation> {
    Rc::new(A::default())
}

/// Constructor of the built-in effect for `id`
pub fn builtin(id: AnimationId) -> AnimationConstructor {
    match id {
        AnimationId::Static => construct::<StaticEffect>,
        AnimationId::Blink => construct::<BlinkEffect>,
        AnimationId::Breathe => construct::<BreatheEffect>,
        AnimationId::Wipe => construct::<WipeEffect>,
        AnimationId::WipeRandom => construct::<WipeRandomEffect>,
        AnimationId::RandomColors => construct::<RandomColorsEffect>,
        AnimationId::Sweep => construct::<SweepEffect>,
        AnimationId::Dynamic => construct::<DynamicEffect>,
        AnimationId::Colorloop => construct::<ColorloopEffect>,
        AnimationId::Rainbow => construct::<RainbowEffect>,
        AnimationId::Scan => construct::<ScanEffect>,
        AnimationId::ScanDual => construct::<ScanDualEffect>,
        AnimationId::Fade => construct::<FadeEffect>,
        AnimationId::TheaterChase => construct::<TheaterChaseEffect>,
        AnimationId::TheaterChaseRainbow => construct::<TheaterChaseRainbowEffect>,
        AnimationId::Twinkle => construct::<TwinkleEffect>,
        AnimationId::Sparkle => construct::<SparkleEffect>,
        AnimationId::SparkleDark => construct::<SparkleDarkEffect>,
        AnimationId::SparklePlus => construct::<SparklePlusEffect>,
        AnimationId::Strobe => construct::<StrobeEffect>,
        AnimationId::BlinkRainbow => construct::<BlinkRainbowEffect>,
        AnimationId::Running => construct::<RunningEffect>,
        AnimationId::RunningColor => construct::<RunningColorEffect>,
        AnimationId::RunningRedBlue => construct::<RunningRedBlueEffect>,
        AnimationId::RunningRandom => construct::<RunningRandomEffect>,
        AnimationId::LarsonScanner => construct::<LarsonScannerEffect>,
        AnimationId::ChaseFlash => construct::<ChaseFlashEffect>,
        AnimationId::ChaseRainbowWhite => construct::<ChaseRainbowWhiteEffect>,
        AnimationId::ChaseBlackout => construct::<ChaseBlackoutEffect>,
        AnimationId::ChaseBlackoutRainbow => construct::<ChaseBlackoutRainbowEffect>,
        AnimationId::FireFlicker => construct::<FireFlickerEffect>,
        AnimationId::Comet => construct::<CometEffect>,
        AnimationId::MeteorShower => construct::<MeteorShowerEffect>,
        AnimationId::Fireworks => construct::<FireworksEffect>,
        AnimationId::Saw => construct::<SawEffect>,
        AnimationId::Rain => construct::<RainEffect>,
        AnimationId::Dissolve => construct::<DissolveEffect>,
        AnimationId::DissolveRandom => construct::<DissolveRandomEffect>,
        AnimationId::Gradient => construct::<GradientEffect>,
    }
}

#[inline]
fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Whole `period_ms` periods in `duration_ms`, possibly zero
fn periods_in(duration_ms: u64, period_ms: u64) -> u32 {
    u32::try_from(duration_ms / period_ms.max(1)).unwrap_or(u32::MAX)
}

/// Blank the channel and push it
fn finish(channel: &mut dyn Channel) -> Result<()> {
    channel.clear()?;
    channel.show()
}

/// Keep the current frame for `duration_ms`, returning early on cancel
fn hold(duration_ms: u64, cancel: &CancelToken) -> Result<LoopExit> {
    timing::run_for_duration(duration_ms, DEFAULT_FRAME_DELAY, cancel, |_, _| {
        Ok(FrameControl::Continue)
    })
}

/// Ping-pong position over `count` pixels with the direction of travel.
///
/// Both ends are shown twice, once on the way in and once on the way out.
#[allow(clippy::cast_possible_wrap)]
fn bounce(step: usize, count: usize) -> (usize, isize) {
    if count <= 1 {
        return (0, 1);
    }
    let phase = step % (count * 2);
    if phase < count {
        (phase, 1)
    } else {
        (count * 2 - phase - 1, -1)
    }
}

/// `origin + offset` if it lands on the channel
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn offset_pixel(origin: usize, offset: isize, count: usize) -> Option<usize> {
    let pixel = origin as isize + offset;
    (0..count as isize).contains(&pixel).then_some(pixel as usize)
}

/// Dim every lit pixel by `factor`
pub(crate) fn fade_lit(channel: &mut dyn Channel, factor: f32) -> Result<()> {
    for index in 0..channel.pixel_count() {
        let color = channel.pixel_rgb(index)?;
        if color != BLACK {
            channel.set_pixel_rgb(index, dim(color, factor))?;
        }
    }
    Ok(())
}

/// Vibrant color, or any color with channels in 64-255
fn pick_color(rng: &mut Rng, vibrant: bool) -> Rgb {
    if vibrant {
        random_vibrant_color(rng)
    } else {
        random_color(rng, 64, 255)
    }
}

/// Light every `spacing`-th pixel from `offset` on a cleared channel
pub(crate) fn draw_theater(
    channel: &mut dyn Channel,
    offset: usize,
    spacing: usize,
    color: Rgb,
) -> Result<()> {
    channel.clear()?;
    for pixel in (offset..channel.pixel_count()).step_by(spacing.max(1)) {
        channel.set_pixel_rgb(pixel, color)?;
    }
    channel.show()
}

/// Brightness of tail pixel `t` of `len`, fading linearly from 1.0
#[allow(clippy::cast_precision_loss)]
pub(crate) fn tail_level(t: usize, len: usize) -> f32 {
    1.0 - t as f32 / len.max(1) as f32
}
