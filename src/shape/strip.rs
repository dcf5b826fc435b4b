use embassy_time::Duration;
use fastrand::Rng;

use crate::{
    Result,
    channel::{Channel, SharedChannel, VirtualSubchannel},
    color::{Rgb, dim, rainbow, sample_palette},
    effect::{draw_theater, fade_lit, tail_level},
    timing::{self, CancelToken, FrameControl},
};

/// Frame spacing of the sparkle and fire helpers.
const FLICKER_FRAME_MS: u64 = 50;

/// Frame spacing of the comet helper.
const COMET_FRAME_MS: u64 = 30;

/// Brightness kept per frame by a sparkle.
const SPARKLE_FADE: f32 = 0.7;

/// Half-width of a wave's peak, in pixels.
const WAVE_REACH: usize = 3;

/// Linear strip addressed end to end, optionally mounted upside down.
///
/// Reversing swaps the logical mapping only: logical pixel 0 becomes the
/// parent's last pixel. Pixels already written stay where they are.
pub struct RgbStrip {
    view: VirtualSubchannel,
    reversed: bool,
}

impl RgbStrip {
    /// View over every pixel of `parent`, in its own order
    pub fn new(parent: SharedChannel) -> Result<Self> {
        let pixel_count = parent.borrow().pixel_count();
        let view = VirtualSubchannel::new(parent, (0..pixel_count).collect())?;
        Ok(Self {
            view,
            reversed: false,
        })
    }

    /// The strip as a channel, in logical order
    pub fn channel(&mut self) -> &mut VirtualSubchannel {
        &mut self.view
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Toggle the mounting direction
    pub fn flip(&mut self) -> Result<()> {
        self.set_reversed(!self.reversed)
    }

    pub fn set_reversed(&mut self, reversed: bool) -> Result<()> {
        if reversed == self.reversed {
            return Ok(());
        }
        let mut indices = self.view.physical_indices().to_vec();
        indices.reverse();
        self.view = VirtualSubchannel::new(self.view.parent().clone(), indices)?;
        self.reversed = reversed;
        Ok(())
    }

    /// Blend from `start` at logical pixel 0 to `end` at the last pixel
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_gradient(&mut self, start: Rgb, end: Rgb) -> Result<()> {
        let count = self.view.pixel_count();
        let span = count.saturating_sub(1).max(1);
        for pixel in 0..count {
            let t = (pixel * 255 / span) as u8;
            self.view.set_pixel_rgb(pixel, sample_palette(&[start, end], t))?;
        }
        Ok(())
    }

    /// Spread one turn of the color wheel along the strip
    pub fn rainbow(&mut self) -> Result<()> {
        self.draw_rainbow(0)
    }

    fn draw_rainbow(&mut self, offset: u8) -> Result<()> {
        let count = self.view.pixel_count();
        for (pixel, color) in rainbow(count, offset).into_iter().enumerate() {
            self.view.set_pixel_rgb(pixel, color)?;
        }
        Ok(())
    }

    /// Rotate the rainbow along the strip, 256 steps per cycle
    #[allow(clippy::cast_possible_truncation)]
    pub fn rainbow_cycle(&mut self, cycles: u32, speed_ms: u64, cancel: &CancelToken) -> Result<()> {
        let frames = cycles.saturating_mul(256);
        timing::run_for_frames(frames, Duration::from_millis(speed_ms), cancel, |frame, _| {
            self.draw_rainbow(frame as u8)?;
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Soft peak travelling past both ends, `waves` times over `speed_ms`
    /// each
    #[allow(clippy::cast_precision_loss)]
    pub fn wave(&mut self, color: Rgb, waves: u32, speed_ms: u64, cancel: &CancelToken) -> Result<()> {
        let count = self.view.pixel_count();
        let steps = count * 2;
        let frames = waves.saturating_mul(u32::try_from(steps).unwrap_or(u32::MAX));
        let step_delay = Duration::from_micros(speed_ms * 1000 / steps.max(1) as u64);

        timing::run_for_frames(frames, step_delay, cancel, |frame, _| {
            let peak = frame as usize % steps;
            self.view.clear()?;
            for pixel in 0..count {
                let distance = pixel.abs_diff(peak);
                if distance < WAVE_REACH {
                    let level = 1.0 - distance as f32 / WAVE_REACH as f32;
                    self.view.set_pixel_rgb(pixel, dim(color, level))?;
                }
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        self.view.clear()?;
        self.view.show()
    }

    /// Light `density` random pixels per frame over fading older ones
    pub fn sparkle(
        &mut self,
        rng: &mut Rng,
        color: Rgb,
        duration_ms: u64,
        density: usize,
        cancel: &CancelToken,
    ) -> Result<()> {
        let count = self.view.pixel_count();
        if count == 0 {
            return Ok(());
        }
        let frames = u32::try_from(duration_ms / FLICKER_FRAME_MS).unwrap_or(u32::MAX);

        timing::run_for_frames(frames, Duration::from_millis(FLICKER_FRAME_MS), cancel, |_, _| {
            for _ in 0..density {
                self.view.set_pixel_rgb(rng.usize(..count), color)?;
            }
            self.view.show()?;
            fade_lit(&mut self.view, SPARKLE_FADE)?;
            Ok(FrameControl::Continue)
        })?;
        self.view.clear()?;
        self.view.show()
    }

    /// Grow outwards from the middle pixel until both ends are lit
    pub fn center_out(&mut self, color: Rgb, speed_ms: u64, cancel: &CancelToken) -> Result<()> {
        let count = self.view.pixel_count();
        let center = count / 2;
        let frames = u32::try_from(center + 1).unwrap_or(u32::MAX);
        let step_delay = Duration::from_micros(speed_ms * 1000 / u64::from(frames));

        timing::run_for_frames(frames, step_delay, cancel, |frame, _| {
            let reach = frame as usize;
            self.view.set_pixel_rgb(center - reach, color)?;
            if center + reach < count {
                self.view.set_pixel_rgb(center + reach, color)?;
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Clear, then close in from both ends to the middle
    pub fn edges_in(&mut self, color: Rgb, speed_ms: u64, cancel: &CancelToken) -> Result<()> {
        let count = self.view.pixel_count();
        let frames = u32::try_from(count / 2 + 1).unwrap_or(u32::MAX);
        let step_delay = Duration::from_micros(speed_ms * 1000 / u64::from(frames));

        self.view.clear()?;
        timing::run_for_frames(frames, step_delay, cancel, |frame, _| {
            let reach = frame as usize;
            if reach < count {
                self.view.set_pixel_rgb(reach, color)?;
                self.view.set_pixel_rgb(count - 1 - reach, color)?;
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Every `spacing`-th pixel lit, crawling one pixel per frame
    pub fn theater_chase(
        &mut self,
        color: Rgb,
        spacing: usize,
        cycles: u32,
        speed_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let spacing = spacing.max(1);
        let frames = cycles.saturating_mul(u32::try_from(spacing).unwrap_or(u32::MAX));
        timing::run_for_frames(frames, Duration::from_millis(speed_ms), cancel, |frame, _| {
            draw_theater(&mut self.view, frame as usize % spacing, spacing, color)?;
            Ok(FrameControl::Continue)
        })?;
        self.view.clear()?;
        self.view.show()
    }

    /// Random embers: each pixel gets heat 80-255 as red with 2/5 green
    #[allow(clippy::cast_possible_truncation)]
    pub fn fire(&mut self, rng: &mut Rng, duration_ms: u64, cancel: &CancelToken) -> Result<()> {
        let count = self.view.pixel_count();
        let frames = u32::try_from(duration_ms / FLICKER_FRAME_MS).unwrap_or(u32::MAX);

        timing::run_for_frames(frames, Duration::from_millis(FLICKER_FRAME_MS), cancel, |_, _| {
            for pixel in 0..count {
                let heat = rng.u8(80..=255);
                let ember = Rgb {
                    r: heat,
                    g: (u16::from(heat) * 2 / 5) as u8,
                    b: 0,
                };
                self.view.set_pixel_rgb(pixel, ember)?;
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Run `comets` comets off the far end one after another, then blank
    pub fn comet(
        &mut self,
        color: Rgb,
        comets: u32,
        tail_length: usize,
        cancel: &CancelToken,
    ) -> Result<()> {
        let count = self.view.pixel_count();
        let pass = count + tail_length;
        let frames = comets.saturating_mul(u32::try_from(pass).unwrap_or(u32::MAX));

        timing::run_for_frames(frames, Duration::from_millis(COMET_FRAME_MS), cancel, |frame, _| {
            let head = frame as usize % pass;
            self.view.clear()?;
            for t in 0..tail_length {
                if let Some(pixel) = head.checked_sub(t).filter(|&pixel| pixel < count) {
                    self.view.set_pixel_rgb(pixel, dim(color, tail_level(t, tail_length)))?;
                }
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        self.view.clear()?;
        self.view.show()
    }
}
