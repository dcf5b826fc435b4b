use embassy_time::Duration;

use crate::{
    Error, Result,
    channel::{Channel, SharedChannel, VirtualSubchannel},
    color::{BLACK, Rgb, dim, fade_by, hue_wheel},
    timing::{self, CancelToken, FrameControl},
};

/// Pixels on the jewel's outer ring.
const JEWEL_RING: usize = 6;

/// Brightness step of a center pulse on the 0-255 scale.
const PULSE_STEP: u8 = 5;

/// Frames in one pulse: 0 to 255 and back in steps of 5, both ends included.
const PULSE_FRAMES: u32 = 2 * (255 / PULSE_STEP as u32 + 1);

/// Frames of an expand or collapse: the center plus each ring pixel.
const SWEEP_FRAMES: u32 = JEWEL_RING as u32 + 1;

/// Jewel remapped so the ring comes first.
///
/// Logical pixels 0-5 walk the ring, logical pixel 6 is the center.
pub struct LightJewel {
    view: VirtualSubchannel,
}

impl LightJewel {
    pub fn new(parent: SharedChannel) -> Result<Self> {
        let view = VirtualSubchannel::new(parent, vec![1, 2, 3, 4, 5, 6, 0])?;
        Ok(Self { view })
    }

    /// The remapped 7-pixel channel
    pub fn channel(&mut self) -> &mut VirtualSubchannel {
        &mut self.view
    }

    pub fn set_center(&mut self, color: Rgb) -> Result<()> {
        self.view.set_pixel_rgb(JEWEL_RING, color)
    }

    pub fn fill_ring(&mut self, color: Rgb) -> Result<()> {
        for position in 0..JEWEL_RING {
            self.view.set_pixel_rgb(position, color)?;
        }
        Ok(())
    }

    /// Set one ring pixel, `position` in 0-5
    pub fn set_ring_pixel(&mut self, position: usize, color: Rgb) -> Result<()> {
        if position >= JEWEL_RING {
            return Err(Error::IndexOutOfRange {
                index: position,
                len: JEWEL_RING,
            });
        }
        self.view.set_pixel_rgb(position, color)
    }

    /// Spread the color wheel around the ring
    #[allow(clippy::cast_possible_truncation)]
    pub fn rainbow_ring(&mut self) -> Result<()> {
        for position in 0..JEWEL_RING {
            let hue = (position * 255 / JEWEL_RING) as u8;
            self.view.set_pixel_rgb(position, hue_wheel(hue))?;
        }
        Ok(())
    }

    /// Walk a single lit pixel around the ring `rotations` times
    pub fn spin_ring(
        &mut self,
        color: Rgb,
        rotations: u32,
        speed_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let steps = rotations.saturating_mul(6);
        timing::run_for_frames(steps, Duration::from_millis(speed_ms), cancel, |step, _| {
            self.fill_ring(BLACK)?;
            self.view.set_pixel_rgb(step as usize % JEWEL_RING, color)?;
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Chase a fading tail around the ring, then blank it
    #[allow(clippy::cast_precision_loss)]
    pub fn chase_ring(
        &mut self,
        color: Rgb,
        tail_length: usize,
        cycles: u32,
        speed_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let steps = cycles.saturating_mul(6);
        let tail = tail_length.max(1);
        timing::run_for_frames(steps, Duration::from_millis(speed_ms), cancel, |step, _| {
            self.fill_ring(BLACK)?;
            for t in 0..tail {
                let position = (step as usize + JEWEL_RING * tail - t) % JEWEL_RING;
                let level = 1.0 - t as f32 / tail as f32;
                self.view.set_pixel_rgb(position, dim(color, level))?;
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        self.fill_ring(BLACK)?;
        self.view.show()
    }

    /// Pulse the center up to `color` and back to black `cycles` times,
    /// each pulse taking about `duration_ms`
    #[allow(clippy::cast_possible_truncation)]
    pub fn pulse_center(
        &mut self,
        color: Rgb,
        cycles: u32,
        duration_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let frames = cycles.saturating_mul(PULSE_FRAMES);
        let step_delay = Duration::from_micros(duration_ms * 1000 / u64::from(PULSE_FRAMES));
        let half = PULSE_FRAMES / 2;

        timing::run_for_frames(frames, step_delay, cancel, |frame, _| {
            let step = frame % PULSE_FRAMES;
            let rung = if step < half { step } else { PULSE_FRAMES - 1 - step };
            let level = (rung * u32::from(PULSE_STEP)) as u8;
            self.set_center(fade_by(color, level))?;
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Light the center, then the ring pixel by pixel
    pub fn expand_out(
        &mut self,
        center: Rgb,
        ring: Rgb,
        speed_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let step_delay = Duration::from_millis(speed_ms / u64::from(SWEEP_FRAMES));
        timing::run_for_frames(SWEEP_FRAMES, step_delay, cancel, |frame, _| {
            match frame as usize {
                0 => {
                    self.view.clear()?;
                    self.set_center(center)?;
                }
                position => self.view.set_pixel_rgb(position - 1, ring)?,
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Blank the ring from the last pixel back, then leave the center at
    /// `center`
    pub fn collapse_in(&mut self, center: Rgb, speed_ms: u64, cancel: &CancelToken) -> Result<()> {
        let step_delay = Duration::from_millis(speed_ms / u64::from(SWEEP_FRAMES));
        timing::run_for_frames(SWEEP_FRAMES, step_delay, cancel, |frame, _| {
            let frame = frame as usize;
            if frame < JEWEL_RING {
                self.view.set_pixel_rgb(JEWEL_RING - 1 - frame, BLACK)?;
            } else {
                self.set_center(center)?;
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_frames_span_both_ramps() {
        assert_eq!(PULSE_FRAMES, 104);
        let half = PULSE_FRAMES / 2;
        let rung = |step: u32| if step < half { step } else { PULSE_FRAMES - 1 - step };
        assert_eq!(rung(0) * 5, 0);
        assert_eq!(rung(half - 1) * 5, 255);
        assert_eq!(rung(half) * 5, 255);
        assert_eq!(rung(PULSE_FRAMES - 1) * 5, 0);
    }
}
