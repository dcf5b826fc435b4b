use embassy_time::Duration;

use crate::{
    Result,
    channel::{Channel, SharedChannel, VirtualSubchannel},
    color::{BLACK, Rgb, blend_colors},
    math8::unit_to_u8,
    timing::{self, CancelToken, FrameControl},
};

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// Frames in one crossfade, both end colors included.
const CROSSFADE_FRAMES: u32 = 51;

/// Channel-wise inverse of `color`
const fn invert(color: Rgb) -> Rgb {
    Rgb {
        r: 255 - color.r,
        g: 255 - color.g,
        b: 255 - color.b,
    }
}

/// Two-pixel device such as a fan or a dual indicator.
///
/// Views physical pixels 0 (left) and 1 (right) of the parent.
pub struct DoubleDots {
    view: VirtualSubchannel,
}

impl DoubleDots {
    pub fn new(parent: SharedChannel) -> Result<Self> {
        let view = VirtualSubchannel::new(parent, vec![LEFT, RIGHT])?;
        Ok(Self { view })
    }

    /// The 2-pixel channel
    pub fn channel(&mut self) -> &mut VirtualSubchannel {
        &mut self.view
    }

    pub fn set_left(&mut self, color: Rgb) -> Result<()> {
        self.view.set_pixel_rgb(LEFT, color)
    }

    pub fn set_right(&mut self, color: Rgb) -> Result<()> {
        self.view.set_pixel_rgb(RIGHT, color)
    }

    /// Same color on both pixels
    pub fn mirror(&mut self, color: Rgb) -> Result<()> {
        self.view.fill_rgb(color)
    }

    pub fn split(&mut self, left: Rgb, right: Rgb) -> Result<()> {
        self.set_left(left)?;
        self.set_right(right)
    }

    /// `color` on the left and its inverse on the right
    pub fn opposite(&mut self, color: Rgb) -> Result<()> {
        self.split(color, invert(color))
    }

    /// Swap the lit side every `delay_ms` for `cycles` round trips, then
    /// blank
    pub fn alternate(
        &mut self,
        color: Rgb,
        cycles: u32,
        delay_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        self.swap_sides(color, cycles, delay_ms, cancel)
    }

    /// Ping-pong the lit side `bounces` times, then blank
    pub fn bounce(
        &mut self,
        color: Rgb,
        bounces: u32,
        delay_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        self.swap_sides(color, bounces, delay_ms, cancel)
    }

    fn swap_sides(
        &mut self,
        color: Rgb,
        rounds: u32,
        delay_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let frames = rounds.saturating_mul(2);
        timing::run_for_frames(frames, Duration::from_millis(delay_ms), cancel, |frame, _| {
            if frame % 2 == 0 {
                self.split(color, BLACK)?;
            } else {
                self.split(BLACK, color)?;
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        self.view.clear()?;
        self.view.show()
    }

    /// Left, both, right, off: one quarter of `speed_ms` each, per rotation
    pub fn spin(
        &mut self,
        color: Rgb,
        rotations: u32,
        speed_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let frames = rotations.saturating_mul(4);
        let step_delay = Duration::from_micros(speed_ms * 1000 / 4);
        timing::run_for_frames(frames, step_delay, cancel, |frame, _| {
            match frame % 4 {
                0 => self.split(color, BLACK)?,
                1 => self.mirror(color)?,
                2 => self.split(BLACK, color)?,
                _ => self.view.clear()?,
            }
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }

    /// Trade `a` and `b` between the two pixels, `cycles` times
    #[allow(clippy::cast_precision_loss)]
    pub fn crossfade(
        &mut self,
        a: Rgb,
        b: Rgb,
        cycles: u32,
        duration_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let frames = cycles.saturating_mul(CROSSFADE_FRAMES);
        let step_delay =
            Duration::from_micros(duration_ms * 1000 / u64::from(CROSSFADE_FRAMES - 1));
        let last = (CROSSFADE_FRAMES - 1) as f32;

        timing::run_for_frames(frames, step_delay, cancel, |frame, _| {
            let amount = unit_to_u8((frame % CROSSFADE_FRAMES) as f32 / last);
            self.split(blend_colors(a, b, amount), blend_colors(b, a, amount))?;
            self.view.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{RED, WHITE};

    #[test]
    fn test_invert() {
        assert_eq!(invert(RED), Rgb { r: 0, g: 255, b: 255 });
        assert_eq!(invert(WHITE), BLACK);
        assert_eq!(invert(Rgb { r: 10, g: 20, b: 30 }), Rgb { r: 245, g: 235, b: 225 });
    }
}
