//! Logical pixel channels.
//!
//! A [`Channel`] is anything addressable as a zero-based run of pixels: a
//! [`PhysicalChannel`] owning a device, or a [`VirtualSubchannel`] mapping
//! its logical indices onto part of a parent channel. Effects and the bus
//! only ever see this trait.

mod config;
mod partition;
mod physical;
mod subchannel;

use std::{cell::RefCell, rc::Rc};

pub use config::{
    ChannelConfig, ColorOrder, DEFAULT_DEVICE_PATH, SPI_DEVICE_PATHS, spi_device_path,
};
pub use partition::SubchannelMap;
pub use physical::PhysicalChannel;
pub use subchannel::VirtualSubchannel;

use crate::{
    Result,
    color::{PackedColor, Rgb, pack_rgb, pack_rgbw, rgb_from_u32},
    timing::{self, CancelToken, FrameControl},
};

/// A channel shared between a bus, subchannel views and effect runs.
pub type SharedChannel = Rc<RefCell<dyn Channel>>;

/// Wrap a channel for sharing
pub fn share<C: Channel + 'static>(channel: C) -> SharedChannel {
    Rc::new(RefCell::new(channel))
}

/// Frame spacing used by brightness fades (about 50 steps per second).
const FADE_STEP_MS: u64 = 20;

/// What sits behind a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    /// Owns a device and its driver
    Physical,
    /// A view over part of another channel
    Subchannel,
}

/// Uniform pixel addressing contract.
///
/// Buffer writes become visible only at [`Channel::show`]. Out-of-range
/// indices are reported as [`Error::IndexOutOfRange`](crate::Error), never
/// clamped.
pub trait Channel {
    fn kind(&self) -> ChannelKind;

    fn is_subchannel(&self) -> bool {
        self.kind() == ChannelKind::Subchannel
    }

    fn pixel_count(&self) -> usize;

    /// Store a raw `0xWWRRGGBB` value
    fn set_pixel(&mut self, index: usize, color: PackedColor) -> Result<()>;

    fn pixel(&self, index: usize) -> Result<PackedColor>;

    /// Pack and store individual components
    fn set_pixel_components(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) -> Result<()> {
        self.set_pixel(index, pack_rgbw(Rgb { r, g, b }, w))
    }

    /// Fill `count` pixels from `first`; a count of 0 fills to the end
    fn fill(&mut self, color: PackedColor, first: usize, count: usize) -> Result<()>;

    /// Every pixel in logical order
    fn pixels(&self) -> Result<Vec<PackedColor>>;

    /// Zero the buffer
    fn clear(&mut self) -> Result<()>;

    /// Push the buffer to the device
    fn show(&mut self) -> Result<()>;

    fn set_brightness(&mut self, brightness: u8) -> Result<()>;

    fn brightness(&self) -> u8;

    fn update_length(&mut self, pixel_count: usize) -> Result<()>;

    fn update_color_order(&mut self, order: ColorOrder) -> Result<()>;

    fn set_device_path(&mut self, path: &str) -> Result<()>;

    fn set_pixel_rgb(&mut self, index: usize, color: Rgb) -> Result<()> {
        self.set_pixel(index, pack_rgb(color))
    }

    fn pixel_rgb(&self, index: usize) -> Result<Rgb> {
        self.pixel(index).map(rgb_from_u32)
    }

    fn fill_rgb(&mut self, color: Rgb) -> Result<()> {
        self.fill(pack_rgb(color), 0, 0)
    }

    /// Rotate the pixel sequence by `positions`.
    ///
    /// Positive values move the tail to the front: the pixel at
    /// `count - n` ends up at index 0. Negative values rotate the other way.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn rotate(&mut self, positions: isize) -> Result<()> {
        let count = self.pixel_count();
        if count <= 1 {
            return Ok(());
        }
        let shift = positions.rem_euclid(count as isize) as usize;
        if shift == 0 {
            return Ok(());
        }

        let mut pixels = self.pixels()?;
        pixels.rotate_right(shift);
        for (index, color) in pixels.into_iter().enumerate() {
            self.set_pixel(index, color)?;
        }
        Ok(())
    }

    /// Reverse the pixel sequence in place
    fn reverse(&mut self) -> Result<()> {
        let pixels = self.pixels()?;
        for (index, color) in pixels.into_iter().rev().enumerate() {
            self.set_pixel(index, color)?;
        }
        Ok(())
    }

    /// Ramp brightness from its current value to 255, showing every step
    fn fade_in(&mut self, duration_ms: u64) -> Result<()> {
        self.fade_brightness(255, duration_ms, &CancelToken::new())
    }

    /// Ramp brightness from its current value to 0, showing every step
    fn fade_out(&mut self, duration_ms: u64) -> Result<()> {
        self.fade_brightness(0, duration_ms, &CancelToken::new())
    }

    /// Linear brightness ramp to `target` over `duration_ms`.
    ///
    /// Uses one step per 20 ms (at least one step) and calls `show` on each.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn fade_brightness(
        &mut self,
        target: u8,
        duration_ms: u64,
        cancel: &CancelToken,
    ) -> Result<()> {
        let steps = (duration_ms / FADE_STEP_MS).max(1);
        let step_delay = embassy_time::Duration::from_millis(duration_ms / steps);
        let start = i64::from(self.brightness());
        let delta = i64::from(target) - start;
        let frames = u32::try_from(steps + 1).unwrap_or(u32::MAX);

        timing::run_for_frames(frames, step_delay, cancel, |step, _| {
            let level = start + delta * i64::from(step) / steps as i64;
            self.set_brightness(level.clamp(0, 255) as u8)?;
            self.show()?;
            Ok(FrameControl::Continue)
        })?;
        Ok(())
    }
}
