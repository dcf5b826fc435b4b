//! Driver seam between channels and hardware.
//!
//! A [`PixelDriver`] owns one physical device: its pixel buffer, its global
//! brightness register and whatever wire protocol pushes bytes out. Channels
//! bounds-check every index before calling into the driver.

mod memory;
mod writer;

pub use memory::{MemoryDriver, MemoryProbe};
pub use writer::SmartLedsDriver;

use crate::{channel::ColorOrder, color::PackedColor, error::DriverError};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Channels are generic over this trait.
pub trait PixelDriver {
    /// Prepare the device for output
    fn begin(&mut self) -> Result<(), DriverError>;

    /// Push the buffer to the device
    fn show(&mut self) -> Result<(), DriverError>;

    /// Resize the pixel buffer
    fn update_length(&mut self, pixel_count: usize) -> Result<(), DriverError>;

    /// Change the wire-level color order
    fn update_color_order(&mut self, order: ColorOrder) -> Result<(), DriverError>;

    /// Point the driver at another device node
    fn set_device_path(&mut self, path: &str) -> Result<(), DriverError>;

    fn set_pixel_color(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8);

    /// Store a raw packed value
    fn set_pixel_packed(&mut self, index: usize, color: PackedColor);

    fn fill(&mut self, color: PackedColor, first: usize, count: usize);

    fn pixel_color(&self, index: usize) -> PackedColor;

    fn set_brightness(&mut self, brightness: u8);

    fn brightness(&self) -> u8;

    fn pixel_count(&self) -> usize;

    /// Zero the buffer (not pushed until `show`)
    fn clear(&mut self);
}
