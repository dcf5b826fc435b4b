//! Adapter over any `smart-leds` writer.

use smart_leds::{RGB8, SmartLedsWrite, brightness};

use super::PixelDriver;
use crate::{
    channel::{ColorOrder, DEFAULT_DEVICE_PATH},
    color::{PackedColor, pack_rgbw, rgb_from_u32},
    error::DriverError,
};

/// Driver that buffers packed pixels and flushes them through a
/// [`SmartLedsWrite`] implementation on `show`.
///
/// Global brightness is applied with `smart_leds::brightness` at flush time.
/// The writer owns the wire protocol, including channel order; the white
/// byte of a packed color is not sent.
pub struct SmartLedsDriver<W> {
    writer: W,
    buffer: Vec<PackedColor>,
    brightness: u8,
    color_order: ColorOrder,
    device_path: String,
}

impl<W> SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    pub fn new(writer: W, pixel_count: usize) -> Self {
        Self {
            writer,
            buffer: vec![0; pixel_count],
            brightness: 255,
            color_order: ColorOrder::default(),
            device_path: DEFAULT_DEVICE_PATH.into(),
        }
    }

    pub fn color_order(&self) -> ColorOrder {
        self.color_order
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Give the writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> PixelDriver for SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    fn begin(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn show(&mut self) -> Result<(), DriverError> {
        let pixels = self.buffer.iter().map(|&packed| rgb_from_u32(packed));
        self.writer
            .write(brightness(pixels, self.brightness))
            .map_err(|err| DriverError::Write(format!("{err:?}")))
    }

    fn update_length(&mut self, pixel_count: usize) -> Result<(), DriverError> {
        self.buffer.resize(pixel_count, 0);
        Ok(())
    }

    fn update_color_order(&mut self, order: ColorOrder) -> Result<(), DriverError> {
        self.color_order = order;
        Ok(())
    }

    fn set_device_path(&mut self, path: &str) -> Result<(), DriverError> {
        path.clone_into(&mut self.device_path);
        Ok(())
    }

    fn set_pixel_color(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        self.set_pixel_packed(index, pack_rgbw(RGB8 { r, g, b }, w));
    }

    fn set_pixel_packed(&mut self, index: usize, color: PackedColor) {
        if let Some(pixel) = self.buffer.get_mut(index) {
            *pixel = color;
        }
    }

    fn fill(&mut self, color: PackedColor, first: usize, count: usize) {
        let end = first.saturating_add(count).min(self.buffer.len());
        if first < end {
            self.buffer[first..end].fill(color);
        }
    }

    fn pixel_color(&self, index: usize) -> PackedColor {
        self.buffer.get(index).copied().unwrap_or(0)
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn pixel_count(&self) -> usize {
        self.buffer.len()
    }

    fn clear(&mut self) {
        self.buffer.fill(0);
    }
}
