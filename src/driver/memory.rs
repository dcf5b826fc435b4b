//! In-memory driver for tests and dry runs.

use std::{cell::RefCell, rc::Rc};

use super::PixelDriver;
use crate::{
    channel::{ColorOrder, DEFAULT_DEVICE_PATH},
    color::{PackedColor, pack_rgbw},
    error::DriverError,
};

#[derive(Debug, Default)]
struct MemoryState {
    buffer: Vec<PackedColor>,
    brightness: u8,
    color_order: ColorOrder,
    device_path: String,
    begin_count: usize,
    show_count: usize,
    shown: Vec<PackedColor>,
    shown_brightness: u8,
    history: Option<Vec<Vec<PackedColor>>>,
}

/// Driver that keeps every pixel in memory and records what was shown.
#[derive(Debug)]
pub struct MemoryDriver {
    state: Rc<RefCell<MemoryState>>,
}

/// Read-only view into a [`MemoryDriver`] that outlives the driver itself.
#[derive(Debug, Clone)]
pub struct MemoryProbe {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryDriver {
    pub fn new(pixel_count: usize) -> Self {
        let state = MemoryState {
            buffer: vec![0; pixel_count],
            brightness: 255,
            device_path: DEFAULT_DEVICE_PATH.into(),
            ..MemoryState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Driver that also keeps a copy of every shown frame
    pub fn recording(pixel_count: usize) -> Self {
        let driver = Self::new(pixel_count);
        driver.state.borrow_mut().history = Some(Vec::new());
        driver
    }

    pub fn probe(&self) -> MemoryProbe {
        MemoryProbe {
            state: Rc::clone(&self.state),
        }
    }
}

impl MemoryProbe {
    pub fn begin_count(&self) -> usize {
        self.state.borrow().begin_count
    }

    pub fn show_count(&self) -> usize {
        self.state.borrow().show_count
    }

    /// Pixels pushed by the most recent `show`
    pub fn shown(&self) -> Vec<PackedColor> {
        self.state.borrow().shown.clone()
    }

    /// Every shown frame in order; empty unless the driver was built with
    /// [`MemoryDriver::recording`]
    pub fn frames(&self) -> Vec<Vec<PackedColor>> {
        self.state.borrow().history.clone().unwrap_or_default()
    }

    /// Brightness at the most recent `show`
    pub fn shown_brightness(&self) -> u8 {
        self.state.borrow().shown_brightness
    }

    /// Current buffer, including writes not yet shown
    pub fn buffer(&self) -> Vec<PackedColor> {
        self.state.borrow().buffer.clone()
    }

    pub fn device_path(&self) -> String {
        self.state.borrow().device_path.clone()
    }

    pub fn color_order(&self) -> ColorOrder {
        self.state.borrow().color_order
    }
}

impl PixelDriver for MemoryDriver {
    fn begin(&mut self) -> Result<(), DriverError> {
        self.state.borrow_mut().begin_count += 1;
        Ok(())
    }

    fn show(&mut self) -> Result<(), DriverError> {
        let mut state = self.state.borrow_mut();
        state.shown = state.buffer.clone();
        state.shown_brightness = state.brightness;
        state.show_count += 1;
        let frame = state.shown.clone();
        if let Some(history) = state.history.as_mut() {
            history.push(frame);
        }
        Ok(())
    }

    fn update_length(&mut self, pixel_count: usize) -> Result<(), DriverError> {
        self.state.borrow_mut().buffer.resize(pixel_count, 0);
        Ok(())
    }

    fn update_color_order(&mut self, order: ColorOrder) -> Result<(), DriverError> {
        self.state.borrow_mut().color_order = order;
        Ok(())
    }

    fn set_device_path(&mut self, path: &str) -> Result<(), DriverError> {
        self.state.borrow_mut().device_path = path.into();
        Ok(())
    }

    fn set_pixel_color(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        self.set_pixel_packed(index, pack_rgbw(smart_leds::RGB8 { r, g, b }, w));
    }

    fn set_pixel_packed(&mut self, index: usize, color: PackedColor) {
        if let Some(pixel) = self.state.borrow_mut().buffer.get_mut(index) {
            *pixel = color;
        }
    }

    fn fill(&mut self, color: PackedColor, first: usize, count: usize) {
        let mut state = self.state.borrow_mut();
        let len = state.buffer.len();
        let end = first.saturating_add(count).min(len);
        if first < end {
            state.buffer[first..end].fill(color);
        }
    }

    fn pixel_color(&self, index: usize) -> PackedColor {
        self.state.borrow().buffer.get(index).copied().unwrap_or(0)
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.state.borrow_mut().brightness = brightness;
    }

    fn brightness(&self) -> u8 {
        self.state.borrow().brightness
    }

    fn pixel_count(&self) -> usize {
        self.state.borrow().buffer.len()
    }

    fn clear(&mut self) {
        self.state.borrow_mut().buffer.fill(0);
    }
}
