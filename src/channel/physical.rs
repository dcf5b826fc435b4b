use super::{Channel, ChannelConfig, ChannelKind, ColorOrder};
use crate::{Error, Result, color::PackedColor, driver::PixelDriver};

/// Channel that owns one physical device through its driver.
///
/// Dropping the channel blanks the device: the buffer is cleared and shown
/// once more. Failures during that teardown are logged and swallowed.
pub struct PhysicalChannel<D: PixelDriver> {
    driver: D,
}

impl<D: PixelDriver> PhysicalChannel<D> {
    /// Take ownership of `driver` and start it
    pub fn new(mut driver: D) -> Result<Self> {
        let pixel_count = driver.pixel_count();
        if pixel_count == 0 {
            return Err(Error::InvalidLength(0));
        }
        driver.begin()?;
        tracing::debug!(pixel_count, "physical channel opened");
        Ok(Self { driver })
    }

    /// Apply `config` to `driver`, then start it
    pub fn with_config(mut driver: D, config: &ChannelConfig) -> Result<Self> {
        if config.pixel_count == 0 {
            return Err(Error::InvalidLength(0));
        }
        driver.update_length(config.pixel_count)?;
        driver.update_color_order(config.color_order)?;
        driver.set_device_path(&config.device_path)?;
        driver.set_brightness(config.brightness);
        tracing::debug!(
            device_path = %config.device_path,
            color_order = config.color_order.as_str(),
            "applying channel config"
        );
        Self::new(driver)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.driver.pixel_count();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(())
    }
}

impl<D: PixelDriver> Channel for PhysicalChannel<D> {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Physical
    }

    fn pixel_count(&self) -> usize {
        self.driver.pixel_count()
    }

    fn set_pixel(&mut self, index: usize, color: PackedColor) -> Result<()> {
        self.check_index(index)?;
        self.driver.set_pixel_packed(index, color);
        Ok(())
    }

    fn pixel(&self, index: usize) -> Result<PackedColor> {
        self.check_index(index)?;
        Ok(self.driver.pixel_color(index))
    }

    fn set_pixel_components(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) -> Result<()> {
        self.check_index(index)?;
        self.driver.set_pixel_color(index, r, g, b, w);
        Ok(())
    }

    fn fill(&mut self, color: PackedColor, first: usize, count: usize) -> Result<()> {
        let len = self.driver.pixel_count();
        if first >= len {
            return Ok(());
        }
        let count = if count == 0 { len - first } else { count.min(len - first) };
        self.driver.fill(color, first, count);
        Ok(())
    }

    fn pixels(&self) -> Result<Vec<PackedColor>> {
        Ok((0..self.driver.pixel_count())
            .map(|index| self.driver.pixel_color(index))
            .collect())
    }

    fn clear(&mut self) -> Result<()> {
        self.driver.clear();
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.driver.show()?;
        Ok(())
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        self.driver.set_brightness(brightness);
        Ok(())
    }

    fn brightness(&self) -> u8 {
        self.driver.brightness()
    }

    fn update_length(&mut self, pixel_count: usize) -> Result<()> {
        if pixel_count == 0 {
            return Err(Error::InvalidLength(pixel_count));
        }
        self.driver.update_length(pixel_count)?;
        Ok(())
    }

    fn update_color_order(&mut self, order: ColorOrder) -> Result<()> {
        self.driver.update_color_order(order)?;
        Ok(())
    }

    fn set_device_path(&mut self, path: &str) -> Result<()> {
        self.driver.set_device_path(path)?;
        Ok(())
    }
}

impl<D: PixelDriver> Drop for PhysicalChannel<D> {
    fn drop(&mut self) {
        self.driver.clear();
        if let Err(err) = self.driver.show() {
            tracing::warn!(%err, "failed to blank device on teardown");
        }
        tracing::debug!("physical channel closed");
    }
}
