/// Device node used when none is configured.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/spidev0.0";

/// Every SPI bus / chip-select node a controller usually exposes.
pub const SPI_DEVICE_PATHS: [&str; 10] = [
    "/dev/spidev0.0",
    "/dev/spidev0.1",
    "/dev/spidev1.0",
    "/dev/spidev1.1",
    "/dev/spidev2.0",
    "/dev/spidev2.1",
    "/dev/spidev3.0",
    "/dev/spidev3.1",
    "/dev/spidev4.0",
    "/dev/spidev4.1",
];

/// Device node for an SPI bus and chip-select pair
pub fn spi_device_path(bus: u8, chip_select: u8) -> String {
    format!("/dev/spidev{bus}.{chip_select}")
}

const COLOR_ORDER_NAME_RGB: &str = "rgb";
const COLOR_ORDER_NAME_GRB: &str = "grb";
const COLOR_ORDER_NAME_RGBW: &str = "rgbw";
const COLOR_ORDER_NAME_GRBW: &str = "grbw";

/// Wire-level channel ordering, interpreted by the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Grb,
    Rgbw,
    Grbw,
}

impl ColorOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => COLOR_ORDER_NAME_RGB,
            Self::Grb => COLOR_ORDER_NAME_GRB,
            Self::Rgbw => COLOR_ORDER_NAME_RGBW,
            Self::Grbw => COLOR_ORDER_NAME_GRBW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            COLOR_ORDER_NAME_RGB => Some(Self::Rgb),
            COLOR_ORDER_NAME_GRB => Some(Self::Grb),
            COLOR_ORDER_NAME_RGBW => Some(Self::Rgbw),
            COLOR_ORDER_NAME_GRBW => Some(Self::Grbw),
            _ => None,
        }
    }

    /// Whether the device has a dedicated white emitter
    pub const fn has_white(self) -> bool {
        matches!(self, Self::Rgbw | Self::Grbw)
    }
}

/// Configuration applied to a driver when a physical channel opens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Number of pixels on the device (at least one)
    pub pixel_count: usize,
    /// Opaque device node handed to the driver
    pub device_path: String,
    pub color_order: ColorOrder,
    /// Initial global brightness
    pub brightness: u8,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            pixel_count: 1,
            device_path: DEFAULT_DEVICE_PATH.into(),
            color_order: ColorOrder::Rgb,
            brightness: 255,
        }
    }
}

impl ChannelConfig {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            pixel_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_device_path(mut self, path: impl Into<String>) -> Self {
        self.device_path = path.into();
        self
    }

    #[must_use]
    pub fn with_color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = order;
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }
}
