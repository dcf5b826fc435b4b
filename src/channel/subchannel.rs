use super::{Channel, ChannelKind, ColorOrder, SharedChannel};
use crate::{Error, Result, color::PackedColor};

/// Zero-based logical view over selected pixels of a parent channel.
///
/// Logical index `i` addresses physical index `physical_indices[i]` on the
/// parent. Only addressing is translated: brightness and `show` act on the
/// parent as a whole, so changing brightness through one subchannel changes
/// it for the entire device and every sibling view.
pub struct VirtualSubchannel {
    parent: SharedChannel,
    physical_indices: Vec<usize>,
}

impl VirtualSubchannel {
    /// Build a view over `parent`.
    ///
    /// Every mapped index must exist on the parent. No pixel or driver state
    /// is touched.
    pub fn new(parent: SharedChannel, physical_indices: Vec<usize>) -> Result<Self> {
        let pixel_count = parent.borrow().pixel_count();
        if let Some(&index) = physical_indices.iter().find(|&&index| index >= pixel_count) {
            return Err(Error::MappingOutOfRange { index, pixel_count });
        }
        Ok(Self {
            parent,
            physical_indices,
        })
    }

    pub fn parent(&self) -> &SharedChannel {
        &self.parent
    }

    pub fn physical_indices(&self) -> &[usize] {
        &self.physical_indices
    }

    /// Translate a logical index to the parent's index space
    pub fn physical_index(&self, index: usize) -> Result<usize> {
        self.physical_indices
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.physical_indices.len(),
            })
    }
}

impl Channel for VirtualSubchannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Subchannel
    }

    fn pixel_count(&self) -> usize {
        self.physical_indices.len()
    }

    fn set_pixel(&mut self, index: usize, color: PackedColor) -> Result<()> {
        let physical = self.physical_index(index)?;
        self.parent.borrow_mut().set_pixel(physical, color)
    }

    fn pixel(&self, index: usize) -> Result<PackedColor> {
        let physical = self.physical_index(index)?;
        self.parent.borrow().pixel(physical)
    }

    fn set_pixel_components(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) -> Result<()> {
        let physical = self.physical_index(index)?;
        self.parent
            .borrow_mut()
            .set_pixel_components(physical, r, g, b, w)
    }

    fn fill(&mut self, color: PackedColor, first: usize, count: usize) -> Result<()> {
        let len = self.physical_indices.len();
        let end = if count == 0 {
            len
        } else {
            first.saturating_add(count).min(len)
        };
        let mut parent = self.parent.borrow_mut();
        for &physical in self.physical_indices.get(first..end).unwrap_or_default() {
            parent.set_pixel(physical, color)?;
        }
        Ok(())
    }

    /// Fails if the parent has shrunk below a mapped index
    fn pixels(&self) -> Result<Vec<PackedColor>> {
        let parent = self.parent.borrow();
        self.physical_indices
            .iter()
            .map(|&physical| parent.pixel(physical))
            .collect()
    }

    /// Zero only the mapped pixels; the rest of the parent is untouched
    fn clear(&mut self) -> Result<()> {
        self.fill(0, 0, 0)
    }

    fn show(&mut self) -> Result<()> {
        self.parent.borrow_mut().show()
    }

    /// Sets the parent's brightness, shared by every view of the device
    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        self.parent.borrow_mut().set_brightness(brightness)
    }

    fn brightness(&self) -> u8 {
        self.parent.borrow().brightness()
    }

    fn update_length(&mut self, _pixel_count: usize) -> Result<()> {
        Err(Error::SubchannelReconfigure {
            operation: "length",
        })
    }

    fn update_color_order(&mut self, _order: ColorOrder) -> Result<()> {
        Err(Error::SubchannelReconfigure {
            operation: "color order",
        })
    }

    fn set_device_path(&mut self, _path: &str) -> Result<()> {
        Err(Error::SubchannelReconfigure {
            operation: "device path",
        })
    }
}
