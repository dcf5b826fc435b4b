//! Ready-made layouts for common pixel devices.
//!
//! Partition shapes ([`SplitJewel`], [`Lollipop`]) hand out cached
//! subchannels. View shapes ([`LightJewel`], [`DoubleDots`], [`RgbStrip`])
//! wrap a single remapped view and add blocking helpers for that device.

mod double_dots;
mod light_jewel;
mod strip;

use std::{cell::RefCell, rc::Rc};

pub use double_dots::DoubleDots;
pub use light_jewel::LightJewel;
pub use strip::RgbStrip;

use crate::{
    Result,
    channel::{SharedChannel, SubchannelMap, VirtualSubchannel},
};

/// Pixels on a 7-LED jewel (one center pixel, six around it).
pub const JEWEL_PIXELS: usize = 7;

/// Pixels on a lollipop: a jewel on top of a six-pixel stick.
pub const LOLLIPOP_PIXELS: usize = 13;

/// Jewel split into a center subchannel and a ring subchannel.
pub struct SplitJewel {
    map: SubchannelMap,
}

impl SplitJewel {
    pub fn new(parent: SharedChannel) -> Result<Self> {
        let mut map = SubchannelMap::new(parent, vec![vec![0], (1..JEWEL_PIXELS).collect()]);
        // Validate the mapping against the parent up front.
        map.subchannels()?;
        Ok(Self { map })
    }

    pub fn center(&mut self) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        self.map.subchannel(0)
    }

    pub fn ring(&mut self) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        self.map.subchannel(1)
    }

    pub fn map(&mut self) -> &mut SubchannelMap {
        &mut self.map
    }
}

/// Jewel head plus stick, each split into two interleaved halves.
pub struct Lollipop {
    map: SubchannelMap,
}

impl Lollipop {
    pub fn new(parent: SharedChannel) -> Result<Self> {
        let mut map = SubchannelMap::new(
            parent,
            vec![
                vec![0, 1, 3, 5],
                vec![2, 4, 6],
                vec![7, 9, 11],
                vec![8, 10, 12],
            ],
        );
        map.subchannels()?;
        Ok(Self { map })
    }

    pub fn jewel_a(&mut self) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        self.map.subchannel(0)
    }

    pub fn jewel_b(&mut self) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        self.map.subchannel(1)
    }

    pub fn stick_a(&mut self) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        self.map.subchannel(2)
    }

    pub fn stick_b(&mut self) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        self.map.subchannel(3)
    }

    pub fn map(&mut self) -> &mut SubchannelMap {
        &mut self.map
    }
}
