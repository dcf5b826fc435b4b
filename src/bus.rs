//! Name-keyed registry of channels with per-name and broadcast dispatch.

use std::rc::Rc;

use crate::{
    Error, Result,
    channel::{Channel, ColorOrder, SharedChannel},
    color::PackedColor,
};

/// Name used when a bus is built around a single channel.
pub const DEFAULT_CHANNEL_NAME: &str = "default";

/// Channel operation that can be dispatched by name or broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOp {
    SetPixel {
        index: usize,
        color: PackedColor,
    },
    SetPixelComponents {
        index: usize,
        r: u8,
        g: u8,
        b: u8,
        w: u8,
    },
    Fill {
        color: PackedColor,
        first: usize,
        count: usize,
    },
    Clear,
    Show,
    SetBrightness(u8),
    Rotate(isize),
    Reverse,
    FadeIn(u64),
    FadeOut(u64),
    UpdateLength(usize),
    UpdateColorOrder(ColorOrder),
    SetDevicePath(String),
}

impl ChannelOp {
    /// Fill the whole channel
    pub const fn fill(color: PackedColor) -> Self {
        Self::Fill {
            color,
            first: 0,
            count: 0,
        }
    }

    /// Apply this operation to one channel
    pub fn apply(&self, channel: &mut dyn Channel) -> Result<()> {
        match self {
            Self::SetPixel { index, color } => channel.set_pixel(*index, *color),
            Self::SetPixelComponents { index, r, g, b, w } => {
                channel.set_pixel_components(*index, *r, *g, *b, *w)
            }
            Self::Fill {
                color,
                first,
                count,
            } => channel.fill(*color, *first, *count),
            Self::Clear => channel.clear(),
            Self::Show => channel.show(),
            Self::SetBrightness(brightness) => channel.set_brightness(*brightness),
            Self::Rotate(positions) => channel.rotate(*positions),
            Self::Reverse => channel.reverse(),
            Self::FadeIn(duration_ms) => channel.fade_in(*duration_ms),
            Self::FadeOut(duration_ms) => channel.fade_out(*duration_ms),
            Self::UpdateLength(pixel_count) => channel.update_length(*pixel_count),
            Self::UpdateColorOrder(order) => channel.update_color_order(*order),
            Self::SetDevicePath(path) => channel.set_device_path(path),
        }
    }
}

/// Registry of named channels, physical or virtual.
///
/// Broadcasts walk the channels in registration order, one device at a
/// time, with no atomicity across devices.
#[derive(Default)]
pub struct PixelBus {
    channels: Vec<(String, SharedChannel)>,
}

impl PixelBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus over a batch of named channels
    pub fn from_channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = (S, SharedChannel)>,
        S: Into<String>,
    {
        let mut bus = Self::new();
        for (name, channel) in channels {
            bus.add_channel(name, channel);
        }
        bus
    }

    /// Bus holding one channel under [`DEFAULT_CHANNEL_NAME`]
    pub fn single(channel: SharedChannel) -> Self {
        Self::from_channels([(DEFAULT_CHANNEL_NAME, channel)])
    }

    /// Register `channel` under `name`, replacing any channel already there
    pub fn add_channel(&mut self, name: impl Into<String>, channel: SharedChannel) -> &mut Self {
        let name = name.into();
        tracing::debug!(%name, "adding channel to bus");
        match self.channels.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = channel,
            None => self.channels.push((name, channel)),
        }
        self
    }

    /// Drop the entry for `name`, returning its channel
    pub fn remove_channel(&mut self, name: &str) -> Option<SharedChannel> {
        let position = self.channels.iter().position(|(existing, _)| existing == name)?;
        tracing::debug!(name, "removing channel from bus");
        Some(self.channels.remove(position).1)
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.iter().any(|(existing, _)| existing == name)
    }

    pub fn channel(&self, name: &str) -> Option<SharedChannel> {
        self.channels
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, channel)| Rc::clone(channel))
    }

    /// Names in registration order
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Run `op` on the channel registered as `name`
    pub fn dispatch(&self, name: &str, op: &ChannelOp) -> Result<()> {
        let channel = self
            .channel(name)
            .ok_or_else(|| Error::ChannelNotFound(name.into()))?;
        op.apply(&mut *channel.borrow_mut())
    }

    /// Run `op` on every channel in registration order.
    ///
    /// A failing channel does not stop the others; the first error is
    /// returned once every channel has been tried.
    pub fn broadcast(&self, op: &ChannelOp) -> Result<()> {
        let mut first_error = None;
        for (name, channel) in &self.channels {
            if let Err(err) = op.apply(&mut *channel.borrow_mut()) {
                tracing::debug!(%name, %err, "broadcast failed on channel");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn fill_all(&self, color: PackedColor) -> Result<&Self> {
        self.broadcast(&ChannelOp::fill(color))?;
        Ok(self)
    }

    pub fn clear_all(&self) -> Result<&Self> {
        self.broadcast(&ChannelOp::Clear)?;
        Ok(self)
    }

    pub fn show_all(&self) -> Result<&Self> {
        self.broadcast(&ChannelOp::Show)?;
        Ok(self)
    }

    pub fn set_brightness_all(&self, brightness: u8) -> Result<&Self> {
        self.broadcast(&ChannelOp::SetBrightness(brightness))?;
        Ok(self)
    }
}
