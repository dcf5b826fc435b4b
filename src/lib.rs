//! Addressable LED channels, virtual subchannels over shared devices, a
//! name-keyed multi-device bus and a library of blocking animation effects.

pub mod animation;
pub mod bus;
pub mod channel;
pub mod color;
pub mod driver;
pub mod effect;
pub mod error;
pub mod math8;
pub mod random;
pub mod shape;
pub mod timing;

pub use animation::{
    Animation, AnimationCategory, AnimationId, AnimationRegistry, Discovery, Effect,
    EffectContext, OptionValue, Options,
};
pub use bus::{ChannelOp, PixelBus};
pub use channel::{
    Channel, ChannelConfig, ChannelKind, ColorOrder, PhysicalChannel, SharedChannel,
    SubchannelMap, VirtualSubchannel, share,
};
pub use driver::{MemoryDriver, MemoryProbe, PixelDriver, SmartLedsDriver};
pub use error::{DriverError, Error, Result};
pub use shape::{DoubleDots, LightJewel, Lollipop, RgbStrip, SplitJewel};
pub use timing::{CancelToken, FrameControl, LoopExit, Timer};

pub use color::{Hsv, PackedColor, Rgb};
pub use embassy_time::{Duration, Instant};
