//! Error types shared by channels, the bus, the registry and the drivers.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by the channel, bus and animation layers.
#[derive(Debug, Error)]
pub enum Error {
    /// A logical pixel index outside the channel.
    #[error("pixel index {index} out of bounds ({})", interval(.len))]
    IndexOutOfRange { index: usize, len: usize },

    /// A subchannel id outside the partition.
    #[error("subchannel {id} not defined, available subchannels: {}", interval(.count))]
    SubchannelNotDefined { id: usize, count: usize },

    /// A subchannel mapping that points past the end of its parent.
    #[error("physical index {index} is outside the parent channel of {pixel_count} pixels")]
    MappingOutOfRange { index: usize, pixel_count: usize },

    /// Device-identity changes are refused on subchannels.
    #[error("cannot update {operation} of virtual subchannel, this would affect the parent device")]
    SubchannelReconfigure { operation: &'static str },

    /// A physical channel must hold at least one pixel.
    #[error("invalid pixel count {0}, a channel holds at least one pixel")]
    InvalidLength(usize),

    /// No channel registered on the bus under this name.
    #[error("pixel channel {0} not found")]
    ChannelNotFound(String),

    /// No effect registered under this animation id.
    #[error("no animation registered for {0}")]
    AnimationNotFound(String),

    /// The registered constructor does not produce a matching effect.
    #[error("cannot register animation {id}: {reason}")]
    Registration { id: String, reason: String },

    /// An option was supplied with a value of the wrong kind.
    #[error("option {key} expects {expected}")]
    InvalidOption { key: String, expected: &'static str },

    /// The effect refused to run on this channel.
    #[error("animation {id} is not compatible with a channel of {pixel_count} pixels")]
    Incompatible { id: &'static str, pixel_count: usize },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Errors reported by a [`PixelDriver`](crate::driver::PixelDriver).
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("device i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("pixel write failed: {0}")]
    Write(String),

    #[error("operation not supported by this driver: {0}")]
    Unsupported(&'static str),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn interval(len: &usize) -> String {
    match *len {
        0 => "none".into(),
        len => format!("0-{}", len - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_interval() {
        let err = Error::SubchannelNotDefined { id: 4, count: 2 };
        assert_eq!(
            err.to_string(),
            "subchannel 4 not defined, available subchannels: 0-1"
        );

        let err = Error::IndexOutOfRange { index: 3, len: 0 };
        assert_eq!(err.to_string(), "pixel index 3 out of bounds (none)");
    }
}
