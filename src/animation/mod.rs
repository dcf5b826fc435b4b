//! Animation contract, typed options and the animation registry.
//!
//! Every effect implements [`Effect`] with a typed options struct. The
//! blanket [`Animation`] impl turns that into an object-safe contract taking
//! a loose [`Options`] map, which is what the registry hands out.

mod id;
mod options;
mod registry;

use embassy_time::Instant;
use fastrand::Rng;

pub use id::{AnimationCategory, AnimationId};
pub(crate) use options::effect_options;
pub use options::{EffectOptions, OptionField, OptionValue, Options};
pub use registry::{AnimationConstructor, AnimationRegistry, Discovery, MANUAL_ANIMATIONS};

use crate::{
    Error, Result,
    channel::Channel,
    timing::CancelToken,
};

/// Per-run state handed to effects: the cancellation token and the random
/// source.
#[derive(Debug)]
pub struct EffectContext {
    cancel: CancelToken,
    rng: Rng,
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectContext {
    /// Context with a fresh token and a clock-seeded generator
    pub fn new() -> Self {
        Self::with_seed(Instant::now().as_ticks())
    }

    /// Context with a deterministic generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cancel: CancelToken::new(),
            rng: Rng::with_seed(seed),
        }
    }

    /// Share an existing token, so the run can be stopped from outside
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A clone of the token; clones observe the same flag
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }
}

/// Object-safe animation contract.
pub trait Animation {
    fn id(&self) -> AnimationId;

    fn display_name(&self) -> String {
        self.id().display_name()
    }

    /// Every option with its default value
    fn default_options(&self) -> Options;

    fn is_compatible(&self, channel: &dyn Channel) -> bool;

    /// Run on `channel` for about `duration_ms`, blocking until done or
    /// cancelled. `options` override the defaults key by key.
    fn run(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &Options,
    ) -> Result<()>;
}

/// A built-in effect with typed options.
pub trait Effect {
    const ID: AnimationId;

    /// Smallest channel the effect can render on
    const MIN_PIXELS: usize = 1;

    type Options: EffectOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &Self::Options,
    ) -> Result<()>;
}

impl<E: Effect> Animation for E {
    fn id(&self) -> AnimationId {
        E::ID
    }

    fn default_options(&self) -> Options {
        E::Options::default().to_options()
    }

    fn is_compatible(&self, channel: &dyn Channel) -> bool {
        channel.pixel_count() >= E::MIN_PIXELS
    }

    fn run(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &Options,
    ) -> Result<()> {
        let resolved = E::Options::resolve(options)?;
        if !self.is_compatible(channel) {
            return Err(Error::Incompatible {
                id: E::ID.as_str(),
                pixel_count: channel.pixel_count(),
            });
        }

        tracing::debug!(
            animation = E::ID.as_str(),
            duration_ms,
            pixels = channel.pixel_count(),
            "animation started"
        );
        let result = self.run_with(ctx, channel, duration_ms, &resolved);
        tracing::debug!(
            animation = E::ID.as_str(),
            cancelled = ctx.is_cancelled(),
            ok = result.is_ok(),
            "animation finished"
        );
        result
    }
}
