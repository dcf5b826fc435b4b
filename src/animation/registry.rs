use std::{collections::BTreeMap, rc::Rc};

use super::{Animation, AnimationId};
use crate::{Error, Result, effect};

/// Builds a fresh animation instance.
pub type AnimationConstructor = fn() -> Rc<dyn Animation>;

/// How [`AnimationRegistry::initialize`] fills the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Discovery {
    /// Every built-in effect
    #[default]
    Auto,
    /// The fixed [`MANUAL_ANIMATIONS`] list
    Manual,
}

/// Animations registered by [`Discovery::Manual`].
pub const MANUAL_ANIMATIONS: [AnimationId; 19] = [
    AnimationId::Static,
    AnimationId::Blink,
    AnimationId::Breathe,
    AnimationId::Wipe,
    AnimationId::WipeRandom,
    AnimationId::RandomColors,
    AnimationId::Sweep,
    AnimationId::Dynamic,
    AnimationId::Colorloop,
    AnimationId::Rainbow,
    AnimationId::Scan,
    AnimationId::ScanDual,
    AnimationId::Fade,
    AnimationId::TheaterChase,
    AnimationId::TheaterChaseRainbow,
    AnimationId::Sparkle,
    AnimationId::Strobe,
    AnimationId::BlinkRainbow,
    AnimationId::MeteorShower,
];

/// Table of animation constructors with memoized instances.
///
/// `create` hands out the same instance for an id until the registry is
/// cleared or re-initialized.
#[derive(Default)]
pub struct AnimationRegistry {
    constructors: BTreeMap<AnimationId, AnimationConstructor>,
    instances: BTreeMap<AnimationId, Rc<dyn Animation>>,
}

impl AnimationRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in effect
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.initialize(Discovery::Auto);
        registry
    }

    /// Register `constructor` under `id`, replacing any previous entry.
    ///
    /// The constructor is called once up front; an instance reporting a
    /// different id is refused.
    pub fn register(&mut self, id: AnimationId, constructor: AnimationConstructor) -> Result<()> {
        let reported = constructor().id();
        if reported != id {
            return Err(Error::Registration {
                id: id.as_str().into(),
                reason: format!("constructor builds {reported}"),
            });
        }

        tracing::debug!(animation = id.as_str(), "animation registered");
        self.instances.remove(&id);
        self.constructors.insert(id, constructor);
        Ok(())
    }

    /// Register a default-constructible animation type
    pub fn register_type<A: Animation + Default + 'static>(&mut self, id: AnimationId) -> Result<()> {
        self.register(id, || -> Rc<dyn Animation> { Rc::new(A::default()) })
    }

    /// Register every entry, stopping at the first refusal
    pub fn register_batch<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (AnimationId, AnimationConstructor)>,
    {
        for (id, constructor) in entries {
            self.register(id, constructor)?;
        }
        Ok(())
    }

    /// The instance for `id`, built on first use
    pub fn create(&mut self, id: AnimationId) -> Result<Rc<dyn Animation>> {
        if let Some(instance) = self.instances.get(&id) {
            return Ok(Rc::clone(instance));
        }

        let constructor = self
            .constructors
            .get(&id)
            .ok_or_else(|| Error::AnimationNotFound(id.as_str().into()))?;
        let instance = constructor();
        self.instances.insert(id, Rc::clone(&instance));
        Ok(instance)
    }

    /// Look up by textual id, e.g. `"theater_chase"`
    pub fn create_by_name(&mut self, name: &str) -> Result<Rc<dyn Animation>> {
        let id = AnimationId::parse_from_str(name)
            .ok_or_else(|| Error::AnimationNotFound(name.into()))?;
        self.create(id)
    }

    pub fn has(&self, id: AnimationId) -> bool {
        self.constructors.contains_key(&id)
    }

    /// Registered ids in catalogue order
    pub fn registered_ids(&self) -> Vec<AnimationId> {
        self.constructors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Drop every constructor and cached instance
    pub fn clear(&mut self) {
        self.constructors.clear();
        self.instances.clear();
    }

    /// Replace the table according to `discovery`.
    ///
    /// Returns the number of animations registered.
    pub fn initialize(&mut self, discovery: Discovery) -> usize {
        self.clear();
        let ids: &[AnimationId] = match discovery {
            Discovery::Auto => &AnimationId::ALL,
            Discovery::Manual => &MANUAL_ANIMATIONS,
        };
        for &id in ids {
            self.constructors.insert(id, effect::builtin(id));
        }

        tracing::debug!(?discovery, count = self.len(), "animation registry initialized");
        self.len()
    }
}

impl core::fmt::Debug for AnimationRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("registered", &self.registered_ids())
            .field("instances", &self.instances.len())
            .finish()
    }
}
