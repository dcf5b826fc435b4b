mod tests {
    use std::rc::Rc;

    use myrtio_pixel_channels::{
        Animation, AnimationCategory, AnimationId, AnimationRegistry, Channel, Discovery,
        EffectContext, Error, Options, Result,
        animation::{AnimationConstructor, MANUAL_ANIMATIONS},
        effect,
    };

    #[derive(Default)]
    struct Solid;

    impl Animation for Solid {
        fn id(&self) -> AnimationId {
            AnimationId::Static
        }

        fn default_options(&self) -> Options {
            Options::new()
        }

        fn is_compatible(&self, _channel: &dyn Channel) -> bool {
            true
        }

        fn run(
            &self,
            _ctx: &mut EffectContext,
            channel: &mut dyn Channel,
            _duration_ms: u64,
            _options: &Options,
        ) -> Result<()> {
            channel.fill(1, 0, 0)?;
            channel.show()
        }
    }

    #[test]
    fn test_auto_discovery_registers_every_builtin() {
        let mut registry = AnimationRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.initialize(Discovery::Auto), 39);
        assert_eq!(registry.registered_ids(), AnimationId::ALL.to_vec());

        for id in AnimationId::ALL {
            assert_eq!(registry.create(id).unwrap().id(), id);
        }
    }

    #[test]
    fn test_builtin_table_is_consistent() {
        let mut seen = std::collections::BTreeSet::new();
        for id in AnimationId::ALL {
            assert!(seen.insert(id), "{id} listed twice");
            assert_eq!(effect::builtin(id)().id(), id);
        }

        let mut registry = AnimationRegistry::new();
        registry.initialize(Discovery::Auto);
        assert_eq!(registry.initialize(Discovery::Auto), AnimationId::ALL.len());
    }

    #[test]
    fn test_manual_discovery() {
        let mut registry = AnimationRegistry::with_builtins();
        assert_eq!(registry.initialize(Discovery::Manual), 19);
        for id in MANUAL_ANIMATIONS {
            assert!(registry.has(id));
        }
        assert!(!registry.has(AnimationId::Gradient));
        assert!(matches!(
            registry.create(AnimationId::Gradient),
            Err(Error::AnimationNotFound(_))
        ));
    }

    #[test]
    fn test_instances_are_memoized() {
        let mut registry = AnimationRegistry::with_builtins();
        let first = registry.create(AnimationId::Comet).unwrap();
        let second = registry.create_by_name("comet").unwrap();
        assert!(Rc::ptr_eq(&first, &second));

        registry.clear();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.create(AnimationId::Comet),
            Err(Error::AnimationNotFound(ref name)) if name == "comet"
        ));
    }

    #[test]
    fn test_unknown_name() {
        let mut registry = AnimationRegistry::with_builtins();
        assert!(matches!(
            registry.create_by_name("plasma"),
            Err(Error::AnimationNotFound(ref name)) if name == "plasma"
        ));
    }

    #[test]
    fn test_register_refuses_mismatched_constructor() {
        let mut registry = AnimationRegistry::new();
        let err = registry
            .register(AnimationId::Blink, effect::builtin(AnimationId::Static))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Registration { ref id, .. } if id == "blink"));
        assert!(!registry.has(AnimationId::Blink));
    }

    #[test]
    fn test_register_replaces_cached_instance() {
        let mut registry = AnimationRegistry::with_builtins();
        let builtin = registry.create(AnimationId::Static).unwrap();

        registry.register_type::<Solid>(AnimationId::Static).unwrap();
        let replaced = registry.create(AnimationId::Static).unwrap();
        assert!(!Rc::ptr_eq(&builtin, &replaced));
        assert!(replaced.default_options().is_empty());
        assert_eq!(registry.len(), 39);
    }

    #[test]
    fn test_register_batch() {
        let mut registry = AnimationRegistry::new();
        let entries: [(AnimationId, AnimationConstructor); 2] = [
            (AnimationId::Saw, effect::builtin(AnimationId::Saw)),
            (AnimationId::Rain, effect::builtin(AnimationId::Rain)),
        ];
        registry.register_batch(entries).unwrap();
        assert_eq!(
            registry.registered_ids(),
            vec![AnimationId::Saw, AnimationId::Rain]
        );
    }

    #[test]
    fn test_animation_ids() {
        assert_eq!(
            AnimationId::parse_from_str("theater_chase_rainbow"),
            Some(AnimationId::TheaterChaseRainbow)
        );
        assert_eq!(AnimationId::parse_from_str("TheaterChase"), None);
        assert_eq!(
            AnimationId::TheaterChaseRainbow.display_name(),
            "Theater Chase Rainbow"
        );
        assert_eq!(AnimationId::Wipe.to_string(), "wipe");

        for id in AnimationId::ALL {
            assert_eq!(AnimationId::parse_from_str(id.as_str()), Some(id));
            assert!(!id.requires_2d());
            assert!(!id.requires_audio());
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(AnimationId::Static.category(), AnimationCategory::Basic);
        assert_eq!(
            AnimationId::BlinkRainbow.category(),
            AnimationCategory::SparkleTwinkle
        );
        assert_eq!(
            AnimationId::ChaseBlackout.category(),
            AnimationCategory::ChaseRunning
        );
        assert_eq!(AnimationId::FireFlicker.category(), AnimationCategory::FireHeat);
        assert_eq!(
            AnimationId::MeteorShower.category(),
            AnimationCategory::CometMeteor
        );
        assert_eq!(
            AnimationId::Dissolve.category().as_str(),
            "Physics & Simulation"
        );
        assert_eq!(
            AnimationId::Gradient.category(),
            AnimationCategory::GradientBlend
        );
    }

    #[test]
    fn test_builtin_metadata() {
        let mut registry = AnimationRegistry::with_builtins();
        let wipe = registry.create(AnimationId::Wipe).unwrap();
        assert_eq!(wipe.display_name(), "Wipe");
        assert!(wipe.default_options().contains_key("color"));
    }
}
