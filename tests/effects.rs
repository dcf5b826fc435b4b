mod tests {
    use std::{rc::Rc, thread, time::Duration as StdDuration};

    use embassy_time::Instant;
    use myrtio_pixel_channels::{
        Animation, AnimationId, AnimationRegistry, CancelToken, Channel, EffectContext, Error,
        MemoryDriver, MemoryProbe, Options, PhysicalChannel, VirtualSubchannel,
        animation::EffectOptions,
        color::{BLUE, RED, Rgb, pack_rgb},
        effect::{CometEffect, FadeOptions, StaticOptions, WipeEffect},
        share,
    };

    const RUN_MS: u64 = 120;

    /// Shorten the effects whose defaults outlast a short run
    fn quick_options(id: AnimationId) -> Options {
        match id {
            AnimationId::Dynamic | AnimationId::Dissolve | AnimationId::DissolveRandom => {
                Options::new().with("transition_ms", 30_u64)
            }
            AnimationId::Fade => Options::new().with("hold_time_ms", 10_u64),
            AnimationId::TheaterChase | AnimationId::TheaterChaseRainbow => {
                Options::new().with("speed_ms", 10_u64)
            }
            _ => Options::new(),
        }
    }

    fn open(pixel_count: usize) -> (PhysicalChannel<MemoryDriver>, MemoryProbe) {
        let driver = MemoryDriver::new(pixel_count);
        let probe = driver.probe();
        (PhysicalChannel::new(driver).unwrap(), probe)
    }

    #[test]
    fn test_every_builtin_ends_blank() {
        let mut registry = AnimationRegistry::with_builtins();
        let (mut channel, probe) = open(12);

        for id in AnimationId::ALL {
            let animation = registry.create(id).unwrap();
            let mut ctx = EffectContext::with_seed(7);
            animation
                .run(&mut ctx, &mut channel, RUN_MS, &quick_options(id))
                .unwrap_or_else(|err| panic!("{id} failed: {err}"));
            assert_eq!(probe.shown(), vec![0; 12], "{id} left pixels lit");
        }
    }

    #[test]
    fn test_every_builtin_stays_inside_subchannel() {
        let mut registry = AnimationRegistry::with_builtins();
        let (channel, probe) = open(16);
        let device = share(channel);
        device.borrow_mut().set_pixel_rgb(0, BLUE).unwrap();
        device.borrow_mut().set_pixel_rgb(15, BLUE).unwrap();
        let mut view = VirtualSubchannel::new(Rc::clone(&device), (4..12).collect()).unwrap();

        for id in AnimationId::ALL {
            let animation = registry.create(id).unwrap();
            assert!(animation.is_compatible(&view));
            let mut ctx = EffectContext::with_seed(11);
            animation
                .run(&mut ctx, &mut view, RUN_MS, &quick_options(id))
                .unwrap_or_else(|err| panic!("{id} failed: {err}"));

            let shown = probe.shown();
            assert_eq!(shown[0], pack_rgb(BLUE), "{id} wrote outside its view");
            assert_eq!(shown[15], pack_rgb(BLUE), "{id} wrote outside its view");
            assert!(shown[4..12].iter().all(|&pixel| pixel == 0));
        }
    }

    #[test]
    fn test_options_override_defaults() {
        let overrides = Options::new()
            .with("color", 0x0000_00FF_i64)
            .with("unknown", true);
        let resolved = StaticOptions::resolve(&overrides).unwrap();
        assert_eq!(resolved.color, BLUE);

        let fade = FadeOptions::resolve(&Options::new().with("curve", "linear")).unwrap();
        assert_eq!(fade.curve.as_str(), "linear");
        assert_eq!(fade.to, RED);

        let defaults = StaticOptions::default().to_options();
        let merged = Options::new().with("color", RED).merged_over(&defaults);
        assert_eq!(merged.len(), defaults.len());
        assert_eq!(
            merged.get("color"),
            Some(&myrtio_pixel_channels::OptionValue::Color(RED))
        );
    }

    #[test]
    fn test_mistyped_option_refused() {
        let (mut channel, _probe) = open(4);
        let options = Options::new().with("color", "red");
        let result = AnimationRegistry::with_builtins()
            .create(AnimationId::Static)
            .unwrap()
            .run(&mut EffectContext::new(), &mut channel, 10, &options);
        assert!(matches!(
            result,
            Err(Error::InvalidOption { ref key, .. }) if key == "color"
        ));

        assert!(FadeOptions::resolve(&Options::new().with("curve", "bounce")).is_err());
        assert!(StaticOptions::resolve(&Options::new().with("color", -1_i64)).is_err());
    }

    #[test]
    fn test_empty_color_lists_refused() {
        let (mut channel, _probe) = open(4);
        let mut registry = AnimationRegistry::with_builtins();
        let options = Options::new().with("colors", Vec::<Rgb>::new());

        for id in [AnimationId::Dissolve, AnimationId::Gradient] {
            let result = registry.create(id).unwrap().run(
                &mut EffectContext::new(),
                &mut channel,
                50,
                &options,
            );
            assert!(matches!(result, Err(Error::InvalidOption { .. })), "{id}");
        }
    }

    #[test]
    fn test_empty_view_is_incompatible() {
        let (channel, _probe) = open(4);
        let mut empty = VirtualSubchannel::new(share(channel), Vec::new()).unwrap();
        let comet = CometEffect;
        assert!(!comet.is_compatible(&empty));

        let result = comet.run(&mut EffectContext::new(), &mut empty, 50, &Options::new());
        assert!(matches!(
            result,
            Err(Error::Incompatible {
                id: "comet",
                pixel_count: 0
            })
        ));
    }

    #[test]
    fn test_precancelled_run_returns_blank() {
        let (mut channel, probe) = open(8);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut ctx = EffectContext::with_seed(1).with_cancel(cancel);
        assert!(ctx.is_cancelled());

        let started = Instant::now();
        CometEffect
            .run(&mut ctx, &mut channel, 10_000, &Options::new())
            .unwrap();
        assert!(started.elapsed().as_millis() < 1_000);
        assert_eq!(probe.shown(), vec![0; 8]);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let (mut channel, probe) = open(8);
        let cancel = CancelToken::new();
        let mut ctx = EffectContext::new().with_cancel(cancel.clone());

        let canceller = thread::spawn(move || {
            thread::sleep(StdDuration::from_millis(60));
            cancel.cancel();
        });

        let started = Instant::now();
        let rainbow = AnimationRegistry::with_builtins()
            .create(AnimationId::Rainbow)
            .unwrap();
        rainbow
            .run(&mut ctx, &mut channel, 10_000, &Options::new())
            .unwrap();
        canceller.join().unwrap();

        assert!(started.elapsed().as_millis() < 2_000);
        assert_eq!(probe.shown(), vec![0; 8]);
    }

    #[test]
    fn test_wipe_without_clear_leaves_channel_lit() {
        let (mut channel, probe) = open(5);
        let options = Options::new()
            .with("color", RED)
            .with("clear_after", false);
        WipeEffect
            .run(&mut EffectContext::new(), &mut channel, 50, &options)
            .unwrap();
        assert_eq!(probe.shown(), vec![pack_rgb(RED); 5]);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let run = |seed| {
            let (mut channel, probe) = open(10);
            let options = Options::new().with("transition_ms", 20_u64);
            let mut registry = AnimationRegistry::with_builtins();
            let dissolve = registry.create(AnimationId::DissolveRandom).unwrap();
            let mut ctx = EffectContext::with_seed(seed);
            dissolve.run(&mut ctx, &mut channel, 0, &options).unwrap();
            (probe.show_count(), ctx.rng().u64(..))
        };
        assert_eq!(run(42), run(42));
    }
}
