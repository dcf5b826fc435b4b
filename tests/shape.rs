mod tests {
    use std::rc::Rc;

    use myrtio_pixel_channels::{
        CancelToken, Channel, DoubleDots, Error, LightJewel, MemoryDriver, MemoryProbe,
        PackedColor, PhysicalChannel, RgbStrip, SharedChannel,
        color::{BLACK, BLUE, GREEN, RED, Rgb, pack_rgb, rgb_from_u32},
        share,
    };

    fn recording(pixel_count: usize) -> (SharedChannel, MemoryProbe) {
        let driver = MemoryDriver::recording(pixel_count);
        let output = driver.probe();
        let channel = PhysicalChannel::new(driver).unwrap();
        (share(channel), output)
    }

    fn lit(frame: &[PackedColor]) -> usize {
        frame.iter().filter(|&&pixel| pixel != 0).count()
    }

    #[test]
    fn test_jewel_pulse_leaves_ring_alone() {
        let (device, output) = recording(7);
        let mut jewel = LightJewel::new(Rc::clone(&device)).unwrap();
        jewel.fill_ring(BLUE).unwrap();

        jewel.pulse_center(RED, 1, 104, &CancelToken::new()).unwrap();

        let frames = output.frames();
        assert_eq!(frames.len(), 104);
        let levels: Vec<u8> = frames
            .iter()
            .map(|frame| {
                assert!(frame[1..].iter().all(|&pixel| pixel == pack_rgb(BLUE)));
                let center = rgb_from_u32(frame[0]);
                assert_eq!((center.g, center.b), (0, 0));
                center.r
            })
            .collect();

        assert_eq!(levels[0], 0);
        assert_eq!(levels[51], 255);
        assert_eq!(levels[52], 255);
        assert_eq!(levels[103], 0);
        assert!(levels[..52].windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(levels[52..].windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_jewel_expand_then_collapse() {
        let (device, output) = recording(7);
        let mut jewel = LightJewel::new(Rc::clone(&device)).unwrap();
        jewel.channel().fill_rgb(GREEN).unwrap();
        let cancel = CancelToken::new();

        jewel.expand_out(RED, BLUE, 7, &cancel).unwrap();
        let frames = output.frames();
        assert_eq!(frames.len(), 7);
        for (index, frame) in frames.iter().enumerate() {
            assert_eq!(frame[0], pack_rgb(RED));
            for physical in 1..7 {
                let expected = if physical <= index { pack_rgb(BLUE) } else { 0 };
                assert_eq!(frame[physical], expected, "frame {index} pixel {physical}");
            }
        }

        jewel.set_center(BLACK).unwrap();
        jewel.collapse_in(GREEN, 7, &cancel).unwrap();
        let frames = output.frames();
        let collapse = &frames[7..];
        assert_eq!(collapse.len(), 7);
        for (index, frame) in collapse[..6].iter().enumerate() {
            assert_eq!(frame[0], 0);
            assert_eq!(lit(frame), 5 - index, "frame {index}");
            assert_eq!(frame[6 - index], 0);
        }
        let mut last = vec![0; 7];
        last[0] = pack_rgb(GREEN);
        assert_eq!(collapse[6], last);
    }

    #[test]
    fn test_double_dots_needs_two_pixels() {
        let (device, _output) = recording(1);
        assert!(matches!(
            DoubleDots::new(device),
            Err(Error::MappingOutOfRange {
                index: 1,
                pixel_count: 1
            })
        ));
    }

    #[test]
    fn test_double_dots_sides() {
        let (device, _output) = recording(3);
        let mut dots = DoubleDots::new(Rc::clone(&device)).unwrap();

        dots.split(RED, GREEN).unwrap();
        assert_eq!(device.borrow().pixel(0).unwrap(), pack_rgb(RED));
        assert_eq!(device.borrow().pixel(1).unwrap(), pack_rgb(GREEN));

        dots.opposite(RED).unwrap();
        assert_eq!(
            device.borrow().pixel(1).unwrap(),
            pack_rgb(Rgb { r: 0, g: 255, b: 255 })
        );

        dots.mirror(BLUE).unwrap();
        assert_eq!(dots.channel().pixels().unwrap(), vec![pack_rgb(BLUE); 2]);
        assert_eq!(device.borrow().pixel(2).unwrap(), 0);
    }

    #[test]
    fn test_double_dots_alternate_and_spin() {
        let (device, output) = recording(3);
        let mut dots = DoubleDots::new(Rc::clone(&device)).unwrap();
        device.borrow_mut().set_pixel(2, pack_rgb(BLUE)).unwrap();
        let cancel = CancelToken::new();
        let red = pack_rgb(RED);
        let blue = pack_rgb(BLUE);

        dots.alternate(RED, 2, 1, &cancel).unwrap();
        assert_eq!(
            output.frames(),
            vec![
                vec![red, 0, blue],
                vec![0, red, blue],
                vec![red, 0, blue],
                vec![0, red, blue],
                vec![0, 0, blue],
            ]
        );

        dots.spin(RED, 1, 4, &cancel).unwrap();
        assert_eq!(
            output.frames()[5..],
            [
                vec![red, 0, blue],
                vec![red, red, blue],
                vec![0, red, blue],
                vec![0, 0, blue],
            ]
        );
    }

    #[test]
    fn test_double_dots_crossfade_trades_colors() {
        let (device, output) = recording(2);
        let mut dots = DoubleDots::new(device).unwrap();

        dots.crossfade(RED, BLUE, 1, 50, &CancelToken::new()).unwrap();

        let frames = output.frames();
        assert_eq!(frames.len(), 51);
        assert_eq!(frames[0], vec![pack_rgb(RED), pack_rgb(BLUE)]);
        assert_eq!(frames[50], vec![pack_rgb(BLUE), pack_rgb(RED)]);
        let middle = rgb_from_u32(frames[25][0]);
        assert!(middle.r > 0 && middle.b > 0, "{middle:?}");
    }

    #[test]
    fn test_strip_reversal_remaps_logical_pixels() {
        let (device, _output) = recording(5);
        let mut strip = RgbStrip::new(Rc::clone(&device)).unwrap();
        assert!(!strip.is_reversed());

        strip.set_reversed(true).unwrap();
        assert!(strip.is_reversed());
        strip.channel().set_pixel_rgb(0, RED).unwrap();
        assert_eq!(device.borrow().pixel(4).unwrap(), pack_rgb(RED));

        strip.flip().unwrap();
        assert!(!strip.is_reversed());
        strip.channel().set_pixel_rgb(0, GREEN).unwrap();
        assert_eq!(device.borrow().pixel(0).unwrap(), pack_rgb(GREEN));
        assert_eq!(device.borrow().pixel(4).unwrap(), pack_rgb(RED));
    }

    #[test]
    fn test_strip_gradient_hits_both_ends() {
        let (device, _output) = recording(5);
        let mut strip = RgbStrip::new(Rc::clone(&device)).unwrap();

        strip.fill_gradient(RED, BLUE).unwrap();
        let pixels = strip.channel().pixels().unwrap();
        assert_eq!(pixels[0], pack_rgb(RED));
        assert_eq!(pixels[4], pack_rgb(BLUE));
        let reds: Vec<u8> = pixels.iter().map(|&pixel| rgb_from_u32(pixel).r).collect();
        assert!(reds.windows(2).all(|pair| pair[0] > pair[1]), "{reds:?}");

        strip.set_reversed(true).unwrap();
        strip.fill_gradient(RED, BLUE).unwrap();
        assert_eq!(device.borrow().pixel(0).unwrap(), pack_rgb(BLUE));
        assert_eq!(device.borrow().pixel(4).unwrap(), pack_rgb(RED));

        let (single, _output) = recording(1);
        let mut one = RgbStrip::new(single).unwrap();
        one.fill_gradient(GREEN, BLUE).unwrap();
        assert_eq!(one.channel().pixel(0).unwrap(), pack_rgb(GREEN));
    }

    #[test]
    fn test_strip_center_out_and_edges_in() {
        let (device, output) = recording(5);
        let mut strip = RgbStrip::new(device).unwrap();
        let cancel = CancelToken::new();

        strip.center_out(RED, 3, &cancel).unwrap();
        let counts: Vec<usize> = output.frames().iter().map(|frame| lit(frame)).collect();
        assert_eq!(counts, vec![1, 3, 5]);
        assert_eq!(output.frames()[0][2], pack_rgb(RED));

        strip.edges_in(GREEN, 3, &cancel).unwrap();
        let frames = output.frames();
        let green = pack_rgb(GREEN);
        assert_eq!(frames[3], vec![green, 0, 0, 0, green]);
        assert_eq!(frames[4], vec![green, green, 0, green, green]);
        assert_eq!(frames[5], vec![green; 5]);
    }

    #[test]
    fn test_strip_theater_chase_and_comet_end_blank() {
        let (device, output) = recording(5);
        let mut strip = RgbStrip::new(device).unwrap();
        let cancel = CancelToken::new();
        let red = pack_rgb(RED);

        strip.theater_chase(RED, 2, 1, 1, &cancel).unwrap();
        assert_eq!(
            output.frames(),
            vec![
                vec![red, 0, red, 0, red],
                vec![0, red, 0, red, 0],
                vec![0; 5],
            ]
        );

        strip.comet(RED, 1, 2, &cancel).unwrap();
        let frames = output.frames();
        let comet = &frames[3..];
        assert_eq!(comet.len(), 5 + 2 + 1);
        for (head, frame) in comet[..5].iter().enumerate() {
            assert_eq!(frame[head], red, "frame {head}");
            assert_eq!(lit(frame), head.min(1) + 1);
        }
        assert_eq!(comet[7], vec![0; 5]);
    }

    #[test]
    fn test_strip_fire_embers_and_sparkle_fades_out() {
        let (device, output) = recording(6);
        let mut strip = RgbStrip::new(device).unwrap();
        let mut rng = fastrand::Rng::with_seed(11);
        let cancel = CancelToken::new();

        strip.fire(&mut rng, 100, &cancel).unwrap();
        let frames = output.frames();
        assert_eq!(frames.len(), 2);
        for &pixel in frames.iter().flatten() {
            let ember = rgb_from_u32(pixel);
            assert!(ember.r >= 80, "{ember:?}");
            assert_eq!(u16::from(ember.g), u16::from(ember.r) * 2 / 5);
            assert_eq!(ember.b, 0);
        }

        strip.sparkle(&mut rng, BLUE, 100, 2, &cancel).unwrap();
        let frames = output.frames();
        assert_eq!(frames.len(), 2 + 2 + 1);
        assert!(lit(&frames[2]) >= 1);
        assert_eq!(frames[4], vec![0; 6]);
    }

    #[test]
    fn test_cancelled_shape_loop_shows_nothing() {
        let (device, output) = recording(5);
        let mut strip = RgbStrip::new(device).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        strip.rainbow_cycle(1, 1, &cancel).unwrap();
        assert!(output.frames().is_empty());
    }
}
