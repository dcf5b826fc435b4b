mod tests {
    use myrtio_pixel_channels::{
        Channel, ChannelConfig, ChannelKind, ColorOrder, Error, MemoryDriver, MemoryProbe,
        PhysicalChannel,
        color::{RED, pack_rgb},
    };

    fn open(pixel_count: usize) -> (PhysicalChannel<MemoryDriver>, MemoryProbe) {
        let driver = MemoryDriver::new(pixel_count);
        let probe = driver.probe();
        let channel = PhysicalChannel::new(driver).expect("memory channel opens");
        (channel, probe)
    }

    fn numbered(channel: &mut dyn Channel) {
        for index in 0..channel.pixel_count() {
            channel.set_pixel(index, index as u32 + 1).unwrap();
        }
    }

    #[test]
    fn test_open_starts_driver() {
        let (channel, probe) = open(5);
        assert_eq!(probe.begin_count(), 1);
        assert_eq!(channel.kind(), ChannelKind::Physical);
        assert!(!channel.is_subchannel());
        assert_eq!(channel.pixel_count(), 5);
        assert_eq!(channel.pixels().unwrap(), vec![0; 5]);
    }

    #[test]
    fn test_zero_pixels_refused() {
        assert!(matches!(
            PhysicalChannel::new(MemoryDriver::new(0)),
            Err(Error::InvalidLength(0))
        ));
        assert!(matches!(
            PhysicalChannel::with_config(MemoryDriver::new(3), &ChannelConfig::new(0)),
            Err(Error::InvalidLength(0))
        ));
    }

    #[test]
    fn test_with_config_applies_settings() {
        let driver = MemoryDriver::new(1);
        let probe = driver.probe();
        let config = ChannelConfig::new(12)
            .with_device_path("/dev/spidev1.0")
            .with_color_order(ColorOrder::Grbw)
            .with_brightness(64);
        let channel = PhysicalChannel::with_config(driver, &config).unwrap();

        assert_eq!(channel.pixel_count(), 12);
        assert_eq!(channel.brightness(), 64);
        assert_eq!(probe.device_path(), "/dev/spidev1.0");
        assert_eq!(probe.color_order(), ColorOrder::Grbw);
    }

    #[test]
    fn test_writes_visible_only_after_show() {
        let (mut channel, probe) = open(5);
        channel.fill_rgb(RED).unwrap();
        assert_eq!(probe.buffer(), vec![pack_rgb(RED); 5]);
        assert_eq!(probe.show_count(), 0);

        channel.show().unwrap();
        assert_eq!(probe.shown(), vec![pack_rgb(RED); 5]);

        channel.clear().unwrap();
        channel.show().unwrap();
        assert_eq!(probe.shown(), vec![0; 5]);
        assert_eq!(probe.show_count(), 2);
    }

    #[test]
    fn test_out_of_range_index() {
        let (mut channel, _probe) = open(5);
        assert!(matches!(
            channel.set_pixel(5, 1),
            Err(Error::IndexOutOfRange { index: 5, len: 5 })
        ));
        assert!(matches!(
            channel.pixel(9),
            Err(Error::IndexOutOfRange { index: 9, len: 5 })
        ));
        assert!(channel.set_pixel_components(4, 1, 2, 3, 4).is_ok());
        assert_eq!(channel.pixel(4).unwrap(), 0x0401_0203);
    }

    #[test]
    fn test_partial_fill() {
        let (mut channel, _probe) = open(5);
        channel.fill(7, 1, 2).unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![0, 7, 7, 0, 0]);

        channel.fill(9, 3, 0).unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![0, 7, 7, 9, 9]);

        channel.fill(1, 4, 10).unwrap();
        channel.fill(2, 8, 1).unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![0, 7, 7, 9, 1]);
    }

    #[test]
    fn test_rotate() {
        let (mut channel, _probe) = open(5);
        numbered(&mut channel);

        channel.rotate(2).unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![4, 5, 1, 2, 3]);

        channel.rotate(-2).unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![1, 2, 3, 4, 5]);

        channel.rotate(7).unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![4, 5, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_round_trip() {
        let (mut channel, _probe) = open(5);
        numbered(&mut channel);
        let before = channel.pixels().unwrap();
        let count = channel.pixel_count() as isize;

        for n in 0..=2 * count {
            channel.rotate(n).unwrap();
            channel.rotate((count - n).rem_euclid(count)).unwrap();
            assert_eq!(channel.pixels().unwrap(), before, "rotate({n})");
        }
    }

    #[test]
    fn test_clear_after_fill() {
        let (mut channel, _probe) = open(5);
        channel.fill(0x00FF_00FF, 0, 0).unwrap();
        assert_eq!(channel.pixel(2).unwrap(), 0x00FF_00FF);

        channel.clear().unwrap();
        for index in 0..5 {
            assert_eq!(channel.pixel(index).unwrap(), 0);
        }
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let (mut channel, _probe) = open(4);
        numbered(&mut channel);

        channel.reverse().unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![4, 3, 2, 1]);
        channel.reverse().unwrap();
        assert_eq!(channel.pixels().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_update_length() {
        let (mut channel, _probe) = open(5);
        assert!(matches!(
            channel.update_length(0),
            Err(Error::InvalidLength(0))
        ));
        assert_eq!(channel.pixel_count(), 5);

        channel.update_length(8).unwrap();
        assert_eq!(channel.pixel_count(), 8);
        assert!(channel.set_pixel(7, 1).is_ok());
    }

    #[test]
    fn test_fades_end_at_limits() {
        let (mut channel, probe) = open(3);
        channel.fill_rgb(RED).unwrap();

        channel.fade_out(40).unwrap();
        assert_eq!(channel.brightness(), 0);
        assert_eq!(probe.shown_brightness(), 0);

        channel.fade_in(40).unwrap();
        assert_eq!(channel.brightness(), 255);
        assert_eq!(probe.shown_brightness(), 255);
        assert!(probe.show_count() >= 4);
    }

    #[test]
    fn test_drop_blanks_device() {
        let (mut channel, probe) = open(4);
        channel.fill_rgb(RED).unwrap();
        channel.show().unwrap();
        assert_eq!(probe.shown(), vec![pack_rgb(RED); 4]);

        drop(channel);
        assert_eq!(probe.show_count(), 2);
        assert_eq!(probe.shown(), vec![0; 4]);
    }
}
