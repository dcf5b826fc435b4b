mod tests {
    use std::rc::Rc;

    use myrtio_pixel_channels::{
        Channel, ChannelKind, ColorOrder, Error, LightJewel, Lollipop, MemoryDriver, MemoryProbe,
        PhysicalChannel, SharedChannel, SplitJewel, SubchannelMap, VirtualSubchannel,
        color::{BLUE, GREEN, RED, pack_rgb},
        share,
    };

    fn parent(pixel_count: usize) -> (SharedChannel, MemoryProbe) {
        let driver = MemoryDriver::new(pixel_count);
        let probe = driver.probe();
        let channel = PhysicalChannel::new(driver).unwrap();
        (share(channel), probe)
    }

    #[test]
    fn test_logical_indices_map_to_parent() {
        let (device, _probe) = parent(10);
        let mut view = VirtualSubchannel::new(Rc::clone(&device), vec![9, 4, 2]).unwrap();

        assert_eq!(view.kind(), ChannelKind::Subchannel);
        assert!(view.is_subchannel());
        assert_eq!(view.pixel_count(), 3);

        view.set_pixel(0, 11).unwrap();
        view.set_pixel(2, 22).unwrap();
        assert_eq!(device.borrow().pixel(9).unwrap(), 11);
        assert_eq!(device.borrow().pixel(2).unwrap(), 22);
        assert_eq!(view.pixels().unwrap(), vec![11, 0, 22]);

        assert!(matches!(
            view.set_pixel(3, 1),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_mapping_past_parent_refused() {
        let (device, _probe) = parent(4);
        assert!(matches!(
            VirtualSubchannel::new(device, vec![0, 4]),
            Err(Error::MappingOutOfRange {
                index: 4,
                pixel_count: 4
            })
        ));
    }

    #[test]
    fn test_reading_past_shrunk_parent_fails() {
        let (device, _probe) = parent(6);
        let view = VirtualSubchannel::new(Rc::clone(&device), vec![1, 5]).unwrap();
        device.borrow_mut().update_length(3).unwrap();

        assert!(matches!(
            view.pixels(),
            Err(Error::IndexOutOfRange { index: 5, len: 3 })
        ));
        assert!(view.pixel(0).is_ok());
    }

    #[test]
    fn test_partition_isolation() {
        let (device, probe) = parent(6);
        let mut map = SubchannelMap::from_ranges(Rc::clone(&device), &[(0, 2), (3, 5)]);
        let left = map.subchannel(0).unwrap();
        let right = map.subchannel(1).unwrap();

        left.borrow_mut().fill_rgb(RED).unwrap();
        right.borrow_mut().fill_rgb(BLUE).unwrap();
        left.borrow_mut().clear().unwrap();
        right.borrow_mut().show().unwrap();

        let blue = pack_rgb(BLUE);
        assert_eq!(probe.shown(), vec![0, 0, 0, blue, blue, blue]);
    }

    #[test]
    fn test_subchannel_rotate_stays_inside_mapping() {
        let (device, _probe) = parent(5);
        let mut view = VirtualSubchannel::new(Rc::clone(&device), vec![1, 2, 3]).unwrap();
        for index in 0..3 {
            view.set_pixel(index, index as u32 + 1).unwrap();
        }
        device.borrow_mut().set_pixel(0, 9).unwrap();
        device.borrow_mut().set_pixel(4, 9).unwrap();

        view.rotate(1).unwrap();
        assert_eq!(device.borrow().pixels().unwrap(), vec![9, 3, 1, 2, 9]);
        view.reverse().unwrap();
        assert_eq!(device.borrow().pixels().unwrap(), vec![9, 2, 1, 3, 9]);
    }

    #[test]
    fn test_brightness_is_shared_with_parent() {
        let (device, _probe) = parent(6);
        let mut map = SubchannelMap::split_into_zones(Rc::clone(&device), 2);
        let first = map.subchannel(0).unwrap();
        let second = map.subchannel(1).unwrap();

        first.borrow_mut().set_brightness(40).unwrap();
        assert_eq!(device.borrow().brightness(), 40);
        assert_eq!(second.borrow().brightness(), 40);
    }

    #[test]
    fn test_reconfiguration_refused() {
        let (device, _probe) = parent(6);
        let mut view = VirtualSubchannel::new(device, vec![0, 1]).unwrap();
        assert!(matches!(
            view.update_length(3),
            Err(Error::SubchannelReconfigure { .. })
        ));
        assert!(matches!(
            view.update_color_order(ColorOrder::Grb),
            Err(Error::SubchannelReconfigure { .. })
        ));
        assert!(matches!(
            view.set_device_path("/dev/spidev1.0"),
            Err(Error::SubchannelReconfigure { .. })
        ));
    }

    #[test]
    fn test_undefined_subchannel() {
        let (device, _probe) = parent(6);
        let mut map = SubchannelMap::new(device, vec![vec![0], vec![1]]);
        let err = map.subchannel(2).err().unwrap();
        assert!(matches!(err, Error::SubchannelNotDefined { id: 2, count: 2 }));
        assert_eq!(
            err.to_string(),
            "subchannel 2 not defined, available subchannels: 0-1"
        );
    }

    #[test]
    fn test_subchannels_are_cached_until_remapped() {
        let (device, _probe) = parent(6);
        let mut map = SubchannelMap::new(device, vec![vec![0, 1], vec![2]]);
        let first = map.subchannel(0).unwrap();
        assert!(Rc::ptr_eq(&first, &map.subchannel(0).unwrap()));

        map.set_subchannel_map(vec![vec![5, 4, 3]]);
        assert_eq!(map.subchannel_count(), 1);
        let remapped = map.subchannel(0).unwrap();
        assert!(!Rc::ptr_eq(&first, &remapped));
        assert_eq!(remapped.borrow().physical_indices(), &[5, 4, 3]);
    }

    #[test]
    fn test_split_into_zones_gives_remainder_to_last() {
        let (device, _probe) = parent(10);
        let map = SubchannelMap::split_into_zones(device, 3);
        assert_eq!(
            map.subchannel_map(),
            &[vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8, 9]]
        );
    }

    #[test]
    fn test_split_jewel_ring_and_center() {
        let (device, probe) = parent(7);
        let mut jewel = SplitJewel::new(device).unwrap();
        let center = jewel.center().unwrap();
        let ring = jewel.ring().unwrap();
        assert_eq!(ring.borrow().pixel_count(), 6);

        center.borrow_mut().fill_rgb(RED).unwrap();
        ring.borrow_mut().fill_rgb(BLUE).unwrap();
        ring.borrow_mut().show().unwrap();

        let mut expected = vec![pack_rgb(BLUE); 7];
        expected[0] = pack_rgb(RED);
        assert_eq!(probe.shown(), expected);
    }

    #[test]
    fn test_ring_write_leaves_center_alone() {
        let (device, _probe) = parent(7);
        let mut map = SubchannelMap::new(Rc::clone(&device), vec![(1..7).collect(), vec![0]]);
        let ring = map.subchannel(0).unwrap();
        let center = map.subchannel(1).unwrap();
        center.borrow_mut().set_pixel(0, 0x0012_3456).unwrap();

        ring.borrow_mut().set_pixel(0, 0x0000_FF00).unwrap();
        assert_eq!(center.borrow().pixel(0).unwrap(), 0x0012_3456);
        assert_eq!(device.borrow().pixel(0).unwrap(), 0x0012_3456);
        assert_eq!(device.borrow().pixel(1).unwrap(), 0x0000_FF00);
        assert_eq!(ring.borrow().pixel(0).unwrap(), 0x0000_FF00);
    }

    #[test]
    fn test_each_logical_index_hits_one_physical_index() {
        let (device, _probe) = parent(9);
        let partition = vec![vec![8, 0, 4], vec![1, 7], vec![2, 3, 5, 6]];
        let mut map = SubchannelMap::new(Rc::clone(&device), partition.clone());

        for (id, indices) in partition.iter().enumerate() {
            let view = map.subchannel(id).unwrap();
            for (logical, &physical) in indices.iter().enumerate() {
                device.borrow_mut().clear().unwrap();
                view.borrow_mut().set_pixel(logical, 0xAB).unwrap();
                let lit: Vec<usize> = (0..9)
                    .filter(|&index| device.borrow().pixel(index).unwrap() != 0)
                    .collect();
                assert_eq!(lit, vec![physical]);
            }
        }
    }

    #[test]
    fn test_lollipop_needs_thirteen_pixels() {
        let (small, _probe) = parent(7);
        assert!(matches!(
            Lollipop::new(small),
            Err(Error::MappingOutOfRange { .. })
        ));

        let (device, _probe) = parent(13);
        let mut lollipop = Lollipop::new(Rc::clone(&device)).unwrap();
        lollipop.stick_b().unwrap().borrow_mut().fill_rgb(GREEN).unwrap();
        let lit: Vec<usize> = (0..13)
            .filter(|&index| device.borrow().pixel(index).unwrap() != 0)
            .collect();
        assert_eq!(lit, vec![8, 10, 12]);
        assert_eq!(lollipop.jewel_a().unwrap().borrow().pixel_count(), 4);
    }

    #[test]
    fn test_light_jewel_puts_center_last() {
        let (device, _probe) = parent(7);
        let mut jewel = LightJewel::new(Rc::clone(&device)).unwrap();
        jewel.set_center(RED).unwrap();
        jewel.set_ring_pixel(0, BLUE).unwrap();
        assert!(matches!(
            jewel.set_ring_pixel(6, BLUE),
            Err(Error::IndexOutOfRange { index: 6, len: 6 })
        ));

        assert_eq!(device.borrow().pixel(0).unwrap(), pack_rgb(RED));
        assert_eq!(device.borrow().pixel(1).unwrap(), pack_rgb(BLUE));
        assert_eq!(jewel.channel().pixel_count(), 7);
    }
}
