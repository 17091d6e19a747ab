// Keyflick Integration Tests
//
// These tests exercise the public API of each component:
// catalog -> resolver -> layout/geometry -> gesture state machine
//
// Run with: cargo test --test integration_test

mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use keyflick_core::catalog;
    use keyflick_core::{
        apply_modifier, key_by_name, Direction, Flags, GeometryConfig, GestureConfig,
        GestureStateMachine, HapticError, HapticFeedback, Key, KeyKind, KeyValue,
        KeyboardGeometry, KeyboardLayout, Modifier, ModifierResolver, ModifierSet, PointerEvent,
        PointerId, RecordingHost, Settings, SlotId,
    };
    use strum::IntoEnumIterator;

    // =========================================================================
    // Helpers
    // =========================================================================

    fn named(name: &str) -> KeyValue {
        key_by_name(name).unwrap()
    }

    fn resolve(name: &str, mods: &[Modifier]) -> Option<KeyValue> {
        let resolver = ModifierResolver::new();
        resolver.resolve(Some(&named(name)), &mods.iter().copied().collect::<ModifierSet>())
    }

    /// 110 wide: unit keys are 10 wide between 5 unit margins
    fn machine() -> GestureStateMachine {
        let geometry = KeyboardGeometry::for_width(110.0, &GeometryConfig::default());
        GestureStateMachine::new(KeyboardLayout::qwerty(), geometry, GestureConfig::default())
    }

    struct CountingHaptics(Arc<AtomicUsize>);

    impl HapticFeedback for CountingHaptics {
        fn vibrate(&mut self, _duration: Duration) -> Result<(), HapticError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(HapticError::Device("motor stalled".to_string()))
        }
    }

    // =========================================================================
    // Modifier resolution
    // =========================================================================

    #[test]
    fn test_resolve_shift_letter() {
        let out = resolve("a", &[Modifier::Shift]).unwrap();
        assert_eq!(out.kind(), &KeyKind::Char('A'));
    }

    #[test]
    fn test_resolve_alternate_layer_letter() {
        let out = resolve("a", &[Modifier::Fn]).unwrap();
        assert_eq!(out.name(), "æ");
        assert_eq!(out.as_char(), Some('æ'));
    }

    #[test]
    fn test_resolve_grave() {
        let out = resolve("e", &[Modifier::Grave]).unwrap();
        assert_eq!(out.as_char(), Some('è'));
    }

    #[test]
    fn test_resolve_ctrl_chord() {
        let out = resolve("c", &[Modifier::Ctrl]).unwrap();
        assert_eq!(out.kind(), &KeyKind::KeyEvent(Key::from(46)));
    }

    #[test]
    fn test_resolve_fn_function_keys() {
        for (digit, key) in [("1", Key::F1), ("9", Key::F9), ("0", Key::F10)] {
            let out = resolve(digit, &[Modifier::Fn]).unwrap();
            assert_eq!(out.kind(), &KeyKind::KeyEvent(key));
        }
    }

    #[test]
    fn test_resolve_absent_base() {
        let resolver = ModifierResolver::new();
        assert!(resolver
            .resolve(None, &ModifierSet::from([Modifier::Shift]))
            .is_none());
    }

    #[test]
    fn test_cache_agrees_with_uncached() {
        let cached = ModifierResolver::new();
        let uncached = ModifierResolver::uncached();
        let sets = [
            ModifierSet::new(),
            ModifierSet::from([Modifier::Shift]),
            ModifierSet::from([Modifier::Fn]),
            ModifierSet::from([Modifier::Fn, Modifier::Shift]),
            ModifierSet::from([Modifier::Ctrl, Modifier::Shift]),
            ModifierSet::from([Modifier::Shift, Modifier::Acute]),
            ModifierSet::from([Modifier::Superscript, Modifier::Fn]),
        ];
        let names: Vec<&str> = catalog::names()
            .chain(["a", "e", "o", "1", "0", "€", "↑", "-"])
            .collect();

        for name in names {
            let base = named(name);
            for mods in &sets {
                let first = cached.resolve(Some(&base), mods);
                let second = cached.resolve(Some(&base), mods);
                assert_eq!(first, second, "{} [{}]", name, mods);
                assert_eq!(first, uncached.resolve(Some(&base), mods), "{} [{}]", name, mods);
            }
        }
    }

    #[test]
    fn test_order_sensitivity() {
        let a = named("a");
        let fn_then_shift = apply_modifier(&apply_modifier(&a, Modifier::Fn), Modifier::Shift);
        let shift_then_fn = apply_modifier(&apply_modifier(&a, Modifier::Shift), Modifier::Fn);
        assert_ne!(fn_then_shift, shift_then_fn);

        // The resolver always uses canonical order, whatever the insertion order
        let resolver = ModifierResolver::new();
        let mut mods = ModifierSet::new();
        mods.insert(Modifier::Shift);
        mods.insert(Modifier::Fn);
        assert_eq!(resolver.resolve(Some(&a), &mods), Some(fn_then_shift));
    }

    #[test]
    fn test_modifier_values_are_untouched() {
        for name in ["shift", "fn", "ctrl", "accent_grave", "superscript"] {
            let value = named(name);
            for modifier in Modifier::iter() {
                assert_eq!(apply_modifier(&value, modifier), value);
            }
        }
    }

    #[test]
    fn test_placeholder_cleanup() {
        assert!(resolve("f12_placeholder", &[]).is_none());
        assert!(resolve("f12_placeholder", &[Modifier::Shift, Modifier::Ctrl]).is_none());
        let out = resolve("f12_placeholder", &[Modifier::Fn]).unwrap();
        assert_eq!(out.kind(), &KeyKind::KeyEvent(Key::F12));
    }

    #[test]
    fn test_removed_is_cached() {
        let resolver = ModifierResolver::new();
        let euro = named("€");
        let fn_set = ModifierSet::from([Modifier::Fn]);
        assert!(resolver.resolve(Some(&euro), &fn_set).is_none());
        assert_eq!(resolver.cached_entries(), 1);
        assert!(resolver.resolve(Some(&euro), &fn_set).is_none());
        assert_eq!(resolver.cached_entries(), 1);
    }

    // =========================================================================
    // Layout and geometry
    // =========================================================================

    #[test]
    fn test_geometry_from_settings() {
        let settings = Settings::from_toml("[geometry]\nkeys_per_row = 5.0\nkey_height = 20.0\n")
            .unwrap();
        let geometry = KeyboardGeometry::for_width(60.0, settings.geometry());
        assert_eq!(geometry.key_width, 10.0);
        assert_eq!(geometry.height(4), 90.0);
    }

    #[test]
    fn test_every_slot_is_hit_at_its_center() {
        let layout = KeyboardLayout::qwerty();
        let geometry = KeyboardGeometry::for_width(1080.0, &GeometryConfig::default());
        for (row, r) in layout.rows().iter().enumerate() {
            for col in 0..r.slots().len() {
                let id = SlotId::new(row, col);
                let rect = geometry.slot_rect(&layout, id).unwrap();
                let hit = geometry.hit_test(
                    &layout,
                    rect.x + rect.width / 2.0,
                    rect.y + rect.height / 2.0,
                );
                assert_eq!(hit, Some(id));
            }
        }
    }

    // =========================================================================
    // Gesture state machine
    // =========================================================================

    #[test]
    fn test_touch_down_selects_center() {
        let mut m = machine();
        let mut host = RecordingHost::new();
        m.handle_event(&PointerEvent::down(0, 10.0, 30.0, Instant::now()), &mut host);

        let tracker = m.trackers().by_pointer(PointerId(0)).unwrap();
        assert_eq!(tracker.slot(), SlotId::new(0, 0));
        assert_eq!(tracker.value(), Some(&named("q")));
    }

    #[test]
    fn test_directional_boundary() {
        let t0 = Instant::now();
        let cases = [
            ((-2.0, -3.9), "q"),
            ((-3.0, -3.0), "esc"),
            ((3.0, -3.0), "1"),
            ((-3.0, 3.0), "~"),
        ];
        for ((dx, dy), expected) in cases {
            let mut m = machine();
            let mut host = RecordingHost::new();
            m.handle_event(&PointerEvent::down(0, 10.0, 30.0, t0), &mut host);
            m.handle_event(&PointerEvent::moved(0, 10.0 + dx, 30.0 + dy, t0), &mut host);
            let tracker = m.trackers().by_pointer(PointerId(0)).unwrap();
            assert_eq!(tracker.value().unwrap().name(), expected, "offset {} {}", dx, dy);
        }
    }

    #[test]
    fn test_move_resets_repeat_timer() {
        let mut m = machine();
        let mut host = RecordingHost::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(500);
        m.handle_event(&PointerEvent::down(0, 10.0, 30.0, t0), &mut host);
        m.handle_event(&PointerEvent::moved(0, 0.0, 20.0, t1), &mut host);

        let tracker = m.trackers().by_pointer(PointerId(0)).unwrap();
        assert_eq!(tracker.value().unwrap().name(), "esc");
        assert_eq!(tracker.next_repeat(), t1 + Duration::from_millis(800));
        assert_eq!(m.next_repeat(), Some(t1 + Duration::from_millis(800)));
    }

    #[test]
    fn test_labels_follow_modifiers() {
        let mut m = machine();
        let mut host = RecordingHost::new();
        let t0 = Instant::now();
        let a = SlotId::new(1, 0);
        let one = SlotId::new(0, 0);

        assert_eq!(m.label(a, Direction::Center).as_deref(), Some("a"));
        assert_eq!(m.label(one, Direction::TopRight).as_deref(), Some("1"));

        // Placeholders only appear under fn
        let p = SlotId::new(0, 9);
        assert_eq!(m.label(p, Direction::BottomLeft), None);

        // Hold fn
        m.handle_event(&PointerEvent::down(0, 25.0, 180.0, t0), &mut host);
        assert_eq!(m.active_modifiers(), &ModifierSet::from([Modifier::Fn]));
        assert_eq!(m.label(a, Direction::Center).as_deref(), Some("æ"));
        assert_eq!(m.label(one, Direction::TopRight).as_deref(), Some("F1"));
        assert_eq!(m.label(p, Direction::BottomLeft).as_deref(), Some("F11"));
    }

    #[test]
    fn test_haptics_are_rate_limited_and_best_effort() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut m = machine().with_haptics(Box::new(CountingHaptics(count.clone())));
        let mut host = RecordingHost::new();
        let t0 = Instant::now();

        m.handle_event(&PointerEvent::down(0, 20.0, 30.0, t0), &mut host);
        m.handle_event(&PointerEvent::up(0, t0), &mut host);
        m.handle_event(&PointerEvent::down(1, 20.0, 30.0, t0 + Duration::from_millis(50)), &mut host);
        m.handle_event(&PointerEvent::up(1, t0 + Duration::from_millis(50)), &mut host);
        m.handle_event(&PointerEvent::down(2, 20.0, 30.0, t0 + Duration::from_millis(200)), &mut host);
        m.handle_event(&PointerEvent::up(2, t0 + Duration::from_millis(200)), &mut host);

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(host.symbols(), vec!["w", "w", "w"]);
    }

    #[test]
    fn test_selection_change_pulses_and_redraws() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut m = machine().with_haptics(Box::new(CountingHaptics(count.clone())));
        let mut host = RecordingHost::new();
        let t0 = Instant::now();

        m.handle_event(&PointerEvent::down(0, 10.0, 30.0, t0), &mut host);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(host.invalidations, 1);

        // Drag up-left onto 'esc' well after the rate limit window
        let t1 = t0 + Duration::from_millis(200);
        m.handle_event(&PointerEvent::moved(0, 0.0, 20.0, t1), &mut host);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(host.invalidations, 2);

        // Staying on the same selection neither pulses nor redraws
        m.handle_event(&PointerEvent::moved(0, 1.0, 19.0, t1 + Duration::from_millis(150)), &mut host);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(host.invalidations, 2);
    }

    #[test]
    fn test_long_press_repeat_pulses() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut m = machine().with_haptics(Box::new(CountingHaptics(count.clone())));
        let mut host = RecordingHost::new();
        let t0 = Instant::now();

        m.handle_event(&PointerEvent::down(0, 15.0, 80.0, t0), &mut host);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        m.handle_event(&PointerEvent::moved(0, 15.0, 80.0, t0 + Duration::from_millis(800)), &mut host);
        assert_eq!(host.symbols(), vec!["a"]);
        assert_eq!(count.load(Ordering::SeqCst), 2);

        m.handle_event(&PointerEvent::moved(0, 15.0, 80.0, t0 + Duration::from_millis(950)), &mut host);
        assert_eq!(host.symbols(), vec!["a", "a"]);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_dispatch_flags_are_aggregate() {
        let mut m = machine();
        let mut host = RecordingHost::new();
        let t0 = Instant::now();

        // Ctrl held, then c tapped
        m.handle_event(&PointerEvent::down(0, 10.0, 180.0, t0), &mut host);
        m.handle_event(&PointerEvent::down(1, 45.0, 130.0, t0), &mut host);
        m.handle_event(&PointerEvent::up(1, t0), &mut host);
        m.handle_event(&PointerEvent::up(0, t0), &mut host);

        assert_eq!(host.keys.len(), 1);
        let (value, flags) = &host.keys[0];
        assert_eq!(value.kind(), &KeyKind::KeyEvent(Key::from(46)));
        assert!(flags.contains(Flags::LOCK | Flags::NO_CHAR));
    }
}
