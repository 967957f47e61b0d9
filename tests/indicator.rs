mod common;

mod tests {
    use underglow_composer::color::{Hsb, Rgb};
    use underglow_composer::effect::indicator::{
        BLUE, GREEN, IndicatorConfig, IndicatorEffect, IndicatorLayout, LockKey, LockKeys,
        ORANGE, ProfileStatus, RED, StatusSnapshot, WHITE, YELLOW, battery_color, grid_pixel,
    };
    use underglow_composer::effect::{Effect, EffectContext, EffectId};
    use underglow_composer::state::UnderglowState;
    use underglow_composer::{BrightnessRange, ConfigError, Underglow};

    use crate::common::{self, BLACK, MAX_LEDS, MockOutput, MockStatus, STRIP_LEN};

    const CAPS_LOCK: usize = 34;
    const NUM_LOCK: usize = 28;
    const SCROLL_LOCK: usize = 22;
    const BATTERY: [usize; 6] = [37, 31, 25, 19, 13, 8];

    struct Harness {
        effect: IndicatorEffect,
        state: UnderglowState,
        leds: [Rgb; STRIP_LEN],
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(IndicatorConfig::default())
        }

        fn with_config(config: IndicatorConfig) -> Self {
            Self {
                effect: IndicatorEffect::new(config),
                // Zero brightness keeps the background dark
                state: UnderglowState {
                    color: Hsb::new(0, 100, 0),
                    animation_speed: 3,
                    current_effect: EffectId::Indicator,
                    animation_step: 0,
                    on: true,
                },
                leds: [WHITE; STRIP_LEN],
            }
        }

        fn render(&mut self, status: StatusSnapshot) -> &[Rgb] {
            self.render_in(status, BrightnessRange::FULL)
        }

        fn render_in(&mut self, status: StatusSnapshot, brightness: BrightnessRange) -> &[Rgb] {
            let mut ctx = EffectContext {
                state: &mut self.state,
                brightness,
                status: &status,
            };
            self.effect.render(&mut ctx, &mut self.leds);
            &self.leds
        }
    }

    fn lit(leds: &[Rgb]) -> Vec<usize> {
        leds.iter()
            .enumerate()
            .filter(|(_, led)| **led != BLACK)
            .map(|(index, _)| index)
            .collect()
    }

    fn profile(index: u8, open: bool, connected: bool) -> StatusSnapshot {
        StatusSnapshot {
            profile: Some(ProfileStatus {
                index,
                open,
                connected,
            }),
            ..StatusSnapshot::default()
        }
    }

    #[test]
    fn test_grid_layout_pixels() {
        let layout = IndicatorLayout::grid();
        assert_eq!(grid_pixel(1, 1), 5);
        assert_eq!(grid_pixel(6, 4), 37);
        assert_eq!(layout.caps_lock, Some(34));
        assert_eq!(layout.num_lock, Some(28));
        assert_eq!(layout.scroll_lock, Some(22));
        assert_eq!(layout.layers.as_slice(), &[36, 30, 24, 18, 12, 7]);
        assert_eq!(layout.profiles.as_slice(), &[29, 23, 17, 11]);
        assert_eq!(layout.battery.as_slice(), &[37, 31, 25, 19, 13, 8]);
    }

    #[test]
    fn test_layout_validation() {
        let layout = IndicatorLayout::grid();
        assert!(layout.validate(38).is_ok());
        assert_eq!(
            layout.validate(30),
            Err(ConfigError::LayoutOutOfRange { index: 34, len: 30 })
        );
    }

    #[test]
    fn test_no_status_is_dark() {
        let mut harness = Harness::new();
        let leds = harness.render(StatusSnapshot::default());
        assert!(lit(leds).is_empty());
    }

    #[test]
    fn test_lock_keys() {
        let mut harness = Harness::new();
        let status = StatusSnapshot {
            lock_keys: LockKeys::default().with(LockKey::CapsLock),
            ..StatusSnapshot::default()
        };
        let leds = harness.render(status);
        assert_eq!(leds[CAPS_LOCK], WHITE);
        assert_eq!(lit(leds), [CAPS_LOCK]);

        let status = StatusSnapshot {
            lock_keys: LockKeys(0b111),
            ..StatusSnapshot::default()
        };
        let leds = harness.render(status);
        assert_eq!(lit(leds), [SCROLL_LOCK, NUM_LOCK, CAPS_LOCK]);
    }

    #[test]
    fn test_layer_colors() {
        let mut harness = Harness::new();
        let status = StatusSnapshot {
            layer: Some(2),
            ..StatusSnapshot::default()
        };
        let leds = harness.render(status);
        assert_eq!(leds[24], BLUE);
        assert_eq!(lit(leds), [24]);

        let status = StatusSnapshot {
            layer: Some(0),
            ..StatusSnapshot::default()
        };
        assert_eq!(harness.render(status)[36], WHITE);
    }

    #[test]
    fn test_layer_without_pixel_is_skipped() {
        let mut harness = Harness::new();
        let status = StatusSnapshot {
            layer: Some(7),
            ..StatusSnapshot::default()
        };
        assert!(lit(harness.render(status)).is_empty());
    }

    #[test]
    fn test_battery_buckets() {
        assert_eq!(battery_color(100), GREEN);
        assert_eq!(battery_color(81), GREEN);
        assert_eq!(battery_color(80), YELLOW);
        assert_eq!(battery_color(51), YELLOW);
        assert_eq!(battery_color(50), ORANGE);
        assert_eq!(battery_color(21), ORANGE);
        assert_eq!(battery_color(20), RED);
        assert_eq!(battery_color(0), RED);
    }

    #[test]
    fn test_battery_gauge() {
        let mut harness = Harness::new();
        let status = StatusSnapshot {
            battery_percent: Some(80),
            ..StatusSnapshot::default()
        };
        let leds = harness.render(status);
        for index in BATTERY {
            assert_eq!(leds[index], YELLOW);
        }
        let mut expected = BATTERY.to_vec();
        expected.sort_unstable();
        assert_eq!(lit(leds), expected);
    }

    #[test]
    fn test_connected_profile_is_solid() {
        let mut harness = Harness::new();
        for _ in 0..40 {
            let leds = harness.render(profile(1, false, true));
            assert_eq!(leds[23], BLUE);
        }
    }

    #[test]
    fn test_open_profile_blinks_every_four_ticks() {
        let mut harness = Harness::new();
        let mut visible = Vec::new();
        for _ in 0..12 {
            let leds = harness.render(profile(0, true, false));
            visible.push(leds[29] == WHITE);
        }
        assert_eq!(
            visible,
            [
                false, false, false, false, true, true, true, true, false, false, false, false
            ]
        );
    }

    #[test]
    fn test_disconnected_profile_blinks_every_fifteen_ticks() {
        let mut harness = Harness::new();
        let mut visible = Vec::new();
        for _ in 0..45 {
            let leds = harness.render(profile(2, false, false));
            visible.push(leds[17] != BLACK);
        }
        assert!(visible[..15].iter().all(|&shown| !shown));
        assert!(visible[15..30].iter().all(|&shown| shown));
        assert!(visible[30..].iter().all(|&shown| !shown));
    }

    #[test]
    fn test_reset_restarts_blink_dark() {
        let mut harness = Harness::new();
        for _ in 0..5 {
            harness.render(profile(0, true, false));
        }
        assert_eq!(harness.leds[29], WHITE);

        harness.effect.reset();
        harness.state.animation_step = 0;
        assert_eq!(harness.render(profile(0, true, false))[29], BLACK);
    }

    #[test]
    fn test_indicator_brightness() {
        let config = IndicatorConfig {
            brightness: 127,
            ..IndicatorConfig::default()
        };
        let mut harness = Harness::with_config(config);
        let status = StatusSnapshot {
            lock_keys: LockKeys::default().with(LockKey::NumLock),
            ..StatusSnapshot::default()
        };
        assert_eq!(harness.render(status)[NUM_LOCK], Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_background_uses_base_color() {
        let mut harness = Harness::new();
        harness.state.color = Hsb::new(240, 100, 100);
        let status = StatusSnapshot {
            lock_keys: LockKeys::default().with(LockKey::CapsLock),
            ..StatusSnapshot::default()
        };
        let leds = harness.render(status);
        assert_eq!(leds[CAPS_LOCK], WHITE);
        assert_eq!(leds[0], BLUE);
        assert!(
            leds.iter()
                .enumerate()
                .all(|(index, &led)| index == CAPS_LOCK || led == BLUE)
        );

        harness.state.color = Hsb::new(0, 100, 50);
        let leds = harness.render_in(StatusSnapshot::default(), BrightnessRange::new(20, 60));
        assert!(leds.iter().all(|&led| led == Rgb::new(102, 0, 0)));
    }

    #[test]
    fn test_layers_beyond_palette_are_not_drawn() {
        let mut layout = IndicatorLayout::grid();
        layout.layers.push(2).unwrap();
        layout.layers.push(3).unwrap();
        let config = IndicatorConfig {
            layout,
            ..IndicatorConfig::default()
        };
        let mut harness = Harness::with_config(config);

        let status = StatusSnapshot {
            layer: Some(7),
            ..StatusSnapshot::default()
        };
        assert_eq!(lit(harness.render(status)), [3]);
        assert_eq!(harness.leds[3], YELLOW);

        let status = StatusSnapshot {
            layer: Some(8),
            ..StatusSnapshot::default()
        };
        assert!(lit(harness.render(status)).is_empty());
    }

    #[test]
    fn test_indicator_follows_color_changes() {
        let mut config = common::test_config();
        config.start.effect = EffectId::Indicator;
        let mut underglow = common::started(&config);

        underglow.set_color(Hsb::new(120, 100, 100), common::ms(0)).unwrap();
        underglow.change_brt(-1, common::ms(0)).unwrap();
        assert!(underglow.tick(common::ms(0)).rendered);

        let expected = Hsb::new(120, 100, 90).to_rgb();
        assert_ne!(expected, BLACK);
        assert!(underglow.frame().iter().all(|&led| led == expected));
    }

    #[test]
    fn test_underglow_reads_status_source() {
        let status = MockStatus::default();
        status.battery.set(Some(15));
        status.layer.set(Some(3));

        let mut config = common::test_config();
        config.start.effect = EffectId::Indicator;
        config.start.color = Hsb::new(240, 100, 100);
        let mut underglow: Underglow<'_, MockOutput, MAX_LEDS> = Underglow::new(&config)
            .unwrap()
            .with_output(MockOutput::default())
            .with_status(&status);
        underglow.start(common::ms(0));

        assert!(underglow.tick(common::ms(0)).rendered);
        let frame = underglow.frame();
        assert_eq!(frame[18], GREEN);
        assert_eq!(frame[0], BLUE);
        for index in BATTERY {
            assert_eq!(frame[index], RED);
        }

        status.battery.set(None);
        assert!(underglow.tick(common::ms(25)).rendered);
        assert_eq!(underglow.frame()[BATTERY[0]], BLUE);
    }

    #[test]
    fn test_turn_on_restarts_blink_dark() {
        let status = MockStatus::default();
        status.profile.set(Some(ProfileStatus {
            index: 0,
            open: true,
            connected: false,
        }));

        let mut config = common::test_config();
        config.start.effect = EffectId::Indicator;
        config.start.color = Hsb::new(0, 100, 0);
        let mut underglow: Underglow<'_, MockOutput, MAX_LEDS> = Underglow::new(&config)
            .unwrap()
            .with_output(MockOutput::default())
            .with_status(&status);
        underglow.start(common::ms(0));

        for t in (0..=100).step_by(25) {
            assert!(underglow.tick(common::ms(t)).rendered);
        }
        assert_eq!(underglow.frame()[29], WHITE);

        underglow.turn_off(common::ms(110)).unwrap();
        underglow.turn_on(common::ms(200)).unwrap();
        assert!(underglow.tick(common::ms(200)).rendered);
        assert_eq!(underglow.frame()[29], BLACK);
    }
}
