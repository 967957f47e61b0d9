//! Underglow controller
//!
//! Owns the underglow state and drives the active effect. Control
//! operations mutate the state, `tick` renders frames and flushes pending
//! settings writes. All methods take `&mut self`, so rendering and control
//! are serialized by ownership; see [`crate::shared`] for sharing one
//! controller between contexts.

use embassy_time::Instant;

use crate::OutputDriver;
use crate::color::{BLACK, BrightnessRange, Hsb, Rgb};
use crate::config::{StepSizes, UnderglowConfig};
use crate::effect::indicator::StatusSource;
use crate::effect::{EffectContext, EffectId, EffectSlot, IndicatorConfig, StatusSnapshot};
use crate::error::{ConfigError, InvalidArgument, UnderglowError};
use crate::logging::{debug, error, info, warn};
use crate::persistence::{PendingSave, SaveDebouncer, SettingsStore, load_state};
use crate::power::PowerControl;
use crate::state::{SPEED_MAX, SPEED_MIN, UnderglowState};
use crate::tick_scheduler::TickScheduler;

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// A frame was rendered and handed to the output
    pub rendered: bool,
    /// The persisted state was written
    pub saved: bool,
    /// When `tick` should be called next, `None` when nothing is scheduled
    pub next_deadline: Option<Instant>,
}

/// Underglow controller - the main orchestrator
pub struct Underglow<'a, O: OutputDriver, const MAX_LEDS: usize> {
    // External dependencies
    output: Option<O>,
    power: Option<&'a dyn PowerControl>,
    store: Option<&'a dyn SettingsStore>,
    status: Option<&'a dyn StatusSource>,

    // Configuration
    strip_len: usize,
    brightness: BrightnessRange,
    steps: StepSizes,
    indicator: IndicatorConfig,

    // Internal state
    state: UnderglowState,
    effect: EffectSlot,
    scheduler: TickScheduler,
    debouncer: SaveDebouncer,
    frame_buffer: [Rgb; MAX_LEDS],
}

impl<'a, O: OutputDriver, const MAX_LEDS: usize> Underglow<'a, O, MAX_LEDS> {
    /// Create a controller without an output attached
    ///
    /// The state starts from the configured start values; call [`start`]
    /// to restore persisted settings and arm the timer.
    ///
    /// [`start`]: Self::start
    pub fn new(config: &UnderglowConfig) -> Result<Self, ConfigError> {
        config.validate(MAX_LEDS)?;
        let state = config.start.to_state();

        Ok(Self {
            output: None,
            power: None,
            store: None,
            status: None,
            strip_len: config.strip_len,
            brightness: config.brightness,
            steps: config.steps,
            indicator: config.indicator.clone(),
            effect: state.current_effect.to_slot(&config.indicator),
            state,
            scheduler: TickScheduler::new(config.tick_period),
            debouncer: SaveDebouncer::new(config.save_debounce),
            frame_buffer: [BLACK; MAX_LEDS],
        })
    }

    /// Attach the LED strip output
    pub fn attach(&mut self, output: O) {
        info!("underglow: LED strip attached ({} pixels)", self.strip_len);
        self.output = Some(output);
    }

    #[must_use]
    pub fn with_output(mut self, output: O) -> Self {
        self.attach(output);
        self
    }

    /// Use an auxiliary power switch for the strip
    #[must_use]
    pub fn with_power(mut self, power: &'a dyn PowerControl) -> Self {
        self.power = Some(power);
        self
    }

    /// Persist state changes to a settings store
    #[must_use]
    pub fn with_store(mut self, store: &'a dyn SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Read keyboard status for the indicator effect
    #[must_use]
    pub fn with_status(mut self, status: &'a dyn StatusSource) -> Self {
        self.status = Some(status);
        self
    }

    /// Restore persisted settings and start the tick timer
    pub fn start(&mut self, now: Instant) {
        if let Some(store) = self.store {
            match load_state(store) {
                Ok(Some(state)) => {
                    self.state = state;
                    self.effect = state.current_effect.to_slot(&self.indicator);
                }
                Ok(None) => info!("underglow: no persisted state, using defaults"),
                Err(err) => error!("underglow: failed to restore state: {}", err),
            }
        }
        self.scheduler.start(now);
    }

    /// Process one timer poll
    ///
    /// Renders a frame when a tick is due and the strip is on, then writes
    /// the settings when the debounce delay has passed.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let (mut result, save) = self.advance(now);
        result.saved = save.is_some_and(PendingSave::commit);
        result
    }

    /// Render part of [`tick`](Self::tick)
    ///
    /// A due save is returned encoded instead of written, so the caller can
    /// run the store write after releasing its lock. `saved` is always
    /// `false` in the returned result.
    pub fn advance(&mut self, now: Instant) -> (TickResult, Option<PendingSave<'a>>) {
        let rendered = self.scheduler.poll(now) && self.render_frame();
        let save = match self.store {
            Some(store) if self.debouncer.poll(now) => Some(PendingSave::new(store, &self.state)),
            _ => None,
        };

        let result = TickResult {
            rendered,
            saved: false,
            next_deadline: self.next_deadline(),
        };
        (result, save)
    }

    /// Earliest of the next tick and a pending save
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.scheduler.next_deadline(), self.debouncer.deadline()) {
            (Some(tick), Some(save)) => Some(tick.min(save)),
            (tick, save) => tick.or(save),
        }
    }

    pub const fn state(&self) -> &UnderglowState {
        &self.state
    }

    pub fn effect_id(&self) -> EffectId {
        self.effect.id()
    }

    /// Last frame written to the output
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer[..self.strip_len]
    }

    pub const fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    pub const fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub const fn is_save_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_on(&self) -> Result<bool, UnderglowError> {
        self.ensure_attached()?;
        Ok(self.state.on)
    }

    pub fn turn_on(&mut self, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;

        if let Some(power) = self.power
            && let Err(err) = power.enable()
        {
            error!("underglow: unable to enable power: {}", err);
        }

        self.state.on = true;
        self.state.animation_step = 0;
        self.effect.reset();
        self.scheduler.start(now);
        debug!("underglow: on");

        self.request_save(now);
        Ok(())
    }

    pub fn turn_off(&mut self, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;

        if let Some(power) = self.power
            && let Err(err) = power.disable()
        {
            error!("underglow: unable to disable power: {}", err);
        }

        let frame = &mut self.frame_buffer[..self.strip_len];
        frame.fill(BLACK);
        if let Some(output) = self.output.as_mut()
            && let Err(err) = output.write(frame)
        {
            warn!("underglow: failed to clear LED strip: {}", err);
        }

        self.scheduler.stop();
        self.state.on = false;
        debug!("underglow: off");

        self.request_save(now);
        Ok(())
    }

    pub fn toggle(&mut self, now: Instant) -> Result<(), UnderglowError> {
        if self.state.on {
            self.turn_off(now)
        } else {
            self.turn_on(now)
        }
    }

    /// Effect `direction` positions away from the current one
    pub fn calc_next_effect(&self, direction: i8) -> EffectId {
        self.state.current_effect.cycle(direction)
    }

    /// Select an effect by its raw index
    pub fn select_effect(&mut self, index: u8, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;
        let effect = EffectId::from_raw(index).ok_or(InvalidArgument::EffectIndex(index))?;

        self.set_effect(effect);
        self.request_save(now);
        Ok(())
    }

    pub fn cycle_effect(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        let next = self.calc_next_effect(direction);
        self.select_effect(next as u8, now)
    }

    pub fn set_color(&mut self, color: Hsb, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;
        self.state.color = color.validate()?;

        self.request_save(now);
        Ok(())
    }

    /// Color after one hue step in `direction`, wrapping around the wheel
    pub fn calc_hue(&self, direction: i8) -> Hsb {
        self.state
            .color
            .shift_hue(i32::from(direction) * i32::from(self.steps.hue))
    }

    /// Color after one saturation step in `direction`, clamped
    pub fn calc_sat(&self, direction: i8) -> Hsb {
        self.state
            .color
            .shift_saturation(i16::from(direction) * i16::from(self.steps.saturation))
    }

    /// Color after one brightness step in `direction`, clamped
    pub fn calc_brt(&self, direction: i8) -> Hsb {
        self.state
            .color
            .shift_brightness(i16::from(direction) * i16::from(self.steps.brightness))
    }

    pub fn change_hue(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;
        self.state.color = self.calc_hue(direction);

        self.request_save(now);
        Ok(())
    }

    pub fn change_sat(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;
        self.state.color = self.calc_sat(direction);

        self.request_save(now);
        Ok(())
    }

    pub fn change_brt(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;
        self.state.color = self.calc_brt(direction);

        self.request_save(now);
        Ok(())
    }

    /// Change animation speed, clamped to `1..=5`
    ///
    /// Slowing down at the minimum speed is accepted and changes nothing.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn change_speed(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.ensure_attached()?;

        if self.state.animation_speed == SPEED_MIN && direction < 0 {
            return Ok(());
        }

        let speed = (i16::from(self.state.animation_speed) + i16::from(direction))
            .clamp(i16::from(SPEED_MIN), i16::from(SPEED_MAX));
        self.state.animation_speed = speed as u8;

        self.request_save(now);
        Ok(())
    }

    const fn ensure_attached(&self) -> Result<(), UnderglowError> {
        if self.output.is_none() {
            return Err(UnderglowError::NotAttached);
        }
        Ok(())
    }

    /// Switch to a new effect with a fresh animation step
    fn set_effect(&mut self, effect: EffectId) {
        self.effect = effect.to_slot(&self.indicator);
        self.state.current_effect = effect;
        self.state.animation_step = 0;
        debug!("underglow: effect {}", effect.as_str());
    }

    fn request_save(&mut self, now: Instant) {
        if self.store.is_some() {
            self.debouncer.request(now);
        }
    }

    fn render_frame(&mut self) -> bool {
        if !self.state.on {
            return false;
        }
        let Some(output) = self.output.as_mut() else {
            return false;
        };

        let status = match (self.state.current_effect, self.status) {
            (EffectId::Indicator, Some(source)) => StatusSnapshot::capture(source),
            _ => StatusSnapshot::default(),
        };
        let frame = &mut self.frame_buffer[..self.strip_len];
        let mut ctx = EffectContext {
            state: &mut self.state,
            brightness: self.brightness,
            status: &status,
        };
        self.effect.render(&mut ctx, frame);

        if let Err(err) = output.write(frame) {
            warn!("underglow: failed to update LED strip: {}", err);
        }
        true
    }
}
