//! Shared test infrastructure for underglow-composer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration as StdDuration;

use underglow_composer::effect::indicator::{LockKeys, ProfileStatus, StatusSource};
use underglow_composer::{
    EffectId, Instant, OutputDriver, OutputError, PersistenceError, PowerControl, PowerError,
    Rgb, SettingsStore, Underglow, UnderglowConfig,
};

pub const MAX_LEDS: usize = 48;
pub const STRIP_LEN: usize = 40;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

// ============================================================================
// Mock output
// ============================================================================

/// Output driver that records every frame it receives
#[derive(Default)]
pub struct MockOutput {
    pub frames: Vec<Vec<Rgb>>,
    pub fail: bool,
}

impl MockOutput {
    pub fn failing() -> Self {
        Self {
            frames: Vec::new(),
            fail: true,
        }
    }

    pub fn last_frame(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl OutputDriver for MockOutput {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), OutputError> {
        self.frames.push(colors.to_vec());
        if self.fail {
            return Err(OutputError::Write);
        }
        Ok(())
    }
}

// ============================================================================
// Mock settings store
// ============================================================================

#[derive(Default)]
pub struct MockStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
    writes: Cell<usize>,
    pub fail_saves: bool,
}

impl MockStore {
    pub fn with_entry(key: &str, data: &[u8]) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.to_string(), data.to_vec());
        store
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SettingsStore for MockStore {
    fn load(&self, key: &str, buf: &mut [u8]) -> Result<Option<usize>, PersistenceError> {
        let entries = self.entries.borrow();
        let Some(data) = entries.get(key) else {
            return Ok(None);
        };
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(Some(data.len()))
    }

    fn save(&self, key: &str, data: &[u8]) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Driver);
        }
        self.writes.set(self.writes.get() + 1);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

/// Store that counts writes made while a critical section was held
#[derive(Default)]
pub struct LockCheckingStore {
    pub inner: MockStore,
    pub writes_under_lock: Cell<usize>,
}

impl SettingsStore for LockCheckingStore {
    fn load(&self, key: &str, buf: &mut [u8]) -> Result<Option<usize>, PersistenceError> {
        self.inner.load(key, buf)
    }

    fn save(&self, key: &str, data: &[u8]) -> Result<(), PersistenceError> {
        if critical_section_held() {
            self.writes_under_lock.set(self.writes_under_lock.get() + 1);
        }
        self.inner.save(key, data)
    }
}

/// Whether the calling thread currently holds the critical section
///
/// With the `std` implementation another thread can't enter while it is held.
pub fn critical_section_held() -> bool {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        critical_section::with(|_| ());
        let _ = tx.send(());
    });
    rx.recv_timeout(StdDuration::from_millis(200)).is_err()
}

// ============================================================================
// Mock power switch
// ============================================================================

#[derive(Default)]
pub struct MockPower {
    pub enabled: Cell<u32>,
    pub disabled: Cell<u32>,
    pub fail: bool,
}

impl PowerControl for MockPower {
    fn enable(&self) -> Result<(), PowerError> {
        self.enabled.set(self.enabled.get() + 1);
        if self.fail {
            return Err(PowerError::Switch);
        }
        Ok(())
    }

    fn disable(&self) -> Result<(), PowerError> {
        self.disabled.set(self.disabled.get() + 1);
        if self.fail {
            return Err(PowerError::Switch);
        }
        Ok(())
    }
}

// ============================================================================
// Mock keyboard status
// ============================================================================

#[derive(Default)]
pub struct MockStatus {
    pub lock_keys: Cell<LockKeys>,
    pub layer: Cell<Option<u8>>,
    pub profile: Cell<Option<ProfileStatus>>,
    pub battery: Cell<Option<u8>>,
}

impl StatusSource for MockStatus {
    fn lock_keys(&self) -> LockKeys {
        self.lock_keys.get()
    }

    fn highest_layer(&self) -> Option<u8> {
        self.layer.get()
    }

    fn active_profile(&self) -> Option<ProfileStatus> {
        self.profile.get()
    }

    fn battery_percent(&self) -> Option<u8> {
        self.battery.get()
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

/// Config for a 40 pixel strip starting on a solid red
pub fn test_config() -> UnderglowConfig {
    let mut config = UnderglowConfig::new(STRIP_LEN);
    config.start.effect = EffectId::Solid;
    config
}

/// Attached, started controller without optional collaborators
pub fn started(config: &UnderglowConfig) -> Underglow<'static, MockOutput, MAX_LEDS> {
    let mut underglow = Underglow::new(config)
        .expect("valid config")
        .with_output(MockOutput::default());
    underglow.start(ms(0));
    underglow
}

pub fn frames<'u>(underglow: &'u Underglow<'_, MockOutput, MAX_LEDS>) -> &'u [Vec<Rgb>] {
    &underglow.output().expect("output attached").frames
}
