//! Keyboard status inputs for the indicator effect

/// HID keyboard lock LEDs, by bit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LockKey {
    NumLock = 0,
    CapsLock = 1,
    ScrollLock = 2,
}

/// Lock LED bitmask as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockKeys(pub u8);

impl LockKeys {
    pub const fn contains(self, key: LockKey) -> bool {
        self.0 & (1 << key as u8) != 0
    }

    #[must_use]
    pub const fn with(self, key: LockKey) -> Self {
        Self(self.0 | (1 << key as u8))
    }
}

/// State of the active Bluetooth profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStatus {
    /// Active profile index
    pub index: u8,
    /// Profile has no bonded host yet
    pub open: bool,
    /// Bonded host is connected
    pub connected: bool,
}

/// Read-only keyboard status
///
/// Every query has a default so a source only has to report what it knows.
pub trait StatusSource {
    fn lock_keys(&self) -> LockKeys {
        LockKeys::default()
    }

    fn highest_layer(&self) -> Option<u8> {
        None
    }

    fn active_profile(&self) -> Option<ProfileStatus> {
        None
    }

    /// Battery state of charge in percent
    fn battery_percent(&self) -> Option<u8> {
        None
    }
}

/// Status values captured once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusSnapshot {
    pub lock_keys: LockKeys,
    pub layer: Option<u8>,
    pub profile: Option<ProfileStatus>,
    pub battery_percent: Option<u8>,
}

impl StatusSnapshot {
    pub fn capture(source: &dyn StatusSource) -> Self {
        Self {
            lock_keys: source.lock_keys(),
            layer: source.highest_layer(),
            profile: source.active_profile(),
            battery_percent: source.battery_percent(),
        }
    }
}
