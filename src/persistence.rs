//! Settings persistence
//!
//! Control operations only *request* a save. Requests are debounced so a
//! burst of changes ends up as one write after the burst settles, and the
//! written value is the state at the moment the save becomes due.

use embassy_time::{Duration, Instant};

use crate::error::PersistenceError;
use crate::logging::{debug, error, info};
use crate::state::{STATE_BLOB_LEN, UnderglowState};

/// Settings key of the persisted underglow state
pub const SETTINGS_KEY: &str = "rgb/underglow/state";

/// Durable key-value store
pub trait SettingsStore {
    /// Read the blob stored under `key` into `buf`
    ///
    /// Returns the blob length, or `None` when nothing is stored.
    fn load(&self, key: &str, buf: &mut [u8]) -> Result<Option<usize>, PersistenceError>;

    /// Store `data` under `key`
    fn save(&self, key: &str, data: &[u8]) -> Result<(), PersistenceError>;
}

/// Coalesces save requests into one delayed write
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Schedule a save `delay` after `now`, replacing any pending one
    pub fn request(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` once when the pending save is due
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Load the persisted state, `Ok(None)` when nothing was stored yet
pub fn load_state(store: &dyn SettingsStore) -> Result<Option<UnderglowState>, PersistenceError> {
    // One spare byte so an oversized blob is detected as a size mismatch
    let mut buf = [0u8; STATE_BLOB_LEN + 1];
    let Some(len) = store.load(SETTINGS_KEY, &mut buf)? else {
        return Ok(None);
    };
    let blob = buf.get(..len).ok_or(PersistenceError::Size(len))?;
    let state = UnderglowState::from_bytes(blob)?;
    info!("underglow: restored persisted state {:?}", state);
    Ok(Some(state))
}

/// State encoded for a settings write that has not happened yet
///
/// The blob is captured when the save becomes due, the write itself can run
/// later, outside of any lock held around the controller.
pub struct PendingSave<'a> {
    store: &'a dyn SettingsStore,
    blob: [u8; STATE_BLOB_LEN],
}

impl<'a> PendingSave<'a> {
    pub fn new(store: &'a dyn SettingsStore, state: &UnderglowState) -> Self {
        Self {
            store,
            blob: state.to_bytes(),
        }
    }

    pub const fn blob(&self) -> &[u8; STATE_BLOB_LEN] {
        &self.blob
    }

    /// Write the blob, logging a failure
    ///
    /// Returns `true` when the store accepted the write.
    pub fn commit(self) -> bool {
        debug!("underglow: saving state {:?}", self.blob);
        match self.store.save(SETTINGS_KEY, &self.blob) {
            Ok(()) => true,
            Err(err) => {
                error!("underglow: failed to save state: {}", err);
                false
            }
        }
    }
}

/// Write the state to the store
pub fn save_state(
    store: &dyn SettingsStore,
    state: &UnderglowState,
) -> Result<(), PersistenceError> {
    store.save(SETTINGS_KEY, &state.to_bytes())
}
