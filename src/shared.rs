//! Serialized access to one controller from several contexts.
//!
//! The tick timer and control callers (keymap behaviors, host commands)
//! run in different contexts. Wrapping the controller in a
//! `critical-section` mutex makes every tick and every control operation
//! atomic with respect to each other, so a frame never sees a half-applied
//! change.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;

use crate::OutputDriver;
use crate::persistence::PendingSave;
use crate::underglow::{TickResult, Underglow};

/// Controller shared between the timer and control contexts.
///
/// Calls must not be nested: running `lock` from inside another `lock`
/// closure panics.
pub struct SharedUnderglow<'a, O: OutputDriver, const MAX_LEDS: usize> {
    inner: Mutex<RefCell<Underglow<'a, O, MAX_LEDS>>>,
}

impl<'a, O: OutputDriver, const MAX_LEDS: usize> SharedUnderglow<'a, O, MAX_LEDS> {
    pub const fn new(underglow: Underglow<'a, O, MAX_LEDS>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(underglow)),
        }
    }

    /// Run `f` with exclusive access to the controller
    pub fn lock<R>(&self, f: impl FnOnce(&mut Underglow<'a, O, MAX_LEDS>) -> R) -> R {
        critical_section::with(|cs| {
            let mut underglow = self.inner.borrow(cs).borrow_mut();
            f(&mut underglow)
        })
    }

    /// Timer entry point, see [`Underglow::tick`]
    ///
    /// Rendering runs inside the critical section, a due settings write
    /// runs after it is released.
    pub fn tick(&self, now: Instant) -> TickResult {
        let (mut result, save) = self.lock(|underglow| underglow.advance(now));
        result.saved = save.is_some_and(PendingSave::commit);
        result
    }

    pub fn into_inner(self) -> Underglow<'a, O, MAX_LEDS> {
        self.inner.into_inner().into_inner()
    }
}
