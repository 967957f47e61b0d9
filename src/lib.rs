#![no_std]

pub mod color;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod math8;
pub mod persistence;
pub mod power;
pub mod shared;
pub mod state;
pub mod tick_scheduler;
pub mod underglow;

pub use color::{BrightnessRange, Hsb, Rgb, hsb_to_rgb};
pub use config::{StartValues, StepSizes, UnderglowConfig};
pub use effect::indicator::{LockKey, LockKeys, ProfileStatus, StatusSource};
pub use effect::{EffectId, EffectSlot, IndicatorConfig};
pub use error::{
    ConfigError, InvalidArgument, OutputError, PersistenceError, PowerError, UnderglowError,
};
pub use persistence::{PendingSave, SaveDebouncer, SettingsStore};
pub use power::PowerControl;
pub use shared::SharedUnderglow;
pub use state::UnderglowState;
pub use tick_scheduler::TickScheduler;
pub use underglow::{TickResult, Underglow};

pub use embassy_time::{Duration, Instant};
use smart_leds::SmartLedsWrite;

/// Abstract LED strip driver trait
///
/// Implement this trait to support different hardware platforms.
/// The underglow controller is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), OutputError>;
}

/// Output adapter for any `smart-leds` driver
pub struct SmartLedsOutput<W>(pub W);

impl<W: SmartLedsWrite<Color = Rgb>> OutputDriver for SmartLedsOutput<W> {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), OutputError> {
        self.0
            .write(colors.iter().copied())
            .map_err(|_| OutputError::Write)
    }
}
