//! Error types
//!
//! Validation errors are returned to the caller. Output, power and
//! persistence failures are only reported by collaborators; the controller
//! logs them and keeps going.

use thiserror::Error;

/// Error returned by the control operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderglowError {
    /// No LED strip output was attached
    #[error("LED strip output is not attached")]
    NotAttached,
    /// An argument was outside of its allowed range
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

/// Out-of-range argument
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("effect index {0} is out of range")]
    EffectIndex(u8),
    #[error("hue {0} is out of range")]
    Hue(u16),
    #[error("saturation {0} is out of range")]
    Saturation(u8),
    #[error("brightness {0} is out of range")]
    Brightness(u8),
    #[error("animation speed {0} is out of range")]
    AnimationSpeed(u8),
}

/// LED strip write failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    #[error("failed to write frame to the LED strip")]
    Write,
}

/// Auxiliary power switch failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    #[error("failed to switch auxiliary power")]
    Switch,
}

/// Settings store failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceError {
    /// Store is handling another request
    #[error("settings store is busy")]
    Busy,
    /// Underlying storage driver failed
    #[error("settings store driver error")]
    Driver,
    /// Stored blob has an unexpected size
    #[error("persisted state has unexpected size {0}")]
    Size(usize),
    /// Stored blob decoded to out-of-range values
    #[error("persisted state is invalid: {0}")]
    Invalid(InvalidArgument),
}

/// Invalid configuration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("brightness range {min}..{max} is invalid")]
    BrightnessRange { min: u8, max: u8 },
    #[error("strip length {len} exceeds frame buffer capacity {capacity}")]
    StripTooLong { len: usize, capacity: usize },
    #[error("indicator pixel {index} is outside of strip length {len}")]
    LayoutOutOfRange { index: u8, len: usize },
    #[error("default state is invalid: {0}")]
    Defaults(InvalidArgument),
}
