//! Underglow state and its persisted form

use bytemuck::{Pod, Zeroable};

use crate::color::Hsb;
use crate::effect::EffectId;
use crate::error::{InvalidArgument, PersistenceError};

/// Slowest animation speed
pub const SPEED_MIN: u8 = 1;
/// Fastest animation speed
pub const SPEED_MAX: u8 = 5;

/// Size of the persisted state blob
pub const STATE_BLOB_LEN: usize = core::mem::size_of::<PersistentUnderglowState>();

/// Mutable configuration of the underglow
///
/// This is the single source of truth for rendering and the value that is
/// persisted across power cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderglowState {
    /// Base color for solid, breathe, spectrum and swirl
    pub color: Hsb,
    /// Phase advance multiplier, `1..=5`
    pub animation_speed: u8,
    /// Active effect
    pub current_effect: EffectId,
    /// Effect-local phase accumulator
    pub animation_step: u16,
    /// Whether the strip is lit
    pub on: bool,
}

impl UnderglowState {
    /// Check that color and speed are inside their ranges
    pub const fn validate(self) -> Result<Self, InvalidArgument> {
        if let Err(err) = self.color.validate() {
            return Err(err);
        }
        if self.animation_speed < SPEED_MIN || self.animation_speed > SPEED_MAX {
            return Err(InvalidArgument::AnimationSpeed(self.animation_speed));
        }
        Ok(self)
    }

    /// Encode the persisted part of the state
    pub fn to_bytes(&self) -> [u8; STATE_BLOB_LEN] {
        let record = PersistentUnderglowState::from(*self);
        let mut out = [0u8; STATE_BLOB_LEN];
        out.copy_from_slice(bytemuck::bytes_of(&record));
        out
    }

    /// Decode a persisted blob
    ///
    /// The animation step is not persisted and always starts at zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let record: PersistentUnderglowState = bytemuck::try_pod_read_unaligned(bytes)
            .map_err(|_| PersistenceError::Size(bytes.len()))?;
        Self::try_from(record).map_err(PersistenceError::Invalid)
    }
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct PersistentUnderglowState {
    hue: [u8; 2],
    saturation: u8,
    brightness: u8,
    animation_speed: u8,
    effect: u8,
    on: u8,
    _padding: u8,
}

impl From<UnderglowState> for PersistentUnderglowState {
    fn from(state: UnderglowState) -> Self {
        Self {
            hue: state.color.hue.to_le_bytes(),
            saturation: state.color.saturation,
            brightness: state.color.brightness,
            animation_speed: state.animation_speed,
            effect: state.current_effect as u8,
            on: u8::from(state.on),
            _padding: 0,
        }
    }
}

impl TryFrom<PersistentUnderglowState> for UnderglowState {
    type Error = InvalidArgument;

    fn try_from(record: PersistentUnderglowState) -> Result<Self, Self::Error> {
        let current_effect =
            EffectId::from_raw(record.effect).ok_or(InvalidArgument::EffectIndex(record.effect))?;
        let state = Self {
            color: Hsb::new(
                u16::from_le_bytes(record.hue),
                record.saturation,
                record.brightness,
            ),
            animation_speed: record.animation_speed,
            current_effect,
            animation_step: 0,
            on: record.on != 0,
        };
        state.validate()
    }
}
