use crate::error::PowerError;

/// Auxiliary power switch for the LED strip
pub trait PowerControl {
    fn enable(&self) -> Result<(), PowerError>;

    fn disable(&self) -> Result<(), PowerError>;
}
