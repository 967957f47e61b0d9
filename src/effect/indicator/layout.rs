//! Pixel layout of the indicator screen
//!
//! Maps each logical indicator to pixel indices on the strip. The default
//! layout follows a six column key grid where
//! `pixel(col, row) = GRID_COLUMN_STARTS[col - 1] + row`.

use heapless::Vec;

use crate::error::ConfigError;

pub const MAX_LAYER_SLOTS: usize = 8;
pub const MAX_PROFILE_SLOTS: usize = 5;
pub const MAX_BATTERY_SLOTS: usize = 8;

/// First pixel of each grid column
pub const GRID_COLUMN_STARTS: [u8; 6] = [4, 9, 15, 21, 27, 33];

const LOCK_ROW: u8 = 1;
const PROFILE_ROW: u8 = 2;
const LAYER_ROW: u8 = 3;
const BATTERY_ROW: u8 = 4;

/// Pixel index of a grid cell, columns are numbered from 1
pub const fn grid_pixel(col: usize, row: u8) -> u8 {
    GRID_COLUMN_STARTS[col - 1] + row
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndicatorLayout {
    pub caps_lock: Option<u8>,
    pub num_lock: Option<u8>,
    pub scroll_lock: Option<u8>,
    /// Pixel per layer index
    pub layers: Vec<u8, MAX_LAYER_SLOTS>,
    /// Pixel per Bluetooth profile index
    pub profiles: Vec<u8, MAX_PROFILE_SLOTS>,
    /// Battery gauge pixels
    pub battery: Vec<u8, MAX_BATTERY_SLOTS>,
}

impl IndicatorLayout {
    /// Default grid layout, needs at least 38 pixels
    pub fn grid() -> Self {
        Self {
            caps_lock: Some(grid_pixel(6, LOCK_ROW)),
            num_lock: Some(grid_pixel(5, LOCK_ROW)),
            scroll_lock: Some(grid_pixel(4, LOCK_ROW)),
            layers: pixel_list(&[
                grid_pixel(6, LAYER_ROW),
                grid_pixel(5, LAYER_ROW),
                grid_pixel(4, LAYER_ROW),
                grid_pixel(3, LAYER_ROW),
                grid_pixel(2, LAYER_ROW),
                grid_pixel(1, LAYER_ROW),
            ]),
            profiles: pixel_list(&[
                grid_pixel(5, PROFILE_ROW),
                grid_pixel(4, PROFILE_ROW),
                grid_pixel(3, PROFILE_ROW),
                grid_pixel(2, PROFILE_ROW),
            ]),
            battery: pixel_list(&[
                grid_pixel(6, BATTERY_ROW),
                grid_pixel(5, BATTERY_ROW),
                grid_pixel(4, BATTERY_ROW),
                grid_pixel(3, BATTERY_ROW),
                grid_pixel(2, BATTERY_ROW),
                grid_pixel(1, BATTERY_ROW),
            ]),
        }
    }

    /// Every pixel referenced by the layout
    pub fn pixels(&self) -> impl Iterator<Item = u8> + '_ {
        [self.caps_lock, self.num_lock, self.scroll_lock]
            .into_iter()
            .flatten()
            .chain(self.layers.iter().copied())
            .chain(self.profiles.iter().copied())
            .chain(self.battery.iter().copied())
    }

    /// Check that every pixel exists on a strip of `strip_len` LEDs
    pub fn validate(&self, strip_len: usize) -> Result<(), ConfigError> {
        match self.pixels().find(|&index| usize::from(index) >= strip_len) {
            Some(index) => Err(ConfigError::LayoutOutOfRange {
                index,
                len: strip_len,
            }),
            None => Ok(()),
        }
    }
}

fn pixel_list<const N: usize>(ids: &[u8]) -> Vec<u8, N> {
    ids.iter().copied().take(N).collect()
}
