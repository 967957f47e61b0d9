pub use log::{debug, error, info, warn};

/// Route `log` output to the ESP32 serial console
#[cfg(feature = "esp32-log")]
pub fn init_esp_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
