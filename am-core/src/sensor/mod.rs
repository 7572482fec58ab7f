//! Sensor-side selection: classification and mode/clock selection

mod classifier;
mod selector;

pub use classifier::classify;
pub use selector::{ModeSelector, SensorControl};
