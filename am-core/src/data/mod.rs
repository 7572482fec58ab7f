//! Data types, static tables, and configuration
//!
//! Contains all core data structures and configuration management.

mod config;
pub mod tables;
mod types;

pub use config::{
    load_config, load_default_config, validate_override, AdaptiveMipiConfig, ModuleParams,
};
pub use tables::{TableRegistry, BUILTIN_TABLES};
pub use types::{
    sensor_id, CameraType, ChannelRangeEntry, ClockIndex, ClockSettingEntry, ModeSlot,
    RadioChannelDescriptor, Rat, RatBand, SensorModeTable,
};
