//! Adaptive MIPI Core Library
//!
//! Picks the camera MIPI clock setting that interferes least with the radio
//! channel the modem is currently on.
//!
//! # Features
//!
//! - **Channel tracking**: A RIL notifier chain subscriber records every CP channel info report
//! - **Resolution**: Binary search of per-sensor channel range tables
//! - **Mode selection**: Sensor classification, mode tables A-D, factory and override policies
//! - **Configuration**: JSON config plus runtime-writable module parameters
//!
//! # Module Structure
//!
//! - `data/` - Types, clock tables, configuration
//! - `rf/` - Channel state, notifier chain, resolver
//! - `sensor/` - Classification and mode selection
//! - `engine/` - Service object wiring everything together
//!
//! # Example
//!
//! ```no_run
//! use am_core::{AdaptiveMipi, AdaptiveMipiConfig, SensorControl, sensor_id};
//!
//! let mipi = AdaptiveMipi::new(&AdaptiveMipiConfig::default());
//! mipi.register();
//!
//! let mut ctrl = SensorControl::new(sensor_id::S5KGN3, 0);
//! mipi.selector().init_mode(&mut ctrl);
//! mipi.selector().update_mode(&mut ctrl);
//! let label = mipi.selector().get_clock_label(&ctrl).unwrap();
//! ```

// Grouped modules
pub mod data;
pub mod engine;
pub mod rf;
pub mod sensor;

// Standalone modules
pub mod constants;
pub mod error;

// Re-export primary types from data/
pub use data::{
    sensor_id, CameraType, ChannelRangeEntry, ClockIndex, ClockSettingEntry, ModeSlot,
    RadioChannelDescriptor, Rat, RatBand, SensorModeTable, TableRegistry, BUILTIN_TABLES,
};

// Re-export config functions from data/
pub use data::{
    load_config, load_default_config, validate_override, AdaptiveMipiConfig, ModuleParams,
};

// Re-export error types
pub use error::{AdaptiveMipiError, Result};

// Re-export engine types
pub use engine::AdaptiveMipi;

// Re-export RF tracking from rf/
pub use rf::{
    register_listener, resolve, ChannelInfoListener, ChannelStateStore, NotificationBus,
    NotifierBlock, NotifyResult, RilNotifierChain,
};

// Re-export selection from sensor/
pub use sensor::{classify, ModeSelector, SensorControl};
