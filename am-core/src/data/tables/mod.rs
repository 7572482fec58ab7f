//! Per-sensor MIPI clock tables
//!
//! Each camera type declares one to four mode tables (A-D). Channel ranges in
//! every table are sorted by `(rat_band, channel_min)` and don't overlap within
//! a band; the resolver's binary search depends on that.

#[cfg(not(feature = "dm3q"))]
mod tele;
#[cfg(feature = "dm3q")]
mod tele_imx754;
#[cfg(not(feature = "dm3q"))]
mod wide;
#[cfg(feature = "dm3q")]
mod wide_s5khp2;

mod front;
mod front_top;
mod uw;

#[cfg(feature = "dm3q")]
use tele_imx754 as tele;
#[cfg(feature = "dm3q")]
use wide_s5khp2 as wide;

use crate::data::types::{CameraType, SensorModeTable};

/// Mapping from camera type to its declared mode tables
#[derive(Debug, Clone, Copy)]
pub struct TableRegistry {
    pub wide: &'static [SensorModeTable],
    pub front: &'static [SensorModeTable],
    pub uw: &'static [SensorModeTable],
    pub tele: &'static [SensorModeTable],
    pub front_top: &'static [SensorModeTable],
}

/// Tables compiled into this build
pub static BUILTIN_TABLES: TableRegistry = TableRegistry {
    wide: &wide::MODES,
    front: &front::MODES,
    uw: &uw::MODES,
    tele: &tele::MODES,
    front_top: &front_top::MODES,
};

impl TableRegistry {
    /// Declared mode tables for a camera type. `None` for `Invalid`.
    pub fn modes(&self, camera: CameraType) -> Option<&'static [SensorModeTable]> {
        let modes = match camera {
            CameraType::Wide => self.wide,
            CameraType::Front => self.front,
            CameraType::Uw => self.uw,
            CameraType::Tele => self.tele,
            CameraType::FrontTop => self.front_top,
            CameraType::Invalid => return None,
        };
        (!modes.is_empty()).then_some(modes)
    }

    /// Wide mode A, used for unrecognized sensors. `None` when the registry
    /// declares no wide tables.
    pub fn fallback(&self) -> Option<SensorModeTable> {
        self.wide.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::selection::MAX_SENSOR_MODES;

    #[test]
    fn test_builtin_tables_are_well_formed() {
        for camera in [
            CameraType::Wide,
            CameraType::Front,
            CameraType::Uw,
            CameraType::Tele,
            CameraType::FrontTop,
        ] {
            let modes = BUILTIN_TABLES.modes(camera).unwrap();
            assert!(!modes.is_empty() && modes.len() <= MAX_SENSOR_MODES, "{}", camera);
            for (slot, table) in modes.iter().enumerate() {
                if let Err(e) = table.check_well_formed() {
                    panic!("{} mode {}: {}", camera, slot, e);
                }
            }
        }
    }

    #[test]
    fn test_invalid_camera_has_no_tables() {
        assert!(BUILTIN_TABLES.modes(CameraType::Invalid).is_none());
    }

    #[test]
    fn test_fallback_is_wide_a() {
        assert_eq!(BUILTIN_TABLES.fallback(), Some(BUILTIN_TABLES.wide[0]));
    }

    #[test]
    fn test_empty_registry_has_no_fallback() {
        let empty = TableRegistry {
            wide: &[],
            front: &[],
            uw: &[],
            tele: &[],
            front_top: &[],
        };
        assert_eq!(empty.fallback(), None);
        assert!(empty.modes(CameraType::Wide).is_none());
    }
}
