//! Sensor classification

use tracing::info;

use crate::data::{sensor_id, CameraType};

/// Map a hardware sensor id to its camera position
pub fn classify(id: u16) -> CameraType {
    let camera = match id {
        sensor_id::S5KGN3 | sensor_id::S5KHP2 | sensor_id::S5K2LD => CameraType::Wide,
        sensor_id::IMX374 | sensor_id::S5K3J1 | sensor_id::S5K3LU => CameraType::Front,
        sensor_id::IMX564 | sensor_id::IMX258 => CameraType::Uw,
        sensor_id::S5K3K1 | sensor_id::IMX754 => CameraType::Tele,
        sensor_id::IMX471 => CameraType::FrontTop,
        _ => CameraType::Invalid,
    };

    info!("[AM_DBG] sensor_type : {}, {:#x}", camera, id);
    camera
}
