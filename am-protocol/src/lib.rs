//! Shared protocol types for Adaptive MIPI
//!
//! Two layers live here:
//! - [`wire`]: the binary notification format pushed by the modem bridge
//! - the JSON-lines request/response envelopes spoken over the daemon socket

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub mod wire;

pub use wire::{
    encode_cp_channel_frame, parse_hex, to_hex, IpcFrame, RadioChannelDescriptor,
    RilBridgeMessage, IPC_HEADER_LEN, IPC_MAIN_CMD_SYSTEM, IPC_NOTI_CMD,
    IPC_SYSTEM_CP_CHANNEL_INFO,
};

/// Global request ID counter for correlation
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Maximum message size for IPC (8KB)
pub const MAX_MESSAGE_SIZE: usize = 8 * 1024;

/// Maximum raw notification payload accepted over IPC
pub const MAX_NOTIFY_DATA_LEN: usize = 256;

/// Maximum hex dump length for `NotifyFrame`
const MAX_FRAME_HEX_LEN: usize = 3 * (MAX_NOTIFY_DATA_LEN + IPC_HEADER_LEN);

/// Number of sensor slots a daemon hosts (one per camera on typical devices)
pub const MAX_SENSOR_SLOTS: u32 = 8;

/// Generate a unique request ID for correlation
pub fn generate_request_id() -> u64 {
    REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation and debugging
    pub id: u64,
    /// The actual request
    #[serde(flatten)]
    pub request: Request,
}

impl RequestEnvelope {
    pub fn new(request: Request) -> Self {
        Self {
            id: generate_request_id(),
            request,
        }
    }

    pub fn with_id(request: Request, id: u64) -> Self {
        Self { id, request }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", content = "data")]
pub enum Request {
    Ping,
    Version,
    /// Bridge message already stripped of its frame header
    Notify { dev_id: u32, data: Vec<u8> },
    /// Complete modem frame as a hex dump
    NotifyFrame { hex: String },
    Classify { sensor_id: u16 },
    InitMode { slot: u32, sensor_id: u16, mode: u32 },
    UpdateMode { slot: u32 },
    GetClockLabel { slot: u32 },
    /// Commit the resolved index as applied (two-phase apply)
    ApplyClock { slot: u32 },
    GetRfInfo,
    GetOverride,
    SetOverride { value: i32 },
}

impl Request {
    /// Validate request parameters before sending to daemon
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Request::Ping
            | Request::Version
            | Request::GetRfInfo
            | Request::GetOverride
            | Request::Classify { .. }
            | Request::SetOverride { .. } => Ok(()),

            Request::Notify { data, .. } => {
                if data.len() > MAX_NOTIFY_DATA_LEN {
                    return Err(format!(
                        "Notification payload too large: {} > {} bytes",
                        data.len(),
                        MAX_NOTIFY_DATA_LEN
                    ));
                }
                Ok(())
            }

            Request::NotifyFrame { hex } => {
                if hex.is_empty() {
                    return Err("Frame cannot be empty".into());
                }
                if hex.len() > MAX_FRAME_HEX_LEN {
                    return Err(format!(
                        "Frame hex too long: {} > {} chars",
                        hex.len(),
                        MAX_FRAME_HEX_LEN
                    ));
                }
                Ok(())
            }

            Request::InitMode { slot, .. }
            | Request::UpdateMode { slot }
            | Request::GetClockLabel { slot }
            | Request::ApplyClock { slot } => validate_slot(*slot),
        }
    }
}

fn validate_slot(slot: u32) -> Result<(), String> {
    if slot >= MAX_SENSOR_SLOTS {
        return Err(format!(
            "Sensor slot {} out of range (0-{})",
            slot,
            MAX_SENSOR_SLOTS - 1
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response correlates to
    pub id: u64,
    #[serde(flatten)]
    pub response: Response,
}

impl ResponseEnvelope {
    pub fn new(id: u64, response: Response) -> Self {
        Self { id, response }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Response {
    #[serde(rename = "ok")]
    Ok(ResponseData),
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data - each field is only present for the requests that produce it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether a subscriber accepted a notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rf_info: Option<RadioChannelDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_mode: Option<i32>,
}

impl ResponseData {
    pub fn none() -> Self { Self::default() }
    pub fn string(v: String) -> Self { Self { value: Some(v), ..Self::default() } }
    pub fn handled(h: bool) -> Self { Self { handled: Some(h), ..Self::default() } }
    pub fn rf(d: RadioChannelDescriptor) -> Self { Self { rf_info: Some(d), ..Self::default() } }
    pub fn camera(c: String) -> Self { Self { camera_type: Some(c), ..Self::default() } }
    pub fn selection(s: SelectionInfo) -> Self { Self { selection: Some(s), ..Self::default() } }
    pub fn override_mode(m: i32) -> Self { Self { override_mode: Some(m), ..Self::default() } }
}

/// Snapshot of a sensor slot's resolved selection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionInfo {
    pub slot: u32,
    pub sensor_id: u16,
    pub camera_type: String,
    /// Mode table actually in use ("A" through "D")
    pub mode: String,
    /// Index last applied to the sensor, if any
    pub current_index: Option<usize>,
    /// Index resolved for the next apply, if any
    pub new_index: Option<usize>,
    pub label: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Response::Ok(ResponseData::none())
    }

    pub fn ok_string(s: impl Into<String>) -> Self {
        Response::Ok(ResponseData::string(s.into()))
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Response::Error { message: msg.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_wire_shape() {
        let env = RequestEnvelope::with_id(Request::UpdateMode { slot: 2 }, 7);
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"id":7,"cmd":"UpdateMode","data":{"slot":2}}"#);

        let back: RequestEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back.request, Request::UpdateMode { slot: 2 });
    }

    #[test]
    fn test_unit_request_parses_without_data() {
        let env: RequestEnvelope = serde_json::from_str(r#"{"id":1,"cmd":"GetRfInfo"}"#).unwrap();
        assert_eq!(env.request, Request::GetRfInfo);
    }

    #[test]
    fn test_validate_slot_bounds() {
        assert!(Request::UpdateMode { slot: MAX_SENSOR_SLOTS - 1 }.validate().is_ok());
        assert!(Request::UpdateMode { slot: MAX_SENSOR_SLOTS }.validate().is_err());
        assert!(Request::InitMode { slot: 99, sensor_id: 0, mode: 0 }.validate().is_err());
    }

    #[test]
    fn test_validate_notify_sizes() {
        let ok = Request::Notify { dev_id: 1, data: vec![0; 9] };
        assert!(ok.validate().is_ok());

        let big = Request::Notify { dev_id: 1, data: vec![0; MAX_NOTIFY_DATA_LEN + 1] };
        assert!(big.validate().is_err());

        assert!(Request::NotifyFrame { hex: String::new() }.validate().is_err());
    }

    #[test]
    fn test_response_omits_empty_fields() {
        let env = ResponseEnvelope::new(3, Response::Ok(ResponseData::handled(true)));
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"id":3,"status":"ok","handled":true}"#);
    }
}
