//! Unified error handling for Adaptive MIPI
//!
//! This crate provides a single error type used across all Adaptive MIPI components.
//! It uses thiserror for ergonomic error definitions with proper Display and Error trait impls.

use std::io;
use std::path::PathBuf;

/// Result type alias using AdaptiveMipiError
pub type Result<T> = std::result::Result<T, AdaptiveMipiError>;

/// Unified error type for all Adaptive MIPI operations
#[derive(thiserror::Error, Debug)]
pub enum AdaptiveMipiError {
    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    // ============================================================================
    // Wire Frame Errors
    // ============================================================================
    #[error("Frame too short: {actual} bytes (need at least {min})")]
    FrameTooShort {
        actual: usize,
        min: usize,
    },

    #[error("Frame length mismatch: header says {declared} bytes, got {actual}")]
    FrameLengthMismatch {
        declared: usize,
        actual: usize,
    },

    #[error("Unexpected command byte {found:#04x} (expected {expected:#04x})")]
    UnexpectedCommand {
        expected: u8,
        found: u8,
    },

    #[error("Payload length {actual} does not match record size {expected}")]
    PayloadSize {
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    // ============================================================================
    // Selection Errors
    // ============================================================================
    #[error("Clock setting index not resolved yet (run update_mode first)")]
    ClockNotResolved,

    #[error("Clock setting index {index} out of range (table has {len} settings)")]
    SettingIndexOutOfRange {
        index: usize,
        len: usize,
    },

    #[error("Sensor mode table not selected (run init_mode first)")]
    TableNotSelected,

    #[error("Invalid mode table at entry {entry}: {reason}")]
    InvalidTable {
        entry: usize,
        reason: String,
    },

    #[error("Invalid override value {value}: must be <= 0 or >= {base}")]
    InvalidOverride {
        value: i32,
        base: i32,
    },

    // ============================================================================
    // Daemon and IPC Errors
    // ============================================================================
    #[error("Daemon connection failed: {0}")]
    DaemonConnection(String),

    #[error("Daemon request failed: {0}")]
    DaemonRequest(String),

    #[error("IPC protocol error: {0}")]
    IpcProtocol(String),

    #[error("Message too large: {size} bytes (max {max_size} bytes)")]
    MessageTooLarge {
        size: usize,
        max_size: usize,
    },

    #[error("Unknown sensor slot: {0}")]
    UnknownSlot(u32),
}

impl AdaptiveMipiError {
    /// Create an invalid config error for a named field
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a daemon error from a string
    pub fn daemon(msg: impl Into<String>) -> Self {
        Self::DaemonRequest(msg.into())
    }

    /// Whether this error came from decoding an external frame or payload
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            Self::FrameTooShort { .. }
                | Self::FrameLengthMismatch { .. }
                | Self::UnexpectedCommand { .. }
                | Self::PayloadSize { .. }
                | Self::InvalidHex(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_errors_are_classified() {
        assert!(AdaptiveMipiError::InvalidHex("zz".into()).is_frame_error());
        assert!(AdaptiveMipiError::FrameTooShort { actual: 3, min: 7 }.is_frame_error());
        assert!(!AdaptiveMipiError::invalid_config("log_level", "unknown").is_frame_error());
        assert!(!AdaptiveMipiError::InvalidTable { entry: 0, reason: "x".into() }.is_frame_error());
    }

    #[test]
    fn test_table_error_names_entry() {
        let err = AdaptiveMipiError::InvalidTable {
            entry: 2,
            reason: "min 9 > max 1".into(),
        };
        assert_eq!(err.to_string(), "Invalid mode table at entry 2: min 9 > max 1");
    }

    #[test]
    fn test_daemon_helper_is_request_error() {
        assert!(matches!(
            AdaptiveMipiError::daemon("slot busy"),
            AdaptiveMipiError::DaemonRequest(m) if m == "slot busy"
        ));
    }
}
