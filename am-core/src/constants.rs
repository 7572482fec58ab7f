//! Constants and configuration values for Adaptive MIPI
//!
//! Centralizes magic numbers, paths, and configuration defaults.

/// System paths
pub mod paths {
    /// Configuration directory
    pub const CONFIG_DIR: &str = "/etc/adaptive-mipi";

    /// Configuration file name inside `CONFIG_DIR`
    pub const CONFIG_FILE: &str = "config.json";

    /// Default daemon socket
    pub const SOCKET_PATH: &str = "/run/adaptive-mipi.sock";

    /// Presence of this socket means journald is available
    pub const JOURNALD_SOCKET: &str = "/run/systemd/journal/socket";

    /// Path of the system-wide configuration file
    pub fn system_config_file() -> std::path::PathBuf {
        std::path::Path::new(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Per-user configuration file, used when running unprivileged
    pub fn user_config_file() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("adaptive-mipi").join(CONFIG_FILE))
    }
}

/// Environment variables
pub mod env {
    /// Log filter for the daemon (EnvFilter syntax)
    pub const LOG: &str = "ADAPTIVE_MIPI_LOG";

    /// Overrides `adaptive_mipi_mode` from the config file
    pub const MODE: &str = "ADAPTIVE_MIPI_MODE";
}

/// Clock selection policy values
pub mod selection {
    /// Setting index used when nothing better is known
    pub const DEFAULT_SETTING_INDEX: usize = 0;

    /// Override values map to `value - OVERRIDE_BASE`
    pub const OVERRIDE_BASE: i32 = 10;

    /// Logical sensor modes per camera type (A, B, C, D)
    pub const MAX_SENSOR_MODES: usize = 4;
}

/// Limits for external input
pub mod limits {
    /// Maximum config file size in bytes
    pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;
}

/// Default values for configuration
pub mod defaults {
    pub const LOG_LEVEL: &str = "info";
    pub const ADAPTIVE_MIPI_MODE: i32 = 0;
}
