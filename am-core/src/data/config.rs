//! Configuration management
//!
//! `AdaptiveMipiConfig` is the on-disk JSON configuration. `ModuleParams` holds
//! the knobs that stay writable while running (the engineering override and
//! the factory/test flags), shared by `Arc` between the selector and the daemon.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::constants::{defaults, env, limits, paths, selection};
use crate::error::{AdaptiveMipiError, Result};

/// Adaptive MIPI configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveMipiConfig {
    /// Engineering override: values > 0 force setting index `value - 10`
    #[serde(default = "default_adaptive_mipi_mode")]
    pub adaptive_mipi_mode: i32,

    /// Factory builds always use setting index 0
    #[serde(default)]
    pub factory_mode: bool,

    /// Rear FRS DRAM test: keep the previously selected table on init
    #[serde(default)]
    pub frs_dram_test_mode: bool,

    /// Log filter (EnvFilter syntax)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Daemon socket path
    #[serde(default = "default_socket_path")]
    pub socket_path: String,
}

fn default_adaptive_mipi_mode() -> i32 {
    defaults::ADAPTIVE_MIPI_MODE
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

fn default_socket_path() -> String {
    paths::SOCKET_PATH.to_string()
}

impl Default for AdaptiveMipiConfig {
    fn default() -> Self {
        Self {
            adaptive_mipi_mode: default_adaptive_mipi_mode(),
            factory_mode: false,
            frs_dram_test_mode: false,
            log_level: default_log_level(),
            socket_path: default_socket_path(),
        }
    }
}

impl AdaptiveMipiConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        validate_override(self.adaptive_mipi_mode)?;

        if self.socket_path.is_empty() || !self.socket_path.starts_with('/') {
            return Err(AdaptiveMipiError::invalid_config(
                "socket_path",
                "must be an absolute path",
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(AdaptiveMipiError::invalid_config("log_level", "cannot be empty"));
        }
        Ok(())
    }

    /// Apply environment overrides (`ADAPTIVE_MIPI_MODE`)
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(env::MODE) {
            let value = raw.trim().parse::<i32>().map_err(|_| {
                AdaptiveMipiError::invalid_config(env::MODE, format!("not an integer: '{}'", raw))
            })?;
            self.adaptive_mipi_mode = value;
        }
        Ok(())
    }
}

/// Override values 1..=9 would map to a negative setting index
pub fn validate_override(value: i32) -> Result<()> {
    if value > 0 && value < selection::OVERRIDE_BASE {
        return Err(AdaptiveMipiError::InvalidOverride {
            value,
            base: selection::OVERRIDE_BASE,
        });
    }
    Ok(())
}

/// Load configuration from a file. A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<AdaptiveMipiConfig> {
    if !path.exists() {
        return Ok(AdaptiveMipiConfig::default());
    }

    let metadata = fs::metadata(path).map_err(|e| AdaptiveMipiError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > limits::MAX_CONFIG_FILE_SIZE {
        return Err(AdaptiveMipiError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: limits::MAX_CONFIG_FILE_SIZE,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| AdaptiveMipiError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AdaptiveMipiConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load the system configuration, falling back to the user configuration
/// when the system file doesn't exist, then apply environment overrides.
pub fn load_default_config() -> Result<AdaptiveMipiConfig> {
    let system = paths::system_config_file();
    let path = if system.exists() {
        Some(system)
    } else {
        paths::user_config_file().filter(|p| p.exists())
    };

    let mut config = match path {
        Some(p) => load_config(&p)?,
        None => AdaptiveMipiConfig::default(),
    };
    config.apply_env()?;
    config.validate()?;
    Ok(config)
}

/// Runtime-writable knobs
#[derive(Debug, Default)]
pub struct ModuleParams {
    adaptive_mipi_mode: AtomicI32,
    factory_mode: AtomicBool,
    frs_dram_test_mode: AtomicBool,
}

impl ModuleParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from configuration. The `factory` feature forces factory mode on.
    pub fn from_config(config: &AdaptiveMipiConfig) -> Self {
        Self {
            adaptive_mipi_mode: AtomicI32::new(config.adaptive_mipi_mode),
            factory_mode: AtomicBool::new(config.factory_mode || cfg!(feature = "factory")),
            frs_dram_test_mode: AtomicBool::new(config.frs_dram_test_mode),
        }
    }

    pub fn adaptive_mipi_mode(&self) -> i32 {
        self.adaptive_mipi_mode.load(Ordering::Relaxed)
    }

    /// Set the engineering override. Values 1..=9 are rejected.
    pub fn set_adaptive_mipi_mode(&self, value: i32) -> Result<()> {
        validate_override(value)?;
        self.adaptive_mipi_mode.store(value, Ordering::Relaxed);
        Ok(())
    }

    pub fn factory_mode(&self) -> bool {
        self.factory_mode.load(Ordering::Relaxed)
    }

    pub fn set_factory_mode(&self, enabled: bool) {
        self.factory_mode.store(enabled, Ordering::Relaxed);
    }

    pub fn frs_dram_test_mode(&self) -> bool {
        self.frs_dram_test_mode.load(Ordering::Relaxed)
    }

    pub fn set_frs_dram_test_mode(&self, enabled: bool) {
        self.frs_dram_test_mode.store(enabled, Ordering::Relaxed);
    }
}
