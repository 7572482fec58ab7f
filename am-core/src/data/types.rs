//! Core data types for Adaptive MIPI
//!
//! Defines the static table layout and the per-sensor selection state.

use serde::{Deserialize, Serialize};

use crate::error::{AdaptiveMipiError, Result};

pub use am_protocol::RadioChannelDescriptor;

/// Radio access technology codes as reported by the modem
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rat {
    Gsm = 1,
    Wcdma = 2,
    Lte = 3,
    Tdscdma = 4,
    Cdma = 5,
    Wifi = 6,
    Nr5g = 7,
}

impl Rat {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// `(rat, band)` packed into one ordered key
///
/// RAT occupies the high 32 bits so keys sort by RAT first, then band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RatBand(u64);

impl RatBand {
    pub const fn pack(rat: u8, band: u32) -> Self {
        Self(((rat as u64) << 32) | band as u64)
    }

    pub const fn rat(self) -> u8 {
        (self.0 >> 32) as u8
    }

    pub const fn band(self) -> u32 {
        self.0 as u32
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<&RadioChannelDescriptor> for RatBand {
    fn from(d: &RadioChannelDescriptor) -> Self {
        Self::pack(d.rat, d.band)
    }
}

impl std::fmt::Display for RatBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One channel sub-range of a band and the clock setting it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRangeEntry {
    pub rat_band: RatBand,
    /// Inclusive lower bound
    pub channel_min: u32,
    /// Inclusive upper bound
    pub channel_max: u32,
    /// Index into the parallel clock settings table
    pub setting_index: usize,
}

impl ChannelRangeEntry {
    pub const fn new(
        rat: Rat,
        band: u32,
        channel_min: u32,
        channel_max: u32,
        setting_index: usize,
    ) -> Self {
        Self {
            rat_band: RatBand::pack(rat.code(), band),
            channel_min,
            channel_max,
            setting_index,
        }
    }

    /// Key entry for a single channel: a degenerate range `[channel, channel]`
    pub fn key_for(descriptor: &RadioChannelDescriptor) -> Self {
        Self {
            rat_band: RatBand::from(descriptor),
            channel_min: descriptor.channel,
            channel_max: descriptor.channel,
            setting_index: 0,
        }
    }
}

/// A selectable MIPI clock setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettingEntry {
    /// Human-readable clock speed, e.g. "1612 Mhz"
    pub label: &'static str,
}

impl ClockSettingEntry {
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }
}

/// Channel ranges and clock settings for one (camera type, mode) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorModeTable {
    pub channels: &'static [ChannelRangeEntry],
    pub settings: &'static [ClockSettingEntry],
}

impl SensorModeTable {
    pub const fn new(
        channels: &'static [ChannelRangeEntry],
        settings: &'static [ClockSettingEntry],
    ) -> Self {
        Self { channels, settings }
    }

    /// Check the binary search preconditions and that every setting index exists.
    ///
    /// Used by table tests; selection never calls it.
    pub fn check_well_formed(&self) -> Result<()> {
        for (i, entry) in self.channels.iter().enumerate() {
            if entry.channel_min > entry.channel_max {
                return Err(AdaptiveMipiError::InvalidTable {
                    entry: i,
                    reason: format!("min {} > max {}", entry.channel_min, entry.channel_max),
                });
            }
            if entry.setting_index >= self.settings.len() {
                return Err(AdaptiveMipiError::InvalidTable {
                    entry: i,
                    reason: format!(
                        "setting index {} but only {} settings",
                        entry.setting_index,
                        self.settings.len()
                    ),
                });
            }
        }
        for (i, pair) in self.channels.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            let ordered = a.rat_band < b.rat_band
                || (a.rat_band == b.rat_band && a.channel_max < b.channel_min);
            if !ordered {
                return Err(AdaptiveMipiError::InvalidTable {
                    entry: i + 1,
                    reason: "unsorted or overlapping with the previous entry".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Camera position/type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraType {
    Wide,
    Front,
    Uw,
    Tele,
    FrontTop,
    Invalid,
}

impl CameraType {
    pub fn name(&self) -> &'static str {
        match self {
            CameraType::Wide => "WIDE",
            CameraType::Front => "FRONT",
            CameraType::Uw => "UW",
            CameraType::Tele => "TELE",
            CameraType::FrontTop => "FRONT_TOP",
            CameraType::Invalid => "INVALID",
        }
    }
}

impl std::fmt::Display for CameraType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical sensor mode table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeSlot {
    A,
    B,
    C,
    D,
}

impl ModeSlot {
    pub const ALL: [ModeSlot; 4] = [ModeSlot::A, ModeSlot::B, ModeSlot::C, ModeSlot::D];

    /// Map a requested sensor mode onto a slot.
    ///
    /// Mode 0, or a mode the camera type doesn't declare a table for, falls back to A.
    pub fn select(requested: u32, declared_modes: usize) -> Self {
        let idx = requested as usize;
        if idx == 0 || idx >= declared_modes {
            return ModeSlot::A;
        }
        Self::ALL.get(idx).copied().unwrap_or(ModeSlot::A)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeSlot::A => "A",
            ModeSlot::B => "B",
            ModeSlot::C => "C",
            ModeSlot::D => "D",
        }
    }
}

/// A clock setting index that may not have been resolved yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockIndex {
    #[default]
    Unset,
    Set(usize),
}

impl ClockIndex {
    pub fn get(self) -> Option<usize> {
        match self {
            ClockIndex::Unset => None,
            ClockIndex::Set(i) => Some(i),
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, ClockIndex::Set(_))
    }
}

impl std::fmt::Display for ClockIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockIndex::Unset => f.write_str("unset"),
            ClockIndex::Set(i) => write!(f, "{}", i),
        }
    }
}

/// Hardware sensor identifiers known to the classifier
pub mod sensor_id {
    pub const S5KGN3: u16 = 0x08E3;
    pub const S5KHP2: u16 = 0x1B72;
    pub const S5K2LD: u16 = 0x20C4;
    pub const IMX374: u16 = 0x0374;
    pub const S5K3J1: u16 = 0x30A1;
    pub const S5K3LU: u16 = 0x34CB;
    pub const IMX564: u16 = 0x0564;
    pub const IMX258: u16 = 0x0258;
    pub const S5K3K1: u16 = 0x30B1;
    pub const IMX754: u16 = 0x0754;
    pub const IMX471: u16 = 0x0471;
}
