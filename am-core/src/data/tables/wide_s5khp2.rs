//! Wide camera MIPI tables for the S5KHP2 platform variant

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 12] = [
    E::new(Rat::Gsm, 1, 128, 251, 1),
    E::new(Rat::Gsm, 3, 512, 885, 2),
    E::new(Rat::Wcdma, 1, 10562, 10838, 1),
    E::new(Rat::Lte, 1, 0, 599, 2),
    E::new(Rat::Lte, 3, 1200, 1499, 1),
    E::new(Rat::Lte, 3, 1500, 1949, 0),
    E::new(Rat::Lte, 7, 2750, 3449, 2),
    E::new(Rat::Lte, 28, 9210, 9659, 1),
    E::new(Rat::Nr5g, 41, 499200, 537999, 1),
    E::new(Rat::Nr5g, 77, 620000, 649999, 2),
    E::new(Rat::Nr5g, 77, 650000, 680000, 0),
    E::new(Rat::Nr5g, 78, 620000, 653333, 2),
];

static SETTINGS_A: [S; 3] = [S::new("2288 Mhz"), S::new("2224 Mhz"), S::new("2352 Mhz")];
static SETTINGS_B: [S; 3] = [S::new("1976 Mhz"), S::new("1920 Mhz"), S::new("2032 Mhz")];
static SETTINGS_C: [S; 3] = [S::new("1716 Mhz"), S::new("1664 Mhz"), S::new("1768 Mhz")];

pub static MODES: [SensorModeTable; 3] = [
    SensorModeTable::new(&CHANNELS, &SETTINGS_A),
    SensorModeTable::new(&CHANNELS, &SETTINGS_B),
    SensorModeTable::new(&CHANNELS, &SETTINGS_C),
];
