//! Tele camera MIPI tables for the IMX754 platform variant

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 7] = [
    E::new(Rat::Wcdma, 1, 10562, 10838, 1),
    E::new(Rat::Lte, 1, 0, 599, 0),
    E::new(Rat::Lte, 3, 1200, 1949, 1),
    E::new(Rat::Lte, 7, 2750, 3449, 0),
    E::new(Rat::Nr5g, 41, 499200, 537999, 1),
    E::new(Rat::Nr5g, 78, 620000, 636666, 1),
    E::new(Rat::Nr5g, 78, 636667, 653333, 0),
];

static SETTINGS_A: [S; 2] = [S::new("1452 Mhz"), S::new("1404 Mhz")];
static SETTINGS_B: [S; 2] = [S::new("1248 Mhz"), S::new("1196 Mhz")];

pub static MODES: [SensorModeTable; 2] = [
    SensorModeTable::new(&CHANNELS, &SETTINGS_A),
    SensorModeTable::new(&CHANNELS, &SETTINGS_B),
];
