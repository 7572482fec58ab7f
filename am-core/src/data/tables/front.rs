//! Front camera MIPI tables (IMX374 / S5K3J1 / S5K3LU)

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 8] = [
    E::new(Rat::Gsm, 2, 0, 124, 1),
    E::new(Rat::Wcdma, 1, 10562, 10838, 1),
    E::new(Rat::Lte, 1, 0, 599, 1),
    E::new(Rat::Lte, 3, 1200, 1949, 0),
    E::new(Rat::Lte, 7, 2750, 3099, 1),
    E::new(Rat::Lte, 7, 3100, 3449, 0),
    E::new(Rat::Nr5g, 41, 499200, 537999, 1),
    E::new(Rat::Nr5g, 78, 620000, 653333, 0),
];

static SETTINGS_A: [S; 2] = [S::new("1404 Mhz"), S::new("1352 Mhz")];
static SETTINGS_B: [S; 2] = [S::new("1092 Mhz"), S::new("1040 Mhz")];
static SETTINGS_C: [S; 2] = [S::new("1742 Mhz"), S::new("1690 Mhz")];
static SETTINGS_D: [S; 2] = [S::new("858 Mhz"), S::new("806 Mhz")];

pub static MODES: [SensorModeTable; 4] = [
    SensorModeTable::new(&CHANNELS, &SETTINGS_A),
    SensorModeTable::new(&CHANNELS, &SETTINGS_B),
    SensorModeTable::new(&CHANNELS, &SETTINGS_C),
    SensorModeTable::new(&CHANNELS, &SETTINGS_D),
];
