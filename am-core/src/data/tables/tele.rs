//! Tele camera MIPI tables (S5K3K1)

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 10] = [
    E::new(Rat::Gsm, 2, 0, 124, 1),
    E::new(Rat::Wcdma, 1, 10562, 10838, 0),
    E::new(Rat::Wcdma, 8, 2937, 3088, 1),
    E::new(Rat::Lte, 1, 0, 599, 1),
    E::new(Rat::Lte, 3, 1200, 1949, 0),
    E::new(Rat::Lte, 7, 2750, 3449, 1),
    E::new(Rat::Lte, 20, 6150, 6449, 0),
    E::new(Rat::Nr5g, 1, 422000, 434000, 1),
    E::new(Rat::Nr5g, 78, 620000, 636666, 0),
    E::new(Rat::Nr5g, 78, 636667, 653333, 1),
];

static SETTINGS_A: [S; 2] = [S::new("1196 Mhz"), S::new("1144 Mhz")];
static SETTINGS_B: [S; 2] = [S::new("988 Mhz"), S::new("936 Mhz")];

pub static MODES: [SensorModeTable; 2] = [
    SensorModeTable::new(&CHANNELS, &SETTINGS_A),
    SensorModeTable::new(&CHANNELS, &SETTINGS_B),
];
