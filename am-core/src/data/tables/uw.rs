//! Ultrawide camera MIPI tables (IMX564 / IMX258)

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 9] = [
    E::new(Rat::Gsm, 1, 128, 251, 2),
    E::new(Rat::Wcdma, 1, 10562, 10838, 1),
    E::new(Rat::Lte, 1, 0, 599, 0),
    E::new(Rat::Lte, 3, 1200, 1574, 2),
    E::new(Rat::Lte, 3, 1575, 1949, 1),
    E::new(Rat::Lte, 7, 2750, 3449, 1),
    E::new(Rat::Lte, 28, 9210, 9659, 2),
    E::new(Rat::Nr5g, 41, 499200, 537999, 2),
    E::new(Rat::Nr5g, 78, 620000, 653333, 1),
];

static SETTINGS_A: [S; 3] = [S::new("1540 Mhz"), S::new("1492 Mhz"), S::new("1588 Mhz")];
static SETTINGS_B: [S; 3] = [S::new("1190 Mhz"), S::new("1150 Mhz"), S::new("1230 Mhz")];

pub static MODES: [SensorModeTable; 2] = [
    SensorModeTable::new(&CHANNELS, &SETTINGS_A),
    SensorModeTable::new(&CHANNELS, &SETTINGS_B),
];
