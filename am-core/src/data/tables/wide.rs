//! Wide camera MIPI tables (S5KGN3 / S5K2LD)

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 16] = [
    E::new(Rat::Gsm, 1, 128, 251, 1),
    E::new(Rat::Gsm, 2, 0, 124, 0),
    E::new(Rat::Gsm, 2, 975, 1023, 0),
    E::new(Rat::Wcdma, 1, 10562, 10700, 1),
    E::new(Rat::Wcdma, 1, 10701, 10838, 2),
    E::new(Rat::Lte, 1, 0, 299, 2),
    E::new(Rat::Lte, 1, 300, 599, 1),
    E::new(Rat::Lte, 3, 1200, 1574, 0),
    E::new(Rat::Lte, 3, 1575, 1949, 1),
    E::new(Rat::Lte, 7, 2750, 3099, 2),
    E::new(Rat::Lte, 7, 3100, 3449, 0),
    E::new(Rat::Lte, 20, 6150, 6449, 1),
    E::new(Rat::Nr5g, 41, 499200, 518599, 0),
    E::new(Rat::Nr5g, 41, 518600, 537999, 2),
    E::new(Rat::Nr5g, 78, 620000, 636666, 1),
    E::new(Rat::Nr5g, 78, 636667, 653333, 2),
];

// Full size 4:3
static SETTINGS_A: [S; 3] = [S::new("2112 Mhz"), S::new("2054 Mhz"), S::new("2171 Mhz")];
// 16:9 crop
static SETTINGS_B: [S; 3] = [S::new("1872 Mhz"), S::new("1820 Mhz"), S::new("1924 Mhz")];
// 2x2 binning, 60 fps
static SETTINGS_C: [S; 3] = [S::new("1680 Mhz"), S::new("1632 Mhz"), S::new("1728 Mhz")];
// Full remosaic
static SETTINGS_D: [S; 3] = [S::new("2496 Mhz"), S::new("2432 Mhz"), S::new("2560 Mhz")];

pub static MODES: [SensorModeTable; 4] = [
    SensorModeTable::new(&CHANNELS, &SETTINGS_A),
    SensorModeTable::new(&CHANNELS, &SETTINGS_B),
    SensorModeTable::new(&CHANNELS, &SETTINGS_C),
    SensorModeTable::new(&CHANNELS, &SETTINGS_D),
];
