//! Front top (under display) camera MIPI tables (IMX471)

use crate::data::types::{ChannelRangeEntry as E, ClockSettingEntry as S, Rat, SensorModeTable};

static CHANNELS: [E; 6] = [
    E::new(Rat::Wcdma, 1, 10562, 10838, 0),
    E::new(Rat::Lte, 1, 0, 599, 1),
    E::new(Rat::Lte, 3, 1200, 1949, 1),
    E::new(Rat::Lte, 7, 2750, 3449, 0),
    E::new(Rat::Nr5g, 78, 620000, 636666, 1),
    E::new(Rat::Nr5g, 78, 636667, 653333, 0),
];

static SETTINGS_A: [S; 2] = [S::new("1144 Mhz"), S::new("1092 Mhz")];

pub static MODES: [SensorModeTable; 1] = [SensorModeTable::new(&CHANNELS, &SETTINGS_A)];
