/*
 * This file is part of Adaptive MIPI.
 *
 * Copyright (C) 2025 Adaptive MIPI contributors
 *
 * Adaptive MIPI is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Adaptive MIPI is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Adaptive MIPI. If not, see <https://www.gnu.org/licenses/>.
 */

//! Offline commands: frame decoding and selection against the built-in tables

use serde::Serialize;

use am_core::{
    classify, AdaptiveMipi, AdaptiveMipiConfig, RadioChannelDescriptor, Result, SensorControl,
};
use am_protocol::{encode_cp_channel_frame, parse_hex, IpcFrame};

/// Decoded modem frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub main_cmd: u8,
    pub sub_cmd: u8,
    pub dev_id: u32,
    pub data_len: u32,
    /// Present when the frame is a well-formed CP channel info notification
    pub channel: Option<RadioChannelDescriptor>,
}

pub fn decode_frame(hex: &str) -> Result<FrameReport> {
    let bytes = parse_hex(hex)?;
    let frame = IpcFrame::parse(&bytes)?;
    let msg = frame.to_bridge_message();

    Ok(FrameReport {
        main_cmd: frame.main_cmd,
        sub_cmd: frame.sub_cmd,
        dev_id: msg.dev_id,
        data_len: msg.data_len,
        channel: msg.cp_channel_info(),
    })
}

/// Inputs for an offline resolution
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub sensor_id: u16,
    pub mode: u32,
    pub rf: RadioChannelDescriptor,
    pub adaptive_mipi_mode: i32,
    pub factory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    pub sensor_id: u16,
    pub camera_type: String,
    pub mode: String,
    pub rf: RadioChannelDescriptor,
    pub setting_index: usize,
    pub label: String,
}

/// Run the full notify/init/update/label sequence in-process
pub fn resolve_offline(opts: &ResolveOptions) -> Result<ResolveReport> {
    let config = AdaptiveMipiConfig {
        adaptive_mipi_mode: opts.adaptive_mipi_mode,
        factory_mode: opts.factory,
        ..AdaptiveMipiConfig::default()
    };
    config.validate()?;

    let mipi = AdaptiveMipi::new(&config);
    mipi.register();
    mipi.deliver_frame(&encode_cp_channel_frame(&opts.rf))?;

    let selector = mipi.selector();
    let mut ctrl = SensorControl::new(opts.sensor_id, opts.mode);
    selector.init_mode(&mut ctrl);
    let index = selector.update_mode(&mut ctrl);
    let label = selector.get_clock_label(&ctrl)?;

    Ok(ResolveReport {
        sensor_id: opts.sensor_id,
        camera_type: ctrl.camera_type().name().to_string(),
        mode: ctrl.mode_slot().name().to_string(),
        rf: opts.rf,
        setting_index: index.get().unwrap_or_default(),
        label: label.to_string(),
    })
}

pub fn classify_name(sensor_id: u16) -> &'static str {
    classify(sensor_id).name()
}

/// Parse a sensor id given as `0x08E3` or decimal
pub fn parse_sensor_id(s: &str) -> std::result::Result<u16, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid sensor id '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_core::{resolve, sensor_id, AdaptiveMipiError, BUILTIN_TABLES};

    fn opts(rf: RadioChannelDescriptor) -> ResolveOptions {
        ResolveOptions {
            sensor_id: sensor_id::S5KGN3,
            mode: 0,
            rf,
            adaptive_mipi_mode: 0,
            factory: false,
        }
    }

    #[test]
    fn test_decode_documented_frame() {
        let report = decode_frame("10 00 AA BB 27 01 03 03 07 00 00 00 2C 01 00 00").unwrap();
        assert_eq!(report.dev_id, 1);
        assert_eq!(report.data_len, 9);
        assert_eq!(report.channel, Some(RadioChannelDescriptor::new(3, 7, 300)));
    }

    #[test]
    fn test_decode_other_subcommand_has_no_channel() {
        let report = decode_frame("10 00 00 00 27 02 03 03 07 00 00 00 2C 01 00 00").unwrap();
        assert_eq!(report.dev_id, 2);
        assert_eq!(report.channel, None);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_frame("zz").is_err());
        assert!(decode_frame("10 00 AA").unwrap_err().is_frame_error());
    }

    #[test]
    fn test_resolve_matches_table() {
        let rf = RadioChannelDescriptor::new(3, 1, 300);
        let report = resolve_offline(&opts(rf)).unwrap();

        let table = BUILTIN_TABLES.wide[0];
        let expected = resolve(table.channels, &rf).unwrap_or(0);
        assert_eq!(report.setting_index, expected);
        assert_eq!(report.label, table.settings[expected].label);
        assert_eq!(report.camera_type, "WIDE");
        assert_eq!(report.mode, "A");
    }

    #[test]
    fn test_resolve_honours_override() {
        let mut o = opts(RadioChannelDescriptor::new(3, 1, 300));
        o.adaptive_mipi_mode = 12;
        o.factory = true;
        assert_eq!(resolve_offline(&o).unwrap().setting_index, 2);
    }

    #[test]
    fn test_resolve_rejects_bad_override() {
        let mut o = opts(RadioChannelDescriptor::new(3, 1, 300));
        o.adaptive_mipi_mode = 4;
        assert!(matches!(
            resolve_offline(&o),
            Err(AdaptiveMipiError::InvalidOverride { value: 4, .. })
        ));
    }

    #[test]
    fn test_parse_sensor_id() {
        assert_eq!(parse_sensor_id("0x08E3"), Ok(0x08E3));
        assert_eq!(parse_sensor_id("884"), Ok(884));
        assert!(parse_sensor_id("0xZZ").is_err());
        assert!(parse_sensor_id("70000").is_err());
    }

    #[test]
    fn test_classify_name() {
        assert_eq!(classify_name(sensor_id::IMX754), "TELE");
        assert_eq!(classify_name(0x1234), "INVALID");
    }
}
