/*
 * Integration tests for Adaptive MIPI
 *
 * These tests drive modem frames through the notifier chain into the channel
 * store and check what the mode selector makes of them.
 */

use std::io::Write;
use std::sync::Arc;
use std::thread;

use adaptive_mipi::commands::{decode_frame, resolve_offline, ResolveOptions};
use am_core::{
    load_config, sensor_id, AdaptiveMipi, AdaptiveMipiConfig, CameraType, ChannelRangeEntry,
    ClockIndex, ClockSettingEntry, ModeSlot, ModuleParams, NotificationBus, NotifierBlock,
    NotifyResult, RadioChannelDescriptor, Rat, SensorControl, SensorModeTable, TableRegistry,
};
use am_protocol::{encode_cp_channel_frame, RilBridgeMessage};
use serial_test::serial;

// Test tables: GSM band 5 split into two ranges
static CHANNELS: [ChannelRangeEntry; 2] = [
    ChannelRangeEntry::new(Rat::Gsm, 5, 100, 200, 0),
    ChannelRangeEntry::new(Rat::Gsm, 5, 201, 300, 1),
];
static WIDE_SETTINGS: [ClockSettingEntry; 3] = [
    ClockSettingEntry::new("W0"),
    ClockSettingEntry::new("W1"),
    ClockSettingEntry::new("W2"),
];
static FRONT_SETTINGS: [ClockSettingEntry; 2] =
    [ClockSettingEntry::new("F0"), ClockSettingEntry::new("F1")];

static WIDE: [SensorModeTable; 1] = [SensorModeTable::new(&CHANNELS, &WIDE_SETTINGS)];
static FRONT: [SensorModeTable; 4] = [
    SensorModeTable::new(&CHANNELS, &FRONT_SETTINGS),
    SensorModeTable::new(&CHANNELS, &FRONT_SETTINGS),
    SensorModeTable::new(&CHANNELS, &FRONT_SETTINGS),
    SensorModeTable::new(&CHANNELS, &FRONT_SETTINGS),
];

static TABLES: TableRegistry = TableRegistry {
    wide: &WIDE,
    front: &FRONT,
    uw: &WIDE,
    tele: &WIDE,
    front_top: &WIDE,
};

fn service(params: ModuleParams) -> AdaptiveMipi {
    let mipi = AdaptiveMipi::with_tables(params, TABLES);
    assert!(mipi.register());
    mipi
}

fn push(mipi: &AdaptiveMipi, rat: u8, band: u32, channel: u32) -> NotifyResult {
    let frame = encode_cp_channel_frame(&RadioChannelDescriptor::new(rat, band, channel));
    mipi.deliver_frame(&frame).unwrap()
}

fn select(mipi: &AdaptiveMipi, sensor: u16, mode: u32) -> SensorControl {
    let mut ctrl = SensorControl::new(sensor, mode);
    mipi.selector().init_mode(&mut ctrl);
    mipi.selector().update_mode(&mut ctrl);
    ctrl
}

#[test]
fn test_channel_in_range_selects_its_setting() {
    let mipi = service(ModuleParams::new());
    assert_eq!(push(&mipi, 1, 5, 250), NotifyResult::Ok);

    let ctrl = select(&mipi, sensor_id::S5KGN3, 0);
    assert_eq!(ctrl.new_index(), ClockIndex::Set(1));
    assert_eq!(mipi.selector().get_clock_label(&ctrl).unwrap(), "W1");
}

#[test]
fn test_channel_outside_ranges_uses_default() {
    let mipi = service(ModuleParams::new());
    push(&mipi, 1, 5, 50);

    let ctrl = select(&mipi, sensor_id::S5KGN3, 0);
    assert_eq!(ctrl.new_index(), ClockIndex::Set(0));
}

#[test]
fn test_short_payload_keeps_previous_channel() {
    let mipi = service(ModuleParams::new());
    push(&mipi, 1, 5, 250);

    let record = RadioChannelDescriptor::new(1, 5, 150).to_bytes();
    let msg = RilBridgeMessage::new(am_protocol::IPC_SYSTEM_CP_CHANNEL_INFO, &record[..8]);
    assert_eq!(mipi.deliver(&msg), NotifyResult::Done);

    assert_eq!(mipi.selector().get_rf_info(), RadioChannelDescriptor::new(1, 5, 250));
}

#[test]
fn test_front_sensor_unknown_mode_uses_table_a() {
    let mipi = service(ModuleParams::new());
    let ctrl = select(&mipi, sensor_id::S5K3J1, 5);

    assert_eq!(ctrl.camera_type(), CameraType::Front);
    assert_eq!(ctrl.mode_slot(), ModeSlot::A);
    assert_eq!(ctrl.table(), Some(&FRONT[0]));
}

#[test]
fn test_override_beats_factory_and_channel() {
    let params = ModuleParams::new();
    params.set_factory_mode(true);
    params.set_adaptive_mipi_mode(12).unwrap();
    let mipi = service(params);
    push(&mipi, 1, 5, 250);

    let ctrl = select(&mipi, sensor_id::S5KGN3, 0);
    assert_eq!(ctrl.new_index(), ClockIndex::Set(2));
    assert_eq!(mipi.selector().get_clock_label(&ctrl).unwrap(), "W2");
}

#[test]
fn test_factory_forces_default() {
    let params = ModuleParams::new();
    params.set_factory_mode(true);
    let mipi = service(params);
    push(&mipi, 1, 5, 250);

    assert_eq!(select(&mipi, sensor_id::S5KGN3, 0).new_index(), ClockIndex::Set(0));
}

struct Swallow;

impl NotifierBlock for Swallow {
    fn notify(&self, _size: usize, _msg: &RilBridgeMessage<'_>) -> NotifyResult {
        NotifyResult::Stop
    }
}

#[test]
fn test_earlier_subscriber_can_stop_delivery() {
    let mipi = AdaptiveMipi::with_tables(ModuleParams::new(), TABLES);
    mipi.chain().register(Arc::new(Swallow));
    assert!(mipi.register());

    assert_eq!(push(&mipi, 1, 5, 250), NotifyResult::Stop);
    assert!(mipi.selector().get_rf_info().is_unknown());
}

#[test]
fn test_concurrent_updates_stay_consistent() {
    let mipi = Arc::new(service(ModuleParams::new()));

    let writer = {
        let mipi = mipi.clone();
        thread::spawn(move || {
            for i in 0..2000u32 {
                push(&mipi, 1, 5, 50 + (i % 300));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let mipi = mipi.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let ctrl = select(&mipi, sensor_id::S5KGN3, 0);
                    let label = mipi.selector().get_clock_label(&ctrl).unwrap();
                    assert!(["W0", "W1"].contains(&label));

                    let rf = mipi.selector().get_rf_info();
                    assert!(rf.is_unknown() || (rf.rat == 1 && rf.band == 5));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
#[serial]
fn test_config_file_and_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"adaptive_mipi_mode": 11, "factory_mode": true}}"#).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.adaptive_mipi_mode, 11);
    let mipi = AdaptiveMipi::with_tables(ModuleParams::from_config(&config), TABLES);
    mipi.register();
    push(&mipi, 1, 5, 150);
    assert_eq!(select(&mipi, sensor_id::S5KGN3, 0).new_index(), ClockIndex::Set(1));

    std::env::set_var("ADAPTIVE_MIPI_MODE", "10");
    let mut config = load_config(file.path()).unwrap();
    config.apply_env().unwrap();
    std::env::remove_var("ADAPTIVE_MIPI_MODE");
    assert_eq!(config.adaptive_mipi_mode, 10);
}

#[test]
#[serial]
fn test_config_rejects_override_below_base() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"adaptive_mipi_mode": 3}}"#).unwrap();
    assert!(load_config(file.path()).is_err());

    let config = AdaptiveMipiConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_commands_on_builtin_tables() {
    let report = decode_frame("1000AABB27010303070000002C010000").unwrap();
    assert_eq!(report.channel, Some(RadioChannelDescriptor::new(3, 7, 300)));

    let resolved = resolve_offline(&ResolveOptions {
        sensor_id: 0xBEEF,
        mode: 0,
        rf: RadioChannelDescriptor::new(9, 9, 9),
        adaptive_mipi_mode: 0,
        factory: false,
    })
    .unwrap();
    assert_eq!(resolved.camera_type, "INVALID");
    assert_eq!(resolved.mode, "A");
    assert_eq!(resolved.setting_index, 0);
}
