//! MIPI mode selection
//!
//! `init_mode` picks the mode table for a sensor when its mode changes,
//! `update_mode` resolves the clock setting for the current RF channel, and
//! the sensor driver applies the result later (two-phase: `new` is what
//! should be programmed next, `cur` is what was programmed last).

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::constants::selection::{DEFAULT_SETTING_INDEX, OVERRIDE_BASE};
use crate::data::{
    CameraType, ClockIndex, ModeSlot, ModuleParams, RadioChannelDescriptor, SensorModeTable,
    TableRegistry,
};
use crate::error::{AdaptiveMipiError, Result};
use crate::rf::{resolve, ChannelStateStore};

use super::classifier::classify;

/// Per-sensor selection state
#[derive(Debug, Clone)]
pub struct SensorControl {
    pub sensor_id: u16,
    /// Requested logical mode (0-3 map to A-D)
    pub sensor_mode: u32,
    camera: CameraType,
    mode_slot: ModeSlot,
    table: Option<SensorModeTable>,
    clock_index_cur: ClockIndex,
    clock_index_new: ClockIndex,
}

impl SensorControl {
    pub fn new(sensor_id: u16, sensor_mode: u32) -> Self {
        Self {
            sensor_id,
            sensor_mode,
            camera: CameraType::Invalid,
            mode_slot: ModeSlot::A,
            table: None,
            clock_index_cur: ClockIndex::Unset,
            clock_index_new: ClockIndex::Unset,
        }
    }

    pub fn camera_type(&self) -> CameraType {
        self.camera
    }

    /// Mode table slot in use (after fallbacks)
    pub fn mode_slot(&self) -> ModeSlot {
        self.mode_slot
    }

    pub fn table(&self) -> Option<&SensorModeTable> {
        self.table.as_ref()
    }

    pub fn current_index(&self) -> ClockIndex {
        self.clock_index_cur
    }

    pub fn new_index(&self) -> ClockIndex {
        self.clock_index_new
    }

    /// Index that still has to be programmed, if the resolved one differs
    /// from the applied one
    pub fn pending_clock_change(&self) -> Option<usize> {
        match (self.clock_index_new, self.clock_index_cur) {
            (ClockIndex::Set(new), ClockIndex::Set(cur)) if new == cur => None,
            (ClockIndex::Set(new), _) => Some(new),
            (ClockIndex::Unset, _) => None,
        }
    }

    /// Record the resolved index as programmed. Returns it when something changed.
    pub fn mark_applied(&mut self) -> Option<usize> {
        let pending = self.pending_clock_change()?;
        self.clock_index_cur = ClockIndex::Set(pending);
        Some(pending)
    }
}

/// Drives classification, table selection and resolution for sensors
pub struct ModeSelector {
    store: Arc<ChannelStateStore>,
    params: Arc<ModuleParams>,
    tables: TableRegistry,
}

impl ModeSelector {
    pub fn new(store: Arc<ChannelStateStore>, params: Arc<ModuleParams>, tables: TableRegistry) -> Self {
        Self { store, params, tables }
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    /// Select the mode table for `ctrl` and reset its clock indices.
    pub fn init_mode(&self, ctrl: &mut SensorControl) {
        let camera = classify(ctrl.sensor_id);
        ctrl.camera = camera;

        if self.params.frs_dram_test_mode() {
            if ctrl.table.is_none() {
                ctrl.table = self.fallback_table();
                ctrl.mode_slot = ModeSlot::A;
            }
            info!("[AM_DBG] FRS DRAM test mode, keeping {} table", ctrl.mode_slot.name());
        } else {
            let (slot, table) = self.select_table(camera, ctrl.sensor_mode);
            ctrl.mode_slot = slot;
            ctrl.table = table;
        }

        ctrl.clock_index_cur = ClockIndex::Unset;
        ctrl.clock_index_new = ClockIndex::Unset;
    }

    fn select_table(&self, camera: CameraType, sensor_mode: u32) -> (ModeSlot, Option<SensorModeTable>) {
        match self.tables.modes(camera) {
            Some(modes) => {
                info!("[AM_DBG] {} sensor_mode : {} / {}", camera, sensor_mode, modes.len());
                let slot = ModeSlot::select(sensor_mode, modes.len());
                match modes.get(slot.index()) {
                    Some(table) => (slot, Some(*table)),
                    None => (ModeSlot::A, self.fallback_table()),
                }
            }
            None => {
                error!("[AM_DBG] Not support sensor_type : {}", camera);
                (ModeSlot::A, self.fallback_table())
            }
        }
    }

    fn fallback_table(&self) -> Option<SensorModeTable> {
        let table = self.tables.fallback();
        if table.is_none() {
            error!("[AM_DBG] no wide mode table declared, nothing to fall back to");
        }
        table
    }

    /// Resolve the clock setting for the current RF channel.
    ///
    /// Always leaves `ctrl` with a set `new` index and returns it.
    pub fn update_mode(&self, ctrl: &mut SensorControl) -> ClockIndex {
        let table = match ctrl.table {
            Some(table) => table,
            None => {
                warn!("[AM_DBG] no mode table selected, using wide A table");
                ctrl.mode_slot = ModeSlot::A;
                ctrl.table = self.fallback_table();
                match ctrl.table {
                    Some(table) => table,
                    None => {
                        ctrl.clock_index_new = ClockIndex::Set(DEFAULT_SETTING_INDEX);
                        return ctrl.clock_index_new;
                    }
                }
            }
        };

        if let Some(first) = table.channels.first() {
            debug!(
                "[AM_DBG] cur rat_band : {}, channel : {}-{}, setting_index : {}",
                first.rat_band, first.channel_min, first.channel_max, first.setting_index
            );
        }

        let current = self.store.get();
        match resolve(table.channels, &current) {
            Some(found) if found < table.settings.len() => {
                ctrl.clock_index_new = ClockIndex::Set(found);
                debug!("[AM_DBG] mipi_clock_index_new : {}", found);
            }
            Some(found) => {
                error!(
                    "[AM_DBG] sensor setting size is out of bound: {} >= {}",
                    found,
                    table.settings.len()
                );
                ctrl.clock_index_new = ClockIndex::Set(DEFAULT_SETTING_INDEX);
            }
            None => {
                info!("[AM_DBG] not found rf channel, use default mipi clock");
                ctrl.clock_index_new = ClockIndex::Set(DEFAULT_SETTING_INDEX);
            }
        }

        if self.params.factory_mode() {
            ctrl.clock_index_new = ClockIndex::Set(DEFAULT_SETTING_INDEX);
        }

        let mode = self.params.adaptive_mipi_mode();
        if mode > 0 {
            match usize::try_from(mode - OVERRIDE_BASE) {
                Ok(forced) => {
                    ctrl.clock_index_new = ClockIndex::Set(forced);
                    info!("[AM_DBG] test adaptive mode : {}", forced);
                }
                Err(_) => error!("[AM_DBG] ignoring adaptive mode {} below {}", mode, OVERRIDE_BASE),
            }
        }

        ctrl.clock_index_new
    }

    /// Clock speed label for the resolved index
    pub fn get_clock_label(&self, ctrl: &SensorControl) -> Result<&'static str> {
        let table = ctrl.table.ok_or(AdaptiveMipiError::TableNotSelected)?;
        let index = ctrl
            .clock_index_new
            .get()
            .ok_or(AdaptiveMipiError::ClockNotResolved)?;
        let setting = table
            .settings
            .get(index)
            .ok_or(AdaptiveMipiError::SettingIndexOutOfRange {
                index,
                len: table.settings.len(),
            })?;

        debug!("[AM_DBG] clock label for {} : {}", index, setting.label);
        Ok(setting.label)
    }

    /// Last RF channel reported by the modem
    pub fn get_rf_info(&self) -> RadioChannelDescriptor {
        let info = self.store.get();
        debug!("[AM_DBG] get rf info [{},{},{}]", info.rat, info.band, info.channel);
        info
    }
}
