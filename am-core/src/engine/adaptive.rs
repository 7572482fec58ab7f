//! Process-wide adaptive MIPI service

use std::sync::Arc;
use tracing::debug;

use am_protocol::{IpcFrame, RilBridgeMessage};

use crate::data::{AdaptiveMipiConfig, ModuleParams, TableRegistry, BUILTIN_TABLES};
use crate::error::Result;
use crate::rf::{register_listener, ChannelStateStore, NotifyResult, RilNotifierChain};
use crate::sensor::ModeSelector;

/// Shared service: one per process, handed out by reference or `Arc`
pub struct AdaptiveMipi {
    store: Arc<ChannelStateStore>,
    chain: Arc<RilNotifierChain>,
    params: Arc<ModuleParams>,
    selector: ModeSelector,
}

impl AdaptiveMipi {
    /// Service over the built-in tables
    pub fn new(config: &AdaptiveMipiConfig) -> Self {
        Self::with_tables(ModuleParams::from_config(config), BUILTIN_TABLES)
    }

    pub fn with_tables(params: ModuleParams, tables: TableRegistry) -> Self {
        let store = Arc::new(ChannelStateStore::new());
        let params = Arc::new(params);
        let selector = ModeSelector::new(store.clone(), params.clone(), tables);

        Self {
            store,
            chain: Arc::new(RilNotifierChain::new()),
            params,
            selector,
        }
    }

    /// Subscribe the channel listener to the bridge. Only the first call registers.
    pub fn register(&self) -> bool {
        register_listener(&self.store, self.chain.as_ref())
    }

    /// Deliver one bridge message to every subscriber
    pub fn deliver(&self, msg: &RilBridgeMessage<'_>) -> NotifyResult {
        self.chain.call_chain(msg)
    }

    /// Decode a raw IPC frame and deliver it
    pub fn deliver_frame(&self, frame: &[u8]) -> Result<NotifyResult> {
        let frame = IpcFrame::parse(frame)?;
        debug!(
            "ipc frame main {:#04x} sub {:#04x}, {} payload bytes",
            frame.main_cmd,
            frame.sub_cmd,
            frame.payload.len()
        );
        Ok(self.deliver(&frame.to_bridge_message()))
    }

    pub fn chain(&self) -> &Arc<RilNotifierChain> {
        &self.chain
    }

    pub fn store(&self) -> &Arc<ChannelStateStore> {
        &self.store
    }

    pub fn params(&self) -> &Arc<ModuleParams> {
        &self.params
    }

    pub fn selector(&self) -> &ModeSelector {
        &self.selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RadioChannelDescriptor;
    use crate::error::AdaptiveMipiError;
    use am_protocol::{encode_cp_channel_frame, parse_hex};

    #[test]
    fn test_frame_updates_store_after_register() {
        let mipi = AdaptiveMipi::new(&AdaptiveMipiConfig::default());
        let frame = encode_cp_channel_frame(&RadioChannelDescriptor::new(3, 7, 300));

        assert_eq!(mipi.deliver_frame(&frame).unwrap(), NotifyResult::Done);
        assert!(mipi.store().get().is_unknown());

        assert!(mipi.register());
        assert!(!mipi.register());
        assert_eq!(mipi.deliver_frame(&frame).unwrap(), NotifyResult::Ok);
        assert_eq!(mipi.selector().get_rf_info(), RadioChannelDescriptor::new(3, 7, 300));
    }

    #[test]
    fn test_documented_frame() {
        let mipi = AdaptiveMipi::new(&AdaptiveMipiConfig::default());
        mipi.register();

        let frame = parse_hex("10 00 AA BB 27 01 03 03 07 00 00 00 2C 01 00 00").unwrap();
        assert_eq!(mipi.deliver_frame(&frame).unwrap(), NotifyResult::Ok);
        assert_eq!(mipi.store().get(), RadioChannelDescriptor::new(3, 7, 300));
    }

    #[test]
    fn test_malformed_frame_is_rejected() {
        let mipi = AdaptiveMipi::new(&AdaptiveMipiConfig::default());
        mipi.register();

        let err = mipi.deliver_frame(&[0x10, 0x00, 0xAA]).unwrap_err();
        assert!(err.is_frame_error());
        assert!(matches!(err, AdaptiveMipiError::FrameTooShort { .. }));
    }

    #[test]
    fn test_config_flags_reach_params() {
        let config = AdaptiveMipiConfig {
            adaptive_mipi_mode: 11,
            frs_dram_test_mode: true,
            ..AdaptiveMipiConfig::default()
        };
        let mipi = AdaptiveMipi::new(&config);
        assert_eq!(mipi.params().adaptive_mipi_mode(), 11);
        assert!(mipi.params().frs_dram_test_mode());
    }
}
