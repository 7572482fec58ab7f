//! CP channel info listener
//!
//! Subscribes to the RIL bridge and copies every valid CP channel info
//! notification into the channel state store.

use std::sync::Arc;
use tracing::{error, info};

use am_protocol::RilBridgeMessage;

use super::notifier::{NotificationBus, NotifierBlock, NotifyResult};
use super::store::ChannelStateStore;

/// Bridge subscriber feeding the channel state store
pub struct ChannelInfoListener {
    store: Arc<ChannelStateStore>,
}

impl ChannelInfoListener {
    pub fn new(store: Arc<ChannelStateStore>) -> Self {
        Self { store }
    }
}

impl NotifierBlock for ChannelInfoListener {
    fn notify(&self, size: usize, msg: &RilBridgeMessage<'_>) -> NotifyResult {
        if !self.store.is_initialized() {
            error!("[AM_DBG] not init ril notifier");
            return NotifyResult::Done;
        }

        info!("[AM_DBG] ril notification size [{}]", size);
        info!("[AM_DBG] dev_id : {}, data_len : {}", msg.dev_id, msg.data_len);

        match msg.cp_channel_info() {
            Some(descriptor) => {
                self.store.set(descriptor);
                info!(
                    "[AM_DBG] update mipi channel [{},{},{}]",
                    descriptor.rat, descriptor.band, descriptor.channel
                );
                NotifyResult::Ok
            }
            None => NotifyResult::Done,
        }
    }
}

/// Subscribe the channel info listener to `bus`, once.
///
/// The first call zeroes the store and registers; later calls do nothing and
/// return `false`.
pub fn register_listener(store: &Arc<ChannelStateStore>, bus: &dyn NotificationBus) -> bool {
    if !store.initialize() {
        return false;
    }

    info!("[AM_DBG] register ril notifier");
    bus.register(Arc::new(ChannelInfoListener::new(store.clone())));
    true
}
