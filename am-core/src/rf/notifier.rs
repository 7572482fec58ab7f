//! RIL bridge notifier chain
//!
//! Subscribers are called in registration order with every message the modem
//! bridge delivers. Each one reports whether it consumed the message; `Stop`
//! ends delivery for that message.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use am_protocol::RilBridgeMessage;

/// Subscriber verdict for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyResult {
    /// Not interested; let other subscribers look at it
    Done,
    /// Handled
    Ok,
    /// Handled, and no later subscriber should see it
    Stop,
}

/// A subscriber on the bridge
pub trait NotifierBlock: Send + Sync {
    fn notify(&self, size: usize, msg: &RilBridgeMessage<'_>) -> NotifyResult;
}

/// Registration side of a notification bus
#[cfg_attr(test, mockall::automock)]
pub trait NotificationBus: Send + Sync {
    fn register(&self, block: Arc<dyn NotifierBlock>);
}

/// In-process notifier chain
#[derive(Default)]
pub struct RilNotifierChain {
    blocks: RwLock<Vec<Arc<dyn NotifierBlock>>>,
}

impl RilNotifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a message to subscribers.
    ///
    /// Returns the verdict of the last subscriber called, or `Done` when the
    /// chain is empty.
    pub fn call_chain(&self, msg: &RilBridgeMessage<'_>) -> NotifyResult {
        let blocks = self.blocks.read().clone();
        let size = msg.size();
        let mut result = NotifyResult::Done;

        for block in &blocks {
            result = block.notify(size, msg);
            if result == NotifyResult::Stop {
                debug!("notifier chain stopped for dev_id {}", msg.dev_id);
                break;
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }
}

impl NotificationBus for RilNotifierChain {
    fn register(&self, block: Arc<dyn NotifierBlock>) {
        self.blocks.write().push(block);
    }
}
