//! Radio channel tracking
//!
//! Everything between the modem bridge and the resolved setting index:
//! the notifier chain, the listener, the shared channel state, and the
//! range resolver.

mod listener;
mod notifier;
mod resolver;
mod store;

pub use listener::{register_listener, ChannelInfoListener};
pub use notifier::{NotificationBus, NotifierBlock, NotifyResult, RilNotifierChain};
pub use resolver::{bsearch_by, compare_rf_channel, resolve};
pub use store::ChannelStateStore;
