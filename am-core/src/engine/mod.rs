//! Adaptive MIPI engine
//!
//! Wires the channel state store, the RIL notifier chain and the mode selector
//! into one service object.

mod adaptive;

pub use adaptive::AdaptiveMipi;
