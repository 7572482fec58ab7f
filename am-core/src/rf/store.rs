//! Channel state store
//!
//! Holds the last RF channel pushed by the modem. The notification path
//! writes it and the sensor path reads it, possibly from different threads,
//! so both sides go through the same mutex.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, trace};

use crate::data::RadioChannelDescriptor;

/// Process-wide cache of the latest radio channel descriptor
#[derive(Debug, Default)]
pub struct ChannelStateStore {
    current: Mutex<RadioChannelDescriptor>,
    initialized: AtomicBool,
}

impl ChannelStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the stored descriptor and open the store for reads.
    ///
    /// Returns `false` if the store was already initialized, in which case
    /// nothing changes.
    pub fn initialize(&self) -> bool {
        let mut current = self.current.lock();
        if self.initialized.load(Ordering::Acquire) {
            return false;
        }
        *current = RadioChannelDescriptor::default();
        self.initialized.store(true, Ordering::Release);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Replace the stored descriptor
    pub fn set(&self, descriptor: RadioChannelDescriptor) {
        *self.current.lock() = descriptor;
        trace!("channel state set to {}", descriptor);
    }

    /// Snapshot of the stored descriptor.
    ///
    /// Before initialization this logs an error and returns the zero
    /// descriptor, which resolves to "not found" downstream.
    pub fn get(&self) -> RadioChannelDescriptor {
        if !self.is_initialized() {
            error!("[AM_DBG] not init ril notifier");
            return RadioChannelDescriptor::default();
        }
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_before_initialize_is_zero() {
        let store = ChannelStateStore::new();
        store.set(RadioChannelDescriptor::new(3, 3, 1300));
        assert!(store.get().is_unknown());
    }

    #[test]
    fn test_initialize_once() {
        let store = ChannelStateStore::new();
        assert!(store.initialize());
        store.set(RadioChannelDescriptor::new(3, 3, 1300));

        assert!(!store.initialize());
        assert_eq!(store.get(), RadioChannelDescriptor::new(3, 3, 1300));
    }

    #[test]
    fn test_concurrent_snapshots_are_consistent() {
        let store = Arc::new(ChannelStateStore::new());
        store.initialize();

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..10_000u32 {
                    store.set(RadioChannelDescriptor::new((i % 7) as u8, i, i));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        let d = store.get();
                        assert_eq!(d.band, d.channel);
                        assert_eq!(u32::from(d.rat), d.band % 7);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.get(), RadioChannelDescriptor::new((9_999 % 7) as u8, 9_999, 9_999));
    }
}
