//! RF channel to MIPI setting resolution
//!
//! Tables are sorted by `(rat_band, channel_min)` with non-overlapping ranges
//! per band. The current channel becomes a degenerate `[channel, channel]`
//! range and the comparator treats "contained in" as equal, so a plain binary
//! search finds the owning entry.

use std::cmp::Ordering;
use tracing::{debug, info};

use crate::data::{ChannelRangeEntry, RadioChannelDescriptor};

/// Order `key` relative to `candidate`. Overlap counts as a match.
pub fn compare_rf_channel(key: &ChannelRangeEntry, candidate: &ChannelRangeEntry) -> Ordering {
    match key.rat_band.cmp(&candidate.rat_band) {
        Ordering::Equal => {}
        other => return other,
    }

    if key.channel_max < candidate.channel_min {
        Ordering::Less
    } else if key.channel_min > candidate.channel_max {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Binary search where `cmp` orders the key relative to each probed item.
///
/// Each step probes the middle of the remaining window. On `Greater` the
/// window moves past the pivot; in every non-matching step the remaining
/// count halves, so at most `log2(len) + 1` probes are made.
pub fn bsearch_by<T, F>(items: &[T], mut cmp: F) -> Option<&T>
where
    F: FnMut(&T) -> Ordering,
{
    let mut base = 0usize;
    let mut num = items.len();

    while num > 0 {
        let pivot = base + (num >> 1);
        let candidate = items.get(pivot)?;

        match cmp(candidate) {
            Ordering::Equal => return Some(candidate),
            Ordering::Greater => {
                base = pivot + 1;
                num -= 1;
            }
            Ordering::Less => {}
        }
        num >>= 1;
    }

    None
}

/// Find the setting index for `current` in `table`.
///
/// `None` means the channel isn't covered by any range; that is the normal
/// outcome outside the bands a sensor cares about.
pub fn resolve(table: &[ChannelRangeEntry], current: &RadioChannelDescriptor) -> Option<usize> {
    let key = ChannelRangeEntry::key_for(current);

    info!(
        "[AM_DBG] searching rf channel s [{},{},{}]",
        current.rat, current.band, current.channel
    );

    match bsearch_by(table, |candidate| compare_rf_channel(&key, candidate)) {
        Some(found) => {
            debug!(
                "[AM_DBG] searching result : [{},({}-{})]->({})",
                found.rat_band, found.channel_min, found.channel_max, found.setting_index
            );
            Some(found.setting_index)
        }
        None => {
            info!("[AM_DBG] searching result : not found");
            None
        }
    }
}
