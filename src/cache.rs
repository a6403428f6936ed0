//! Per-pass segment cache.
//!
//! Deduplicates origin-destination-mode queries within a single
//! reconciliation pass. Purely additive, never evicts, never shared across
//! passes: recomputation is idempotent, so nothing here survives long enough
//! to go stale.

use std::collections::HashMap;

use tracing::debug;

use crate::itinerary::{RouteLeg, TravelMode};

/// In-memory cache keyed by (origin, destination, mode).
///
/// Failed computations are cached too, so a flaky endpoint is queried at most
/// once per pair within one pass.
#[derive(Debug, Default)]
pub struct SegmentCache {
    entries: HashMap<String, Option<RouteLeg>>,
    hits: usize,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for this O-D-mode key, or runs `compute`
    /// and stores its result.
    pub fn get_or_compute<F>(
        &mut self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
        compute: F,
    ) -> Option<RouteLeg>
    where
        F: FnOnce() -> Option<RouteLeg>,
    {
        let key = segment_key(origin, destination, mode);
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            debug!(%key, "segment cache hit");
            return cached.clone();
        }
        let leg = compute();
        self.entries.insert(key, leg.clone());
        leg
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered without invoking the compute closure.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

fn segment_key(origin: (f64, f64), destination: (f64, f64), mode: TravelMode) -> String {
    format!(
        "{:.6},{:.6}|{:.6},{:.6}|{}",
        origin.0, origin.1, destination.0, destination.1, mode
    )
}
