//! Route-segment reconciliation.
//!
//! One pass over the itinerary after an edit: diff against the pre-edit
//! snapshot, invalidate the segments touched by the change, geocode stops
//! that lost (or never had) coordinates, then fill every missing segment
//! through the routing backend, deduplicated by a per-pass cache.
//!
//! Backend failures never abort the pass: a stop that fails to geocode stays
//! without coordinates, a segment that fails to route stays without a leg,
//! and both are listed in the report so the caller can surface them. The
//! next pass retries naturally because the gaps are still empty.

use tracing::{debug, info, warn};

use crate::cache::SegmentCache;
use crate::haversine::{direct_leg, haversine_km};
use crate::itinerary::{EditSnapshot, Itinerary};
use crate::traits::{GeocodingBackend, RoutingBackend};

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Endpoints closer than this are connected with a direct two-point leg
    /// instead of a routing query. Degenerate requests (identical or
    /// near-identical coordinates) confuse some providers.
    pub near_zero_threshold_km: f64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            // 50 meters
            near_zero_threshold_km: 0.05,
        }
    }
}

/// What a completed pass touched, by post-sort stop index. Segment indices
/// name the segment from that stop to the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Stops whose coordinates were filled in this pass.
    pub geocoded: Vec<usize>,
    /// Stops left without coordinates (failed or empty address).
    pub ungeocoded: Vec<usize>,
    /// Segments recomputed through the cache/backend.
    pub recomputed: Vec<usize>,
    /// Segments reused unchanged, without a network call.
    pub reused: Vec<usize>,
    /// Segments left without a leg (missing endpoint, missing mode, or
    /// backend failure).
    pub unroutable: Vec<usize>,
    /// Lookups answered by the per-pass cache.
    pub cache_hits: usize,
}

#[derive(Debug)]
pub struct ReconcileOutcome {
    pub itinerary: Itinerary,
    pub report: ReconcileReport,
}

/// Runs one full reconciliation pass.
///
/// `snapshot` is the pre-edit copy of the editable columns; pass `None` when
/// there was no prior state (first load), in which case only missing data is
/// filled in. The cache must be fresh per pass.
pub fn reconcile<G, R>(
    mut itinerary: Itinerary,
    snapshot: Option<&EditSnapshot>,
    geocoder: &G,
    router: &R,
    cache: &mut SegmentCache,
    options: &ReconcileOptions,
) -> ReconcileOutcome
where
    G: GeocodingBackend,
    R: RoutingBackend,
{
    let hits_before = cache.hits();

    if let Some(snapshot) = snapshot {
        invalidate_edits(&mut itinerary, snapshot);
    }

    // Appended rows were pushed to the end by the editor; sorting places
    // everything (including them) in travel order before any routing.
    itinerary.sort_by_date();

    let mut report = ReconcileReport::default();
    fill_coordinates(&mut itinerary, geocoder, &mut report);
    fill_segments(&mut itinerary, router, cache, options, &mut report);

    report.cache_hits = cache.hits() - hits_before;
    info!(
        stops = itinerary.len(),
        recomputed = report.recomputed.len(),
        reused = report.reused.len(),
        unroutable = report.unroutable.len(),
        ungeocoded = report.ungeocoded.len(),
        "reconciliation pass complete"
    );

    ReconcileOutcome { itinerary, report }
}

/// Position-aligned diff against the pre-edit snapshot.
///
/// An address edit clears the stop's coordinates (forcing re-geocoding) and
/// both adjacent segments; a travel-mode edit clears the segments but keeps
/// the coordinates. Invalidation only ever touches immediate neighbors: the
/// previous stop's leg terminates at the changed location, nothing further
/// away depends on it.
fn invalidate_edits(itinerary: &mut Itinerary, snapshot: &EditSnapshot) {
    let mut stale: Vec<usize> = Vec::new();

    for (i, stop) in itinerary.stops.iter_mut().enumerate() {
        if snapshot.address_changed(i, stop) {
            debug!(index = i, address = %stop.address, "address edited, clearing coordinates");
            stop.coordinates = None;
            stale.push(i);
        } else if snapshot.mode_changed(i, stop) {
            debug!(index = i, "travel mode edited");
            stale.push(i);
        }
    }

    for &i in &stale {
        itinerary.stops[i].outgoing_leg = None;
        if i > 0 {
            itinerary.stops[i - 1].outgoing_leg = None;
        }
    }
}

fn fill_coordinates<G>(itinerary: &mut Itinerary, geocoder: &G, report: &mut ReconcileReport)
where
    G: GeocodingBackend,
{
    for (i, stop) in itinerary.stops.iter_mut().enumerate() {
        if stop.coordinates.is_some() {
            continue;
        }
        if stop.address.trim().is_empty() {
            report.ungeocoded.push(i);
            continue;
        }
        match geocoder.geocode(&stop.address) {
            Some(coords) => {
                stop.coordinates = Some(coords);
                report.geocoded.push(i);
            }
            None => {
                warn!(index = i, address = %stop.address, "geocoding failed");
                report.ungeocoded.push(i);
            }
        }
    }
}

fn fill_segments<R>(
    itinerary: &mut Itinerary,
    router: &R,
    cache: &mut SegmentCache,
    options: &ReconcileOptions,
    report: &mut ReconcileReport,
) where
    R: RoutingBackend,
{
    if itinerary.len() < 2 {
        return;
    }

    for i in 0..itinerary.len() - 1 {
        let origin = itinerary.stops[i].coordinates;
        let destination = itinerary.stops[i + 1].coordinates;
        let mode = itinerary.stops[i].travel_mode;

        // A surviving leg was never invalidated, so its endpoints are
        // unchanged since it was computed.
        if itinerary.stops[i].outgoing_leg.is_some()
            && origin.is_some()
            && destination.is_some()
        {
            report.reused.push(i);
            continue;
        }

        let (origin, destination, mode) = match (origin, destination, mode) {
            (Some(o), Some(d), Some(m)) => (o, d, m),
            _ => {
                if mode.is_none() && origin.is_some() && destination.is_some() {
                    warn!(index = i, "travel mode not set, segment unroutable");
                } else {
                    warn!(index = i, "missing coordinates, segment unroutable");
                }
                itinerary.stops[i].outgoing_leg = None;
                report.unroutable.push(i);
                continue;
            }
        };

        let leg = cache.get_or_compute(origin, destination, mode, || {
            if haversine_km(origin, destination) <= options.near_zero_threshold_km {
                debug!(index = i, "near-duplicate endpoints, direct leg");
                Some(direct_leg(origin, destination, mode))
            } else {
                router.route(origin, destination, mode)
            }
        });

        match leg {
            Some(leg) => {
                itinerary.stops[i].outgoing_leg = Some(leg);
                report.recomputed.push(i);
            }
            None => {
                warn!(index = i, "routing failed, segment unroutable");
                itinerary.stops[i].outgoing_leg = None;
                report.unroutable.push(i);
            }
        }
    }
}
