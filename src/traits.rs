//! Core backend traits for the planner.
//!
//! These are intentionally minimal. The reconciler depends only on these
//! interfaces, never on a specific provider's request/response shape.

use crate::itinerary::{RouteLeg, TravelMode};

/// Computes a route between two coordinates for a travel mode.
///
/// Returns `None` on any failure (timeout, non-2xx, malformed payload, no
/// route found): a missing leg degrades the single segment rather than the
/// whole reconciliation pass.
pub trait RoutingBackend {
    fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Option<RouteLeg>;
}

/// Resolves a free-text address to (lat, lon).
///
/// Returns `None` when the address cannot be resolved; the stop keeps empty
/// coordinates and its adjacent segments stay unroutable.
pub trait GeocodingBackend {
    fn geocode(&self, address: &str) -> Option<(f64, f64)>;
}
