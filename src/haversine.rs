//! Great-circle distance and direct-line routing fallback.
//!
//! Used by the reconciler to short-circuit near-duplicate endpoints, and as a
//! standalone `RoutingBackend` when no HTTP provider is reachable. Less
//! accurate than a real router (ignores roads) but always available.

use crate::itinerary::{RouteLeg, TravelMode};
use crate::polyline::Polyline;
use crate::traits::RoutingBackend;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lon) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Builds a two-point leg at the mode's assumed speed.
pub fn direct_leg(origin: (f64, f64), destination: (f64, f64), mode: TravelMode) -> RouteLeg {
    let distance_km = haversine_km(origin, destination);
    RouteLeg {
        distance_km,
        duration_hours: distance_km / mode.assumed_speed_kmh(),
        polyline: Polyline::new(vec![origin, destination]),
    }
}

/// Direct-line routing backend.
#[derive(Debug, Clone, Default)]
pub struct DirectLineRouter;

impl RoutingBackend for DirectLineRouter {
    fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Option<RouteLeg> {
        Some(direct_leg(origin, destination, mode))
    }
}
