//! Trip totals for display.
//!
//! Walking legs are excluded from the vehicle distance/duration totals; the
//! lodging budget sums every priced stop.

use crate::itinerary::{Itinerary, TravelMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSummary {
    pub total_price: f64,
    /// Sum of segment distances, walking legs excluded.
    pub vehicle_distance_km: f64,
    /// Sum of segment durations, walking legs excluded.
    pub vehicle_duration_hours: f64,
}

impl TripSummary {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let mut summary = TripSummary::default();
        for stop in &itinerary.stops {
            if let Some(price) = stop.price {
                summary.total_price += price;
            }
            if stop.travel_mode == Some(TravelMode::Walking) {
                continue;
            }
            if let Some(leg) = &stop.outgoing_leg {
                summary.vehicle_distance_km += leg.distance_km;
                summary.vehicle_duration_hours += leg.duration_hours;
            }
        }
        summary
    }

    /// Driving time as whole hours and leftover minutes.
    pub fn duration_hours_minutes(&self) -> (u32, u32) {
        let hours = self.vehicle_duration_hours.floor();
        let minutes = ((self.vehicle_duration_hours - hours) * 60.0).floor();
        (hours as u32, minutes as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{RouteLeg, Stop};
    use crate::polyline::Polyline;

    fn stop(price: Option<f64>, mode: Option<TravelMode>, leg_km: Option<f64>) -> Stop {
        let mut stop = Stop::new("somewhere");
        stop.price = price;
        stop.travel_mode = mode;
        stop.outgoing_leg = leg_km.map(|km| RouteLeg {
            distance_km: km,
            duration_hours: km / 50.0,
            polyline: Polyline::empty(),
        });
        stop
    }

    #[test]
    fn walking_legs_excluded_from_vehicle_totals() {
        let itinerary = Itinerary::new(vec![
            stop(Some(120.0), Some(TravelMode::Driving), Some(100.0)),
            stop(Some(80.0), Some(TravelMode::Walking), Some(4.0)),
            stop(None, Some(TravelMode::Driving), Some(50.0)),
            stop(Some(60.0), None, None),
        ]);
        let summary = TripSummary::from_itinerary(&itinerary);

        assert_eq!(summary.total_price, 260.0);
        assert_eq!(summary.vehicle_distance_km, 150.0);
        assert_eq!(summary.vehicle_duration_hours, 3.0);
    }

    #[test]
    fn hours_minutes_split() {
        let summary = TripSummary {
            total_price: 0.0,
            vehicle_distance_km: 0.0,
            vehicle_duration_hours: 2.75,
        };
        assert_eq!(summary.duration_hours_minutes(), (2, 45));
    }
}
