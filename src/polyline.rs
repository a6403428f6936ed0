//! Polyline representation for route geometries.
//!
//! Stores decoded coordinate sequences. Provider-specific encodings are
//! handled at the adapter boundary; within the itinerary a polyline is
//! persisted as a JSON array of `[lat, lon]` pairs.

use serde::{Deserialize, Serialize};

/// A route geometry as a decoded sequence of (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Serializes as a JSON array of `[lat, lon]` pairs, the format stored in
    /// the itinerary's path column.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.points).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parses the persisted JSON form. Callers treat a parse failure as an
    /// absent geometry (forces a recompute), so this returns the raw error.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let points: Vec<(f64, f64)> = serde_json::from_str(raw)?;
        Ok(Self { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_points() {
        let points = vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.points(), &points[..]);
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let points = vec![(46.227638, 2.213749), (47.080027, 2.398782)];
        let polyline = Polyline::new(points.clone());
        let decoded = Polyline::from_json(&polyline.to_json()).unwrap();
        assert_eq!(decoded.into_points(), points);
    }

    #[test]
    fn test_empty_json_form() {
        let polyline = Polyline::empty();
        assert_eq!(polyline.to_json(), "[]");
        assert!(Polyline::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Polyline::from_json("not json").is_err());
        assert!(Polyline::from_json("{\"lat\": 1}").is_err());
        assert!(Polyline::from_json("[[1.0]]").is_err());
    }

    #[test]
    fn test_partial_eq() {
        let p1 = Polyline::new(vec![(1.0, 2.0)]);
        let p2 = Polyline::new(vec![(1.0, 2.0)]);
        let p3 = Polyline::new(vec![(1.0, 2.1)]);
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }
}
