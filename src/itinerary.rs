//! Itinerary data model.
//!
//! One `Stop` per row of the planning table, ordered by arrival date. The
//! route leg attached to a stop describes the segment from that stop to the
//! next one in sequence; the last stop never carries a leg.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// Travel mode for the outgoing segment of a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
}

impl TravelMode {
    /// Assumed speed for direct-line legs when the routing backend is skipped
    /// (near-duplicate endpoints) or used as a fallback.
    pub fn assumed_speed_kmh(self) -> f64 {
        match self {
            TravelMode::Driving => 50.0,
            TravelMode::Walking => 3.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "driving" | "car" => Some(TravelMode::Driving),
            "walking" | "foot" => Some(TravelMode::Walking),
            _ => None,
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed route between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_km: f64,
    pub duration_hours: f64,
    pub polyline: Polyline,
}

/// One row of the itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Position in the ordered itinerary. Renumbered after every sort.
    pub sequence_index: usize,
    /// Free-text address; geocoding key and identity check for edits.
    pub address: String,
    pub coordinates: Option<(f64, f64)>,
    pub arrival_date: Option<NaiveDateTime>,
    /// Mode used for the outgoing segment from this stop to the next.
    pub travel_mode: Option<TravelMode>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub lodging_type: Option<String>,
    pub document_link: Option<String>,
    /// Route from this stop to the next stop in sequence. Absent for the
    /// last stop and for segments that could not be routed.
    pub outgoing_leg: Option<RouteLeg>,
}

impl Stop {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            sequence_index: 0,
            address: address.into(),
            coordinates: None,
            arrival_date: None,
            travel_mode: None,
            name: None,
            city: None,
            price: None,
            lodging_type: None,
            document_link: None,
            outgoing_leg: None,
        }
    }
}

/// The ordered itinerary table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    pub stops: Vec<Stop>,
}

impl Itinerary {
    pub fn new(stops: Vec<Stop>) -> Self {
        let mut itinerary = Self { stops };
        itinerary.renumber();
        itinerary
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stable sort by arrival date (undated stops last) and renumber.
    ///
    /// Sorting is the sole ordering mechanism: backwards date edits are not
    /// validated beyond this.
    pub fn sort_by_date(&mut self) {
        self.stops.sort_by(|a, b| match (a.arrival_date, b.arrival_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        self.renumber();
        if let Some(last) = self.stops.last_mut() {
            last.outgoing_leg = None;
        }
    }

    fn renumber(&mut self) {
        for (i, stop) in self.stops.iter_mut().enumerate() {
            stop.sequence_index = i;
        }
    }
}

/// Pre-edit copy of the editable columns that drive reconciliation.
///
/// The diff is aligned by row position, not by stable identity: reordering or
/// mid-table inserts misattribute changes. Accepted limitation of the edit
/// model (rows appended by the editor always land at the end).
#[derive(Debug, Clone, PartialEq)]
pub struct EditSnapshot {
    rows: Vec<SnapshotRow>,
}

#[derive(Debug, Clone, PartialEq)]
struct SnapshotRow {
    address: String,
    travel_mode: Option<TravelMode>,
}

impl EditSnapshot {
    /// Captures the visible editable columns immediately before edits are
    /// applied.
    pub fn capture(itinerary: &Itinerary) -> Self {
        Self {
            rows: itinerary
                .stops
                .iter()
                .map(|stop| SnapshotRow {
                    address: stop.address.clone(),
                    travel_mode: stop.travel_mode,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn address_changed(&self, index: usize, current: &Stop) -> bool {
        self.rows
            .get(index)
            .map(|row| row.address != current.address)
            .unwrap_or(false)
    }

    pub fn mode_changed(&self, index: usize, current: &Stop) -> bool {
        self.rows
            .get(index)
            .map(|row| row.travel_mode != current.travel_mode)
            .unwrap_or(false)
    }
}
