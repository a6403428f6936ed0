//! Shared test fixtures: itinerary builders and recording backend stubs.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use roadtrip_planner::haversine::direct_leg;
use roadtrip_planner::itinerary::{Itinerary, RouteLeg, Stop, TravelMode};
use roadtrip_planner::traits::{GeocodingBackend, RoutingBackend};

pub fn date(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, day)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

/// A dated, geocoded, driving stop.
pub fn stop(address: &str, day: u32, coords: (f64, f64)) -> Stop {
    let mut stop = Stop::new(address);
    stop.arrival_date = Some(date(day));
    stop.coordinates = Some(coords);
    stop.travel_mode = Some(TravelMode::Driving);
    stop
}

/// A dated stop with no coordinates yet.
pub fn ungeocoded_stop(address: &str, day: u32) -> Stop {
    let mut stop = Stop::new(address);
    stop.arrival_date = Some(date(day));
    stop.travel_mode = Some(TravelMode::Driving);
    stop
}

pub fn itinerary(stops: Vec<Stop>) -> Itinerary {
    Itinerary::new(stops)
}

/// Routing stub that records every call and answers with a deterministic
/// direct-line leg. O-D pairs listed in `failures` return `None`.
#[derive(Default)]
pub struct RecordingRouter {
    pub calls: RefCell<Vec<((f64, f64), (f64, f64), TravelMode)>>,
    pub failures: Vec<((f64, f64), (f64, f64))>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(failures: Vec<((f64, f64), (f64, f64))>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl RoutingBackend for RecordingRouter {
    fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Option<RouteLeg> {
        self.calls.borrow_mut().push((origin, destination, mode));
        if self.failures.contains(&(origin, destination)) {
            return None;
        }
        Some(direct_leg(origin, destination, mode))
    }
}

/// Routing stub that fails the test if the reconciler reaches the backend
/// at all.
pub struct PanickingRouter;

impl RoutingBackend for PanickingRouter {
    fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        _mode: TravelMode,
    ) -> Option<RouteLeg> {
        panic!("unexpected routing call for {origin:?} -> {destination:?}");
    }
}

/// Geocoding stub backed by a fixed address book; records every lookup.
#[derive(Default)]
pub struct RecordingGeocoder {
    pub known: HashMap<String, (f64, f64)>,
    pub calls: RefCell<Vec<String>>,
}

impl RecordingGeocoder {
    pub fn new(entries: &[(&str, (f64, f64))]) -> Self {
        Self {
            known: entries
                .iter()
                .map(|(address, coords)| (address.to_string(), *coords))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl GeocodingBackend for RecordingGeocoder {
    fn geocode(&self, address: &str) -> Option<(f64, f64)> {
        self.calls.borrow_mut().push(address.to_string());
        self.known.get(address).copied()
    }
}
