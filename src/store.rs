//! Itinerary persistence.
//!
//! Stores read and write the whole table at once (last writer wins, no
//! row-level updates). The CSV codec here is shared by every store backend;
//! floats are written at full precision and rounding stays a display concern.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::itinerary::{Itinerary, RouteLeg, Stop, TravelMode};
use crate::polyline::Polyline;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("remote store rejected the request: {0}")]
    Remote(String),
}

/// Whole-table persistence keyed by a file path.
pub trait ItineraryStore {
    fn load(&self, path: &str) -> Result<Itinerary, StoreError>;
    fn save(&self, itinerary: &Itinerary, path: &str) -> Result<(), StoreError>;
}

/// Local filesystem store.
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ItineraryStore for CsvStore {
    fn load(&self, path: &str) -> Result<Itinerary, StoreError> {
        let bytes = fs::read(self.root.join(path))?;
        decode_csv(&bytes)
    }

    fn save(&self, itinerary: &Itinerary, path: &str) -> Result<(), StoreError> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, encode_csv(itinerary)?)?;
        info!(path = %full_path.display(), "itinerary saved");
        Ok(())
    }
}

/// One persisted row. The polyline cell holds the JSON array form; an empty
/// leg is written as an empty distance/duration and a `[]` path.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    name: Option<String>,
    city: Option<String>,
    address: String,
    arrival_date: Option<String>,
    price: Option<f64>,
    lodging_type: Option<String>,
    travel_mode: Option<String>,
    document_link: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    distance_km: Option<f64>,
    duration_hours: Option<f64>,
    path: Option<String>,
}

pub fn encode_csv(itinerary: &Itinerary) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for stop in &itinerary.stops {
        writer.serialize(CsvRow {
            name: stop.name.clone(),
            city: stop.city.clone(),
            address: stop.address.clone(),
            arrival_date: stop.arrival_date.map(|d| d.format(DATE_FORMAT).to_string()),
            price: stop.price,
            lodging_type: stop.lodging_type.clone(),
            travel_mode: stop.travel_mode.map(|m| m.to_string()),
            document_link: stop.document_link.clone(),
            latitude: stop.coordinates.map(|c| c.0),
            longitude: stop.coordinates.map(|c| c.1),
            distance_km: stop.outgoing_leg.as_ref().map(|leg| leg.distance_km),
            duration_hours: stop.outgoing_leg.as_ref().map(|leg| leg.duration_hours),
            path: Some(
                stop.outgoing_leg
                    .as_ref()
                    .map(|leg| leg.polyline.to_json())
                    .unwrap_or_else(|| "[]".to_string()),
            ),
        })?;
    }
    writer
        .into_inner()
        .map_err(|err| StoreError::Io(err.into_error()))
}

pub fn decode_csv(bytes: &[u8]) -> Result<Itinerary, StoreError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut stops = Vec::new();

    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = record?;

        let coordinates = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };

        let arrival_date = row.arrival_date.as_deref().and_then(|raw| parse_date(raw, index));
        let travel_mode = row.travel_mode.as_deref().and_then(TravelMode::parse);
        let outgoing_leg = decode_leg(&row, index);

        stops.push(Stop {
            sequence_index: index,
            address: row.address,
            coordinates,
            arrival_date,
            travel_mode,
            name: row.name,
            city: row.city,
            price: row.price,
            lodging_type: row.lodging_type,
            document_link: row.document_link,
            outgoing_leg,
        });
    }

    Ok(Itinerary::new(stops))
}

fn parse_date(raw: &str, index: usize) -> Option<NaiveDateTime> {
    if raw.trim().is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|err| {
            warn!(index, raw, error = %err, "unparsable arrival date, dropping");
            err
        })
        .ok()
}

/// A leg needs all three parts; a polyline cell that fails to parse is
/// treated as absent so the segment gets recomputed on the next pass.
fn decode_leg(row: &CsvRow, index: usize) -> Option<RouteLeg> {
    let distance_km = row.distance_km?;
    let duration_hours = row.duration_hours?;
    let raw = row.path.as_deref().unwrap_or("[]");

    let polyline = match Polyline::from_json(raw) {
        Ok(polyline) => polyline,
        Err(err) => {
            warn!(index, error = %err, "malformed persisted polyline, discarding segment");
            return None;
        }
    };

    Some(RouteLeg {
        distance_km,
        duration_hours,
        polyline,
    })
}
