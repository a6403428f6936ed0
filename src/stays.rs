//! Multi-night stay grouping.
//!
//! Consecutive stops at the same location are displayed as one entry. A run
//! extends when the address matches OR both coordinate pairs are present and
//! equal: inconsistently typed addresses that geocode to the same point still
//! merge. The flip side is that two genuinely distinct stops sharing one
//! unresolved geocode would merge too; that behavior is pinned by a
//! regression test, not corrected.

use chrono::NaiveDateTime;

use crate::itinerary::{Itinerary, Stop};

/// Sentinel for "merged into the previous stay, do not render as a point".
pub const MERGED: i32 = -1;

/// Derived, read-only annotation for one stop. Recomputed from scratch every
/// time the itinerary changes; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StayAnnotation {
    /// Run length for the first member of a run, 1 for singletons,
    /// [`MERGED`] for every other member of a run.
    pub night_count: i32,
    /// Arrival date of the run's last member; only set on the first member
    /// of a multi-night run.
    pub stay_end_date: Option<NaiveDateTime>,
    /// True for all non-first members of a run.
    pub suppressed: bool,
}

/// Groups consecutive same-location stops, one annotation per stop.
pub fn group_stays(itinerary: &Itinerary) -> Vec<StayAnnotation> {
    let stops = &itinerary.stops;
    let mut annotations: Vec<StayAnnotation> = stops
        .iter()
        .map(|_| StayAnnotation {
            night_count: 1,
            stay_end_date: None,
            suppressed: false,
        })
        .collect();

    if stops.is_empty() {
        return annotations;
    }

    let mut run_start = 0;
    for i in 1..=stops.len() {
        let extends = i < stops.len() && same_location(&stops[i - 1], &stops[i]);
        if extends {
            continue;
        }
        let run_len = i - run_start;
        if run_len > 1 {
            annotations[run_start].night_count = run_len as i32;
            annotations[run_start].stay_end_date = stops[i - 1].arrival_date;
            for annotation in &mut annotations[run_start + 1..i] {
                annotation.night_count = MERGED;
                annotation.suppressed = true;
            }
        }
        run_start = i;
    }

    annotations
}

/// Address match OR exact coordinate match. Missing coordinates never match
/// anything.
fn same_location(a: &Stop, b: &Stop) -> bool {
    if a.address == b.address {
        return true;
    }
    match (a.coordinates, b.coordinates) {
        (Some(ca), Some(cb)) => ca == cb,
        _ => false,
    }
}
