//! roadtrip-planner core
//!
//! Incremental reconciliation of an itinerary's route segments: detect which
//! stops changed since the last edit, invalidate the affected segments, and
//! fill the gaps through pluggable geocoding and routing backends. Concrete
//! apps bring their own presentation layer on top.

pub mod traits;
pub mod itinerary;
pub mod polyline;
pub mod cache;
pub mod reconcile;
pub mod stays;
pub mod summary;
pub mod haversine;
pub mod osrm;
pub mod ors;
pub mod geocode;
pub mod store;
pub mod github;
