///! Result types for N2YO satellite queries
///!
///! Every query resolves to a [`QueryResult`] pairing a decoded context
///! (positions or passes, plus the owning satellite) with the API's
///! transaction count for quota tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Satellite identity, embedded by value in every result context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    /// NORAD catalog number, e.g. 25544 for the ISS
    pub id: u32,
    /// Satellite name, e.g. "SPACE STATION"
    pub name: String,
}

/// One observed position of a satellite relative to the observer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatellitePosition {
    /// Right ascension, degrees
    pub ra: f32,
    /// Declination, degrees
    pub dec: f32,
    /// When this position applies
    pub timestamp: DateTime<Utc>,
    /// Azimuth from the observer, degrees
    pub azimuth: f32,
    /// Elevation above the observer's horizon, degrees
    pub elevation: f32,
    /// Satellite footprint latitude, degrees
    pub latitude: f32,
    /// Satellite footprint longitude, degrees
    pub longitude: f32,
}

/// Azimuths at the three notable points of a pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassAzimuth {
    /// Azimuth at rise (AOS), degrees
    pub start: f32,
    /// Azimuth at peak elevation, degrees
    pub max: f32,
    /// Azimuth at set (LOS), degrees
    pub end: f32,
}

/// One pass of a satellite over the observer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatellitePass {
    /// Rise time (AOS)
    pub rise: DateTime<Utc>,
    /// Set time (LOS)
    pub set: DateTime<Utc>,
    /// Peak elevation, degrees
    pub elevation: f32,
    /// Azimuths at rise, peak and set
    pub azimuth: PassAzimuth,
}

/// A pass during which the satellite is workable by radio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioPass {
    /// The underlying pass geometry
    pub pass: SatellitePass,
}

/// A pass during which the satellite is optically visible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisiblePass {
    /// The underlying pass geometry
    pub pass: SatellitePass,
    /// How long the satellite stays visible
    pub duration: Duration,
    /// Peak visual magnitude (lower is brighter)
    pub magnitude: f32,
}

/// Decoded positions for one satellite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionContext {
    pub satellite: Satellite,
    /// Positions in request order, one per requested second
    pub positions: Vec<SatellitePosition>,
}

/// Decoded radio passes for one satellite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioPassContext {
    pub satellite: Satellite,
    /// Upcoming passes in chronological order
    pub passes: Vec<RadioPass>,
}

/// Decoded visual passes for one satellite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisiblePassContext {
    pub satellite: Satellite,
    /// Upcoming passes in chronological order
    pub passes: Vec<VisiblePass>,
}

/// Envelope for one decoded query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult<T> {
    /// The decoded endpoint payload
    pub context: T,
    /// Transactions counted against the API key in the current window
    pub transaction_count: u32,
}

pub type PositionQueryResult = QueryResult<PositionContext>;
pub type RadioPassQueryResult = QueryResult<RadioPassContext>;
pub type VisiblePassQueryResult = QueryResult<VisiblePassContext>;
