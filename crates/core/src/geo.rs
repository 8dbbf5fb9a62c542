//! Flat-earth proximity test for circular geofences.
//!
//! Distances are measured as the Euclidean distance between two points in
//! raw degree space, scaled to kilometers with a fixed [`KM_PER_DEGREE`].
//! This is cheap and reasonable for short distances away from the poles;
//! it is not a great-circle calculation. The stats query in the database
//! crate applies the exact same formula in SQL.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kilometers per degree used to scale coordinate-space distance.
pub const KM_PER_DEGREE: f64 = 111.32;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Approximate distance to `other` in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = self.latitude - other.latitude;
        let d_lng = self.longitude - other.longitude;
        (d_lat * d_lat + d_lng * d_lng).sqrt() * KM_PER_DEGREE
    }
}

/// Whether `point` lies inside the circle of `radius_km` around `center`.
///
/// The boundary is inclusive. Callers must reject non-finite input before
/// calling; NaN anywhere yields `false`.
pub fn is_within(center: GeoPoint, radius_km: f64, point: GeoPoint) -> bool {
    center.distance_km(&point) <= radius_km
}

/// Reject coordinates that are non-finite or outside the valid ranges.
pub fn validate_point(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be between {MIN_LATITUDE} and {MAX_LATITUDE}, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be between {MIN_LONGITUDE} and {MAX_LONGITUDE}, got {longitude}"
        )));
    }
    Ok(())
}

/// Reject a geofence radius that is not a positive finite number.
pub fn validate_radius(radius_km: f64) -> Result<(), CoreError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(CoreError::Validation(format!(
            "radius must be a positive number of kilometers, got {radius_km}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
