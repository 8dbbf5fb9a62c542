//! Location check models and DTOs.
//!
//! A location check is an immutable observation of one user's position.
//! Rows are written once per report and never updated.

use geowarns_core::error::CoreError;
use geowarns_core::geo::{self, GeoPoint};
use geowarns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A location check row from the `location_checks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct LocationCheck {
    pub id: DbId,
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub checked_at: Timestamp,
}

impl LocationCheck {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// An incoming location report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationCheckRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl LocationCheckRequest {
    /// Reject empty user ids and out-of-range or non-finite coordinates.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.user_id.trim().is_empty() {
            return Err(CoreError::Validation("user_id is required".into()));
        }
        self.validate()?;
        geo::validate_point(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: &str, lat: f64, lng: f64) -> LocationCheckRequest {
        LocationCheckRequest {
            user_id: user_id.into(),
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn accepts_valid_report() {
        assert!(request("u1", 10.0, 10.0).check().is_ok());
    }

    #[test]
    fn rejects_blank_user_id() {
        assert!(request("", 10.0, 10.0).check().is_err());
        assert!(request("   ", 10.0, 10.0).check().is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(request("u1", -90.01, 0.0).check().is_err());
        assert!(request("u1", 0.0, 180.01).check().is_err());
        assert!(request("u1", f64::INFINITY, 0.0).check().is_err());
    }
}
