//! Incident models and DTOs.
//!
//! An incident is a circular geofence: a center in degrees and a radius in
//! kilometers. Only active incidents take part in location matching.

use geowarns_core::error::CoreError;
use geowarns_core::geo::{self, GeoPoint};
use geowarns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An incident row from the `incidents` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Incident {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Geofence radius in kilometers.
    pub radius: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Incident {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Whether `point` falls inside this incident's geofence.
    ///
    /// Ignores `is_active`; callers decide which incidents are eligible.
    pub fn contains(&self, point: GeoPoint) -> bool {
        geo::is_within(self.center(), self.radius, point)
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new incident.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIncident {
    #[validate(length(min = 3, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub radius: f64,
    /// Defaults to `true` when omitted.
    pub is_active: Option<bool>,
}

impl CreateIncident {
    /// Full validation, including the checks `validator` cannot express
    /// (finite coordinates, strictly positive radius).
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        geo::validate_point(self.latitude, self.longitude)?;
        geo::validate_radius(self.radius)
    }
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Partial update for an incident.
///
/// Absent fields are left untouched, and so are zero values (`""`, `0.0`):
/// only non-zero, non-null fields overwrite the stored row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIncident {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub is_active: Option<bool>,
}

impl UpdateIncident {
    /// Drop zero-valued fields so they do not overwrite stored values.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.is_empty()),
            description: self.description.filter(|d| !d.is_empty()),
            latitude: self.latitude.filter(|v| *v != 0.0),
            longitude: self.longitude.filter(|v| *v != 0.0),
            radius: self.radius.filter(|v| *v != 0.0),
            is_active: self.is_active,
        }
    }

    /// Validate the fields that will be written.
    pub fn check(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            let len = title.chars().count();
            if !(3..=255).contains(&len) {
                return Err(CoreError::Validation(
                    "title must be between 3 and 255 characters".into(),
                ));
            }
        }
        if let Some(lat) = self.latitude {
            geo::validate_point(lat, 0.0)?;
        }
        if let Some(lng) = self.longitude {
            geo::validate_point(0.0, lng)?;
        }
        if let Some(radius) = self.radius {
            geo::validate_radius(radius)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(lat: f64, lng: f64, radius: f64) -> CreateIncident {
        CreateIncident {
            title: "Gas leak".into(),
            description: None,
            latitude: lat,
            longitude: lng,
            radius,
            is_active: None,
        }
    }

    #[test]
    fn create_accepts_zero_coordinates() {
        assert!(create(0.0, 0.0, 1.0).check().is_ok());
    }

    #[test]
    fn create_rejects_bad_geometry() {
        assert!(create(91.0, 0.0, 1.0).check().is_err());
        assert!(create(0.0, 181.0, 1.0).check().is_err());
        assert!(create(0.0, 0.0, 0.0).check().is_err());
        assert!(create(f64::NAN, 0.0, 1.0).check().is_err());
    }

    #[test]
    fn create_rejects_short_title() {
        let mut input = create(0.0, 0.0, 1.0);
        input.title = "ab".into();
        assert!(matches!(input.check(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn normalized_drops_zero_values() {
        let update = UpdateIncident {
            title: Some(String::new()),
            latitude: Some(0.0),
            longitude: Some(12.5),
            radius: Some(0.0),
            ..Default::default()
        }
        .normalized();

        assert_eq!(update.title, None);
        assert_eq!(update.latitude, None);
        assert_eq!(update.longitude, Some(12.5));
        assert_eq!(update.radius, None);
    }

    #[test]
    fn update_rejects_negative_radius() {
        let update = UpdateIncident {
            radius: Some(-3.0),
            ..Default::default()
        }
        .normalized();
        assert!(update.check().is_err());
    }

    #[test]
    fn contains_uses_radius_in_km() {
        let now = chrono::Utc::now();
        let incident = Incident {
            id: 1,
            title: "Flood".into(),
            description: None,
            latitude: 10.0,
            longitude: 10.0,
            radius: 5.0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert!(incident.contains(GeoPoint::new(10.0, 10.0)));
        assert!(incident.contains(GeoPoint::new(10.04, 10.0)));
        assert!(!incident.contains(GeoPoint::new(10.05, 10.0)));
        assert!(!incident.contains(GeoPoint::new(50.0, 50.0)));
    }
}
