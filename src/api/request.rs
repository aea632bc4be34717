//! Request types for the shift tracker API.
//!
//! This module defines the JSON request bodies accepted by the endpoints
//! and their conversion into validated domain commands.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::admin::{NewLocation, NewOrganization, NewWorker};
use crate::clock::{ClockInCommand, ClockOutCommand};
use crate::error::ShiftError;
use crate::models::{Coordinate, WorkerRole};

use super::response::ApiError;

/// Request body for `POST /shifts/clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// Reported latitude in degrees.
    pub latitude: f64,
    /// Reported longitude in degrees.
    pub longitude: f64,
    /// Reported GPS accuracy in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Optional free-text address.
    #[serde(default)]
    pub address: Option<String>,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for `POST /shifts/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockOutRequest {
    /// The shift to close. Defaults to the caller's active shift.
    #[serde(default)]
    pub shift_id: Option<Uuid>,
    /// Reported latitude in degrees.
    pub latitude: f64,
    /// Reported longitude in degrees.
    pub longitude: f64,
    /// Reported GPS accuracy in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Optional free-text address.
    #[serde(default)]
    pub address: Option<String>,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
}

fn reported_position(
    latitude: f64,
    longitude: f64,
    accuracy: Option<f64>,
) -> Result<Coordinate, ShiftError> {
    let coordinate = Coordinate {
        latitude,
        longitude,
        accuracy,
    };
    coordinate.validate()?;
    Ok(coordinate)
}

impl TryFrom<ClockInRequest> for ClockInCommand {
    type Error = ShiftError;

    fn try_from(req: ClockInRequest) -> Result<Self, Self::Error> {
        Ok(ClockInCommand {
            coordinate: reported_position(req.latitude, req.longitude, req.accuracy)?,
            address: req.address,
            note: req.note,
        })
    }
}

impl TryFrom<ClockOutRequest> for ClockOutCommand {
    type Error = ShiftError;

    fn try_from(req: ClockOutRequest) -> Result<Self, Self::Error> {
        Ok(ClockOutCommand {
            shift_id: req.shift_id,
            coordinate: reported_position(req.latitude, req.longitude, req.accuracy)?,
            address: req.address,
            note: req.note,
        })
    }
}

/// Query string for `GET /shifts`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of shifts.
    pub limit: Option<usize>,
    /// Number of shifts to skip.
    pub offset: Option<usize>,
}

/// Request body for `POST /organizations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Organization name.
    pub name: String,
    /// Optional geofence center.
    #[serde(default)]
    pub center: Option<Coordinate>,
    /// Optional geofence radius in meters.
    #[serde(default)]
    pub allowed_radius_meters: Option<f64>,
}

impl TryFrom<CreateOrganizationRequest> for NewOrganization {
    type Error = ApiError;

    fn try_from(req: CreateOrganizationRequest) -> Result<Self, Self::Error> {
        Ok(NewOrganization {
            name: required_name(req.name)?,
            center: req.center,
            allowed_radius_meters: req.allowed_radius_meters,
        })
    }
}

/// Request body for `POST /organizations/{id}/locations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocationRequest {
    /// Location name.
    pub name: String,
    /// Center of the site.
    pub center: Coordinate,
    /// Optional radius in meters.
    #[serde(default)]
    pub radius_meters: Option<f64>,
}

impl CreateLocationRequest {
    /// Converts the body into a [`NewLocation`] under `organization_id`.
    pub fn into_new_location(self, organization_id: String) -> Result<NewLocation, ApiError> {
        Ok(NewLocation {
            organization_id,
            name: required_name(self.name)?,
            center: self.center,
            radius_meters: self.radius_meters,
        })
    }
}

/// Request body for `POST /workers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterWorkerRequest {
    /// Identity-provider subject for the worker.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional role; care worker otherwise.
    #[serde(default)]
    pub role: Option<WorkerRole>,
    /// Optional organization assignment.
    #[serde(default)]
    pub organization_id: Option<String>,
}

impl TryFrom<RegisterWorkerRequest> for NewWorker {
    type Error = ApiError;

    fn try_from(req: RegisterWorkerRequest) -> Result<Self, Self::Error> {
        let id = req.id.trim().to_string();
        if id.is_empty() {
            return Err(ApiError::validation_error("id must not be empty"));
        }
        if !req.email.contains('@') {
            return Err(ApiError::validation_error(format!(
                "email '{}' is not a valid address",
                req.email
            )));
        }
        Ok(NewWorker {
            id,
            email: req.email,
            name: req.name,
            role: req.role,
            organization_id: req.organization_id,
        })
    }
}

/// Request body for `PUT /workers/{id}/role`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// The new role.
    pub role: WorkerRole,
}

/// Request body for `PUT /workers/{id}/organization`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignOrganizationRequest {
    /// The organization to join.
    pub organization_id: String,
}

fn required_name(name: String) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation_error("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_in_request_minimal() {
        let json = r#"{ "latitude": 40.7128, "longitude": -74.0060 }"#;
        let req: ClockInRequest = serde_json::from_str(json).unwrap();
        let command = ClockInCommand::try_from(req).unwrap();

        assert_eq!(command.coordinate, Coordinate::new(40.7128, -74.0060));
        assert!(command.address.is_none());
        assert!(command.note.is_none());
    }

    #[test]
    fn test_clock_in_request_rejects_out_of_range_latitude() {
        let req = ClockInRequest {
            latitude: 95.0,
            longitude: 0.0,
            accuracy: None,
            address: None,
            note: None,
        };
        match ClockInCommand::try_from(req) {
            Err(ShiftError::InvalidCoordinate { field, .. }) => assert_eq!(field, "latitude"),
            other => panic!("Expected InvalidCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn test_clock_out_request_with_shift_id() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{ "shift_id": "{}", "latitude": 1.0, "longitude": 2.0, "accuracy": 8.5, "note": "done" }}"#,
            id
        );
        let req: ClockOutRequest = serde_json::from_str(&json).unwrap();
        let command = ClockOutCommand::try_from(req).unwrap();

        assert_eq!(command.shift_id, Some(id));
        assert_eq!(command.coordinate.accuracy, Some(8.5));
        assert_eq!(command.note.as_deref(), Some("done"));
    }

    #[test]
    fn test_create_organization_trims_name() {
        let req = CreateOrganizationRequest {
            name: "  Harbour View  ".to_string(),
            center: None,
            allowed_radius_meters: None,
        };
        let org = NewOrganization::try_from(req).unwrap();
        assert_eq!(org.name, "Harbour View");
    }

    #[test]
    fn test_blank_location_name_rejected() {
        let req = CreateLocationRequest {
            name: " ".to_string(),
            center: Coordinate::new(1.0, 1.0),
            radius_meters: None,
        };
        let error = req.into_new_location("org_1".to_string()).unwrap_err();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_register_worker_role_parsing() {
        let json = r#"{ "id": "auth0|9", "email": "nine@example.com", "role": "manager" }"#;
        let req: RegisterWorkerRequest = serde_json::from_str(json).unwrap();
        let worker = NewWorker::try_from(req).unwrap();
        assert_eq!(worker.role, Some(WorkerRole::Manager));
    }

    #[test]
    fn test_register_worker_rejects_bad_email() {
        let req = RegisterWorkerRequest {
            id: "w1".to_string(),
            email: "not-an-email".to_string(),
            name: None,
            role: None,
            organization_id: None,
        };
        assert!(NewWorker::try_from(req).is_err());
    }
}
