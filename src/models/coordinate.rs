//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

use crate::error::{ShiftError, ShiftResult};

/// A latitude/longitude pair in decimal degrees.
///
/// Coordinates are plain values: nothing in the crate mutates one after it
/// has been built. Range checking is explicit through [`Coordinate::validate`]
/// so that the distance math can stay total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, valid range [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, valid range [-180, 180].
    pub longitude: f64,
    /// Optional accuracy radius of the reading, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Coordinate {
    /// Creates a coordinate without an accuracy reading.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_tracker::models::Coordinate;
    ///
    /// let nyc = Coordinate::new(40.7128, -74.0060);
    /// assert!(nyc.validate().is_ok());
    /// ```
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
        }
    }

    /// Returns a copy carrying the given accuracy radius.
    pub fn with_accuracy(self, accuracy: f64) -> Self {
        Self {
            accuracy: Some(accuracy),
            ..self
        }
    }

    /// Checks that latitude, longitude, and accuracy are finite and in range.
    pub fn validate(&self) -> ShiftResult<()> {
        check_range("latitude", self.latitude, 90.0)?;
        check_range("longitude", self.longitude, 180.0)?;

        if let Some(accuracy) = self.accuracy {
            if !accuracy.is_finite() || accuracy < 0.0 {
                return Err(ShiftError::InvalidCoordinate {
                    field: "accuracy".to_string(),
                    message: format!("must be a non-negative number of meters, got {}", accuracy),
                });
            }
        }

        Ok(())
    }
}

fn check_range(field: &str, value: f64, bound: f64) -> ShiftResult<()> {
    if !value.is_finite() || value < -bound || value > bound {
        return Err(ShiftError::InvalidCoordinate {
            field: field.to_string(),
            message: format!("must be within [-{bound}, {bound}], got {value}"),
        });
    }
    Ok(())
}
