use chrono::{DateTime, Utc};

use crate::runtime::{Error, Result};

/// Geographic position in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Construct a validated position.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let position = Self {
            latitude,
            longitude,
        };
        position.validate()?;

        Ok(position)
    }

    /// Reject coordinates outside the valid latitude/longitude range.
    pub fn validate(&self) -> Result {
        if !(-90.0..=90.0).contains(&self.latitude)
            || !(-180.0..=180.0).contains(&self.longitude)
            || self.latitude.is_nan()
            || self.longitude.is_nan()
        {
            return Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Single sample of a unit's travelled path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoutePoint {
    pub position: Position,
    pub timestamp: DateTime<Utc>,
}
