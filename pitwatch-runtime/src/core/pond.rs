use chrono::{DateTime, Utc};

use super::Status;
use crate::classify::{classify, Parameter};

/// Settling pond water quality sample point.
#[derive(Clone, Debug)]
pub struct SamplePoint {
    pub id: String,
    pub name: String,
    /// Ambient temperature in degrees Celsius.
    pub ambient_temperature: f64,
    /// Ambient relative humidity in percent.
    pub ambient_humidity: f64,
    /// Water temperature in degrees Celsius.
    pub water_temperature: f64,
    /// Water acidity.
    pub ph: f64,
    /// Electrical conductivity in microsiemens per centimeter.
    pub conductivity: f64,
    /// Total dissolved solids in parts per million.
    pub total_dissolved_solids: f64,
    /// Total suspended solids in milligrams per liter.
    pub total_suspended_solids: f64,
    /// Dissolved oxygen in milligrams per liter.
    pub dissolved_oxygen: f64,
    pub last_update: DateTime<Utc>,
}

impl SamplePoint {
    /// Aggregate severity over the regulated water quality parameters.
    ///
    /// Only pH, suspended solids and dissolved oxygen carry threshold
    /// rules; the remaining parameters are recorded for the charts.
    pub fn status(&self) -> Status {
        [
            (Parameter::Ph, self.ph),
            (Parameter::TotalSuspendedSolids, self.total_suspended_solids),
            (Parameter::DissolvedOxygen, self.dissolved_oxygen),
        ]
        .into_iter()
        .map(|(parameter, value)| classify(parameter, value).severity)
        .fold(Status::Normal, Status::escalate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> SamplePoint {
        SamplePoint {
            id: "1".to_owned(),
            name: "Titik 1".to_owned(),
            ambient_temperature: 31.0,
            ambient_humidity: 70.0,
            water_temperature: 28.0,
            ph: 7.2,
            conductivity: 1_400.0,
            total_dissolved_solids: 900.0,
            total_suspended_solids: 350.0,
            dissolved_oxygen: 6.1,
            last_update: Utc::now(),
        }
    }

    #[test]
    fn test_sample_point_normal() {
        assert_eq!(point().status(), Status::Normal);
    }

    #[test]
    fn test_acidic_water_needs_attention() {
        let mut point = point();
        point.ph = 4.8;

        assert_eq!(point.status(), Status::Warning);
    }

    #[test]
    fn test_low_oxygen_needs_attention() {
        let mut point = point();
        point.dissolved_oxygen = 2.5;

        assert_eq!(point.status(), Status::Warning);
    }
}
