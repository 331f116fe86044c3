use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::Status;
use crate::classify::{classify, Parameter};
use crate::runtime::{Error, Result};

/// Office room climate readings.
#[derive(Clone, Debug)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Light intensity in lux.
    pub light_intensity: f64,
    /// PM2.5 dust concentration in micrograms per cubic meter.
    pub dust_pm25: f64,
    /// Carbon dioxide concentration in parts per million.
    pub co2: f64,
    pub last_update: DateTime<Utc>,
}

impl Room {
    /// Readings paired with their classification parameters.
    fn readings(&self) -> [(Parameter, f64); 5] {
        [
            (Parameter::Temperature, self.temperature),
            (Parameter::Humidity, self.humidity),
            (Parameter::LightIntensity, self.light_intensity),
            (Parameter::DustPm25, self.dust_pm25),
            (Parameter::CarbonDioxide, self.co2),
        ]
    }

    /// Aggregate severity over all climate parameters.
    pub fn status(&self) -> Status {
        self.readings()
            .into_iter()
            .map(|(parameter, value)| classify(parameter, value).severity)
            .fold(Status::Normal, Status::escalate)
    }
}

/// Fleet-average climate sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrendSample {
    pub timestamp: DateTime<Utc>,
    /// Average temperature across all rooms.
    pub temperature: f64,
    /// Average humidity across all rooms.
    pub humidity: f64,
}

/// Bounded history of fleet-average climate samples for the trend charts.
#[derive(Clone, Debug)]
pub struct ClimateTrend {
    samples: VecDeque<TrendSample>,
    capacity: usize,
}

impl ClimateTrend {
    /// Construct an empty history with the given capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn push(&mut self, sample: TrendSample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }
}

impl Default for ClimateTrend {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(crate::consts::TREND_HISTORY_CAPACITY),
            capacity: crate::consts::TREND_HISTORY_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room {
            id: "1".to_owned(),
            name: "Ruang Kontrol Utama".to_owned(),
            temperature: 24.5,
            humidity: 55.0,
            light_intensity: 450.0,
            dust_pm25: 18.0,
            co2: 650.0,
            last_update: Utc::now(),
        }
    }

    #[test]
    fn test_room_status_normal() {
        assert_eq!(room().status(), Status::Normal);
    }

    #[test]
    fn test_room_co2_within_warning_band() {
        let mut room = room();
        room.co2 = 1200.0;

        assert_eq!(room.status(), Status::Warning);
    }

    #[test]
    fn test_room_worst_parameter_wins() {
        let mut room = room();
        room.humidity = 75.0; // warning
        room.temperature = 30.0; // danger, beyond the 10% margin

        assert_eq!(room.status(), Status::Danger);
    }

    #[test]
    fn test_trend_rejects_zero_capacity() {
        assert!(ClimateTrend::new(0).is_err());
        assert!(ClimateTrend::new(1).is_ok());
    }

    #[test]
    fn test_trend_evicts_oldest() {
        let mut trend = ClimateTrend::new(3).unwrap();
        let now = Utc::now();

        for index in 0..5 {
            trend.push(TrendSample {
                timestamp: now,
                temperature: index as f64,
                humidity: 50.0,
            });
        }

        assert_eq!(trend.len(), 3);
        assert_eq!(trend.iter().next().unwrap().temperature, 2.0);
    }
}
