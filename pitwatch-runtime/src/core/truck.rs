use chrono::{DateTime, Utc};

use super::{Position, Status};
use crate::sim::RouteHistory;

/// Site speed limit in kilometers per hour.
pub const SPEED_LIMIT_KPH: f64 = 50.0;
/// Dangerous pitch beyond this angle in degrees, either direction.
pub const TILT_PITCH_LIMIT_DEGREES: f64 = 20.0;
/// Dangerous roll beyond this angle in degrees, either direction.
pub const TILT_ROLL_LIMIT_DEGREES: f64 = 15.0;
/// Fuel level in percent below which the low fuel alarm raises.
pub const FUEL_LOW_PERCENT: f64 = 20.0;
/// Fuel level in percent below which the unit is in danger.
pub const FUEL_CRITICAL_PERCENT: f64 = 10.0;
/// Fraction of optimal tire pressure below which a tire needs attention.
pub const TIRE_WARNING_RATIO: f64 = 0.95;
/// Fraction of optimal tire pressure below which a tire is hazardous.
pub const TIRE_DANGER_RATIO: f64 = 0.85;
/// Eye closure rate in percent above which the driver is critically drowsy.
pub const EYE_CLOSURE_CRITICAL_PERCENT: f64 = 60.0;
/// Eye closure rate in percent above which the driver is drowsy.
pub const EYE_CLOSURE_DROWSY_PERCENT: f64 = 40.0;
/// Yawn count above which the driver is critically drowsy.
pub const YAWN_CRITICAL_COUNT: u8 = 5;
/// Yawn count above which the driver is drowsy.
pub const YAWN_DROWSY_COUNT: u8 = 2;

/// Truck inclination in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Front-back inclination.
    pub pitch: f64,
    /// Left-right inclination.
    pub roll: f64,
}

impl Tilt {
    /// Whether either axis is beyond its safe angle.
    pub fn is_dangerous(&self) -> bool {
        self.pitch.abs() > TILT_PITCH_LIMIT_DEGREES || self.roll.abs() > TILT_ROLL_LIMIT_DEGREES
    }
}

/// Emergency signal state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sos {
    pub active: bool,
    pub since: Option<DateTime<Utc>>,
}

/// Fuel tank state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fuel {
    /// Fill level in percent.
    pub level: f64,
    /// Tank capacity in liters.
    pub capacity: f64,
    /// Consumption in liters per hour.
    pub consumption: f64,
}

impl Fuel {
    /// Remaining fuel in liters.
    pub fn remaining(&self) -> f64 {
        self.level / 100.0 * self.capacity
    }
}

/// Pressure of all four tires in PSI.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TirePressure {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
    /// Optimal pressure reference.
    pub optimal: f64,
}

impl TirePressure {
    pub fn all(&self) -> [f64; 4] {
        [
            self.front_left,
            self.front_right,
            self.rear_left,
            self.rear_right,
        ]
    }

    /// Severity tier for a single tire relative to the optimal pressure.
    pub fn classify(&self, pressure: f64) -> Status {
        if pressure < self.optimal * TIRE_DANGER_RATIO {
            Status::Danger
        } else if pressure < self.optimal * TIRE_WARNING_RATIO {
            Status::Warning
        } else {
            Status::Normal
        }
    }

    /// Most severe tier across all four tires.
    pub fn worst(&self) -> Status {
        self.all()
            .into_iter()
            .map(|pressure| self.classify(pressure))
            .fold(Status::Normal, Status::escalate)
    }
}

/// Driver wakefulness classification from the dashboard camera.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DrowsinessState {
    #[default]
    Alert,
    Drowsy,
    Critical,
}

impl DrowsinessState {
    /// Classify wakefulness from eye closure rate and recent yawn count.
    pub fn classify(eye_closure_rate: f64, yawn_count: u8) -> Self {
        if eye_closure_rate > EYE_CLOSURE_CRITICAL_PERCENT || yawn_count > YAWN_CRITICAL_COUNT {
            DrowsinessState::Critical
        } else if eye_closure_rate > EYE_CLOSURE_DROWSY_PERCENT || yawn_count > YAWN_DROWSY_COUNT {
            DrowsinessState::Drowsy
        } else {
            DrowsinessState::Alert
        }
    }
}

impl std::fmt::Display for DrowsinessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrowsinessState::Alert => write!(f, "Alert"),
            DrowsinessState::Drowsy => write!(f, "Drowsy"),
            DrowsinessState::Critical => write!(f, "Critical"),
        }
    }
}

/// Dashboard camera drowsiness readings.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Drowsiness {
    /// Eye closure rate in percent.
    pub eye_closure_rate: f64,
    /// Yawns detected over the last five minutes.
    pub yawn_count: u8,
    pub last_alert: Option<DateTime<Utc>>,
}

impl Drowsiness {
    pub fn state(&self) -> DrowsinessState {
        DrowsinessState::classify(self.eye_closure_rate, self.yawn_count)
    }
}

/// Driver work shift bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorkShift {
    pub started_at: DateTime<Utc>,
    /// Elapsed duration in minutes.
    pub duration: f64,
    /// Maximum permitted duration in minutes.
    pub max_duration: f64,
}

impl WorkShift {
    pub fn is_overtime(&self) -> bool {
        self.duration > self.max_duration
    }
}

/// Per-metric threshold breach flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TruckAlarms {
    pub speed: bool,
    pub work_time: bool,
    pub tilt: bool,
    pub fuel: bool,
    pub tire_pressure: bool,
    pub drowsiness: bool,
}

impl TruckAlarms {
    pub fn any(&self) -> bool {
        self.speed
            || self.work_time
            || self.tilt
            || self.fuel
            || self.tire_pressure
            || self.drowsiness
    }
}

/// Haul truck telemetry state.
#[derive(Clone, Debug)]
pub struct Truck {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub position: Position,
    /// Ground speed in kilometers per hour.
    pub speed: f64,
    /// Heading in degrees.
    pub heading: f64,
    pub tilt: Tilt,
    pub sos: Sos,
    pub fuel: Fuel,
    pub tires: TirePressure,
    pub drowsiness: Drowsiness,
    pub shift: WorkShift,
    pub route: RouteHistory,
    pub last_update: DateTime<Utc>,
}

impl Truck {
    /// Derive all alarm flags from the current metrics.
    pub fn alarms(&self) -> TruckAlarms {
        TruckAlarms {
            speed: self.speed > SPEED_LIMIT_KPH,
            work_time: self.shift.is_overtime(),
            tilt: self.tilt.is_dangerous(),
            fuel: self.fuel.level < FUEL_LOW_PERCENT,
            tire_pressure: self.tires.worst() > Status::Normal,
            drowsiness: self.drowsiness.state() != DrowsinessState::Alert,
        }
    }

    /// Aggregate severity, evaluated danger-first.
    pub fn status(&self) -> Status {
        let alarms = self.alarms();

        if self.sos.active {
            Status::Danger
        } else if alarms.tilt
            || self.drowsiness.state() == DrowsinessState::Critical
            || self.fuel.level < FUEL_CRITICAL_PERCENT
        {
            Status::Danger
        } else if alarms.any() {
            Status::Warning
        } else {
            Status::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck() -> Truck {
        Truck {
            id: "TRK-900".to_owned(),
            name: "Dump Truck HD785-7".to_owned(),
            driver: "Test Driver".to_owned(),
            position: Position {
                latitude: -3.8289,
                longitude: 103.9349,
            },
            speed: 35.0,
            heading: 145.0,
            tilt: Tilt {
                pitch: 8.0,
                roll: 3.0,
            },
            sos: Sos::default(),
            fuel: Fuel {
                level: 75.0,
                capacity: 450.0,
                consumption: 25.0,
            },
            tires: TirePressure {
                front_left: 108.0,
                front_right: 110.0,
                rear_left: 109.0,
                rear_right: 107.0,
                optimal: 110.0,
            },
            drowsiness: Drowsiness {
                eye_closure_rate: 15.0,
                yawn_count: 0,
                last_alert: None,
            },
            shift: WorkShift {
                started_at: Utc::now(),
                duration: 270.0,
                max_duration: 480.0,
            },
            route: RouteHistory::new(30).unwrap(),
            last_update: Utc::now(),
        }
    }

    #[test]
    fn test_nominal_truck_is_normal() {
        let truck = truck();

        assert!(!truck.alarms().any());
        assert_eq!(truck.status(), Status::Normal);
    }

    #[test]
    fn test_overspeed_raises_warning() {
        let mut truck = truck();
        truck.speed = 55.0;

        assert!(truck.alarms().speed);
        assert_eq!(truck.status(), Status::Warning);
    }

    #[test]
    fn test_danger_takes_precedence_over_warning() {
        let mut truck = truck();
        // Overspeed warning and dangerous tilt at the same time.
        truck.speed = 55.0;
        truck.tilt.pitch = 25.0;

        assert!(truck.alarms().speed);
        assert!(truck.alarms().tilt);
        assert_eq!(truck.status(), Status::Danger);
    }

    #[test]
    fn test_sos_is_always_danger() {
        let mut truck = truck();
        truck.sos.active = true;

        assert_eq!(truck.status(), Status::Danger);
    }

    #[test]
    fn test_fuel_tiers() {
        let mut truck = truck();

        truck.fuel.level = 15.0;
        assert!(truck.alarms().fuel);
        assert_eq!(truck.status(), Status::Warning);

        truck.fuel.level = 8.0;
        assert_eq!(truck.status(), Status::Danger);
    }

    #[test]
    fn test_tire_pressure_tiers() {
        let mut truck = truck();

        // 100 PSI of 110 optimal is between 95% and 85%.
        truck.tires.rear_left = 100.0;
        assert_eq!(truck.tires.worst(), Status::Warning);
        assert!(truck.alarms().tire_pressure);

        // 65 PSI of 110 optimal is well below the 85% threshold.
        truck.tires.rear_left = 65.0;
        assert_eq!(truck.tires.classify(65.0), Status::Danger);
        assert_eq!(truck.tires.worst(), Status::Danger);
    }

    #[test]
    fn test_drowsiness_classification() {
        assert_eq!(DrowsinessState::classify(15.0, 0), DrowsinessState::Alert);
        assert_eq!(DrowsinessState::classify(45.0, 0), DrowsinessState::Drowsy);
        assert_eq!(DrowsinessState::classify(20.0, 3), DrowsinessState::Drowsy);
        assert_eq!(
            DrowsinessState::classify(75.0, 0),
            DrowsinessState::Critical
        );
        assert_eq!(DrowsinessState::classify(20.0, 8), DrowsinessState::Critical);
    }

    #[test]
    fn test_critical_drowsiness_is_danger() {
        let mut truck = truck();
        truck.drowsiness.eye_closure_rate = 75.0;

        assert!(truck.alarms().drowsiness);
        assert_eq!(truck.status(), Status::Danger);
    }

    #[test]
    fn test_overtime_is_warning() {
        let mut truck = truck();
        truck.shift.duration = 510.0;

        assert!(truck.alarms().work_time);
        assert_eq!(truck.status(), Status::Warning);
    }
}
