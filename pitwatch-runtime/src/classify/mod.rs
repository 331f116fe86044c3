use crate::core::Status;

/// Monitored parameter with a declared threshold rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Room temperature in degrees Celsius.
    Temperature,
    /// Relative humidity in percent.
    Humidity,
    /// Light intensity in lux.
    LightIntensity,
    /// PM2.5 dust concentration in micrograms per cubic meter.
    DustPm25,
    /// Carbon dioxide concentration in parts per million.
    CarbonDioxide,
    /// Water acidity.
    Ph,
    /// Total suspended solids in milligrams per liter.
    TotalSuspendedSolids,
    /// Dissolved oxygen in milligrams per liter.
    DissolvedOxygen,
    /// Body temperature in degrees Celsius.
    BodyTemperature,
}

/// Declarative threshold rule for a single parameter.
///
/// Every rule is declared exactly once in [`rule`]. Both the current value
/// display and the aggregate unit status are derived from the same table.
#[derive(Copy, Clone, Debug)]
enum Rule {
    /// Inclusive standard range. Values outside the range are a warning,
    /// values beyond a 10% margin of the range width are a danger.
    Standard { min: f64, max: f64 },
    /// Banded ceiling. Values at or below `normal_max` are normal, values at
    /// or below `warning_max` are a warning, anything above is a danger.
    Bands { normal_max: f64, warning_max: f64 },
    /// Two-tier inclusive window: inside is normal, outside is a warning.
    Window { min: f64, max: f64 },
    /// Two-tier ceiling: values strictly below `max` are normal.
    Ceiling { max: f64 },
    /// Two-tier floor: values at or above `min` are normal.
    Floor { min: f64 },
    /// Clinical body temperature bands.
    Febrile {
        hypothermia: f64,
        fever: f64,
        high_fever: f64,
    },
}

/// Fraction of the standard range width tolerated beyond it before a
/// breach escalates from warning to danger.
const STANDARD_MARGIN_FRACTION: f64 = 0.1;

/// Threshold rule table. Single source of truth for all dashboards.
const fn rule(parameter: Parameter) -> Rule {
    match parameter {
        Parameter::Temperature => Rule::Standard {
            min: 20.0,
            max: 28.0,
        },
        Parameter::Humidity => Rule::Standard {
            min: 40.0,
            max: 70.0,
        },
        Parameter::LightIntensity => Rule::Standard {
            min: 300.0,
            max: 1000.0,
        },
        Parameter::DustPm25 => Rule::Bands {
            normal_max: 35.0,
            warning_max: 55.0,
        },
        Parameter::CarbonDioxide => Rule::Bands {
            normal_max: 1000.0,
            warning_max: 2000.0,
        },
        Parameter::Ph => Rule::Window { min: 6.0, max: 8.0 },
        Parameter::TotalSuspendedSolids => Rule::Ceiling { max: 600.0 },
        Parameter::DissolvedOxygen => Rule::Floor { min: 4.0 },
        Parameter::BodyTemperature => Rule::Febrile {
            hypothermia: 35.0,
            fever: 37.5,
            high_fever: 38.0,
        },
    }
}

/// Outcome of a threshold rule evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub label: &'static str,
    pub severity: Status,
}

impl Classification {
    const fn from_severity(severity: Status) -> Self {
        match severity {
            Status::Normal => Self {
                label: "normal",
                severity,
            },
            Status::Warning => Self {
                label: "attention",
                severity,
            },
            Status::Danger => Self {
                label: "hazard",
                severity,
            },
        }
    }
}

/// Classify a parameter reading against its declared rule.
///
/// Pure lookup: identical inputs always yield identical results. Standard
/// range boundaries are inclusive on the normal side, so a reading exactly
/// at a range limit classifies as normal.
pub fn classify(parameter: Parameter, value: f64) -> Classification {
    let severity = match rule(parameter) {
        Rule::Standard { min, max } => {
            let margin = (max - min) * STANDARD_MARGIN_FRACTION;
            if value < min - margin || value > max + margin {
                Status::Danger
            } else if value < min || value > max {
                Status::Warning
            } else {
                Status::Normal
            }
        }
        Rule::Bands {
            normal_max,
            warning_max,
        } => {
            if value > warning_max {
                Status::Danger
            } else if value > normal_max {
                Status::Warning
            } else {
                Status::Normal
            }
        }
        Rule::Window { min, max } => {
            if value >= min && value <= max {
                Status::Normal
            } else {
                Status::Warning
            }
        }
        Rule::Ceiling { max } => {
            if value < max {
                Status::Normal
            } else {
                Status::Warning
            }
        }
        Rule::Floor { min } => {
            if value >= min {
                Status::Normal
            } else {
                Status::Warning
            }
        }
        Rule::Febrile {
            hypothermia,
            fever,
            high_fever,
        } => {
            if value >= high_fever {
                Status::Danger
            } else if value >= fever || value < hypothermia {
                Status::Warning
            } else {
                Status::Normal
            }
        }
    };

    Classification::from_severity(severity)
}

/// Classify a blood pressure reading from its systolic and diastolic parts.
pub fn classify_blood_pressure(systolic: f64, diastolic: f64) -> Classification {
    let severity = if systolic > 140.0 || diastolic > 90.0 {
        Status::Danger
    } else if systolic > 130.0 || diastolic > 85.0 || systolic < 90.0 || diastolic < 60.0 {
        Status::Warning
    } else {
        Status::Normal
    };

    Classification::from_severity(severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_pure() {
        let first = classify(Parameter::Ph, 5.3);
        let second = classify(Parameter::Ph, 5.3);

        assert_eq!(first, second);
    }

    #[test]
    fn test_ph_boundaries_inclusive() {
        assert_eq!(classify(Parameter::Ph, 6.0).severity, Status::Normal);
        assert_eq!(classify(Parameter::Ph, 8.0).severity, Status::Normal);
        assert_eq!(classify(Parameter::Ph, 5.9).severity, Status::Warning);
        assert_eq!(classify(Parameter::Ph, 8.1).severity, Status::Warning);
    }

    #[test]
    fn test_co2_bands() {
        assert_eq!(
            classify(Parameter::CarbonDioxide, 650.0).severity,
            Status::Normal
        );
        // Above the standard maximum but within the warning band.
        assert_eq!(
            classify(Parameter::CarbonDioxide, 1200.0).severity,
            Status::Warning
        );
        assert_eq!(
            classify(Parameter::CarbonDioxide, 2400.0).severity,
            Status::Danger
        );
    }

    #[test]
    fn test_standard_range_margin() {
        // Temperature standard is 20-28 with a 10% margin of the 8 degree
        // width, so the danger thresholds sit at 19.2 and 28.8.
        assert_eq!(classify(Parameter::Temperature, 24.0).severity, Status::Normal);
        assert_eq!(classify(Parameter::Temperature, 28.0).severity, Status::Normal);
        assert_eq!(
            classify(Parameter::Temperature, 28.5).severity,
            Status::Warning
        );
        assert_eq!(
            classify(Parameter::Temperature, 29.0).severity,
            Status::Danger
        );
        assert_eq!(
            classify(Parameter::Temperature, 19.0).severity,
            Status::Danger
        );
    }

    #[test]
    fn test_dissolved_oxygen_floor() {
        assert_eq!(
            classify(Parameter::DissolvedOxygen, 4.0).severity,
            Status::Normal
        );
        assert_eq!(
            classify(Parameter::DissolvedOxygen, 3.9).severity,
            Status::Warning
        );
    }

    #[test]
    fn test_suspended_solids_ceiling_exclusive() {
        assert_eq!(
            classify(Parameter::TotalSuspendedSolids, 599.0).severity,
            Status::Normal
        );
        // The ceiling itself already classifies as a breach.
        assert_eq!(
            classify(Parameter::TotalSuspendedSolids, 600.0).severity,
            Status::Warning
        );
    }

    #[test]
    fn test_body_temperature_bands() {
        assert_eq!(
            classify(Parameter::BodyTemperature, 36.5).severity,
            Status::Normal
        );
        assert_eq!(
            classify(Parameter::BodyTemperature, 37.6).severity,
            Status::Warning
        );
        assert_eq!(
            classify(Parameter::BodyTemperature, 34.0).severity,
            Status::Warning
        );
        assert_eq!(
            classify(Parameter::BodyTemperature, 38.2).severity,
            Status::Danger
        );
    }

    #[test]
    fn test_blood_pressure() {
        assert_eq!(
            classify_blood_pressure(120.0, 80.0).severity,
            Status::Normal
        );
        assert_eq!(
            classify_blood_pressure(138.0, 88.0).severity,
            Status::Warning
        );
        assert_eq!(
            classify_blood_pressure(150.0, 95.0).severity,
            Status::Danger
        );
    }
}
