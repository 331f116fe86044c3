use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    /// Metric bounds where the lower bound exceeds the upper bound.
    InvalidBounds { min: f64, max: f64 },
    /// Random walk step size that is not a positive finite number.
    InvalidStepSize(f64),
    /// Route generation with a zero point count.
    InvalidPointCount(usize),
    /// Route generation with a negative time span.
    InvalidSpan(chrono::Duration),
    /// Geographic coordinate outside the valid latitude/longitude range.
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// History buffer with a zero capacity.
    InvalidCapacity(usize),
    /// Configuration file could not be read.
    Io(io::Error),
    /// Configuration file could not be parsed.
    ConfigParse(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBounds { min, max } => {
                write!(f, "invalid bounds: min {} exceeds max {}", min, max)
            }
            Error::InvalidStepSize(step) => write!(f, "invalid step size: {}", step),
            Error::InvalidPointCount(count) => write!(f, "invalid point count: {}", count),
            Error::InvalidSpan(span) => write!(f, "invalid span: {}", span),
            Error::InvalidCoordinate {
                latitude,
                longitude,
            } => write!(f, "invalid coordinate: ({}, {})", latitude, longitude),
            Error::InvalidCapacity(capacity) => write!(f, "invalid capacity: {}", capacity),
            Error::Io(e) => write!(f, "{}", e),
            Error::ConfigParse(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::ConfigParse(value)
    }
}
