use crate::runtime::{Error, Result};

/// Inclusive numeric range a metric value is restricted to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Construct validated bounds.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min > max || !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidBounds { min, max });
        }

        Ok(Self { min, max })
    }

    /// Bounds from compile-time constants. `min <= max` is the caller's
    /// responsibility.
    pub const fn spanning(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the range.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Restrict a value to the range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f64, b: f64, ratio: f64) -> f64 {
    a + (b - a) * ratio
}
