use rand::Rng;

use crate::math::Bounds;
use crate::runtime::{Error, Result};

/// Bounded random walk over a scalar metric.
///
/// Each advance adds a uniform delta in `[-step, +step]` and clamps the
/// result to the metric bounds. The step size is small relative to the range
/// so consecutive readings drift rather than jump.
#[derive(Copy, Clone, Debug)]
pub struct RandomWalk {
    bounds: Bounds,
    step: f64,
}

impl RandomWalk {
    /// Construct a validated walk descriptor.
    pub fn new(bounds: Bounds, step: f64) -> Result<Self> {
        if step <= 0.0 || !step.is_finite() {
            return Err(Error::InvalidStepSize(step));
        }

        Ok(Self { bounds, step })
    }

    /// Walk parameters from compile-time constants. `min <= max` and a
    /// positive step are the caller's responsibility.
    pub const fn from_parts(min: f64, max: f64, step: f64) -> Self {
        Self {
            bounds: Bounds::spanning(min, max),
            step,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance a value by one step of the walk.
    pub fn advance(&self, value: f64, rng: &mut impl Rng) -> f64 {
        self.bounds
            .clamp(value + rng.gen_range(-self.step..=self.step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_stays_within_bounds() {
        let walk = RandomWalk::from_parts(0.0, 60.0, 2.5);
        let mut rng = rand::thread_rng();

        let mut value = 35.0;
        for _ in 0..10_000 {
            value = walk.advance(value, &mut rng);
            assert!((0.0..=60.0).contains(&value));
        }
    }

    #[test]
    fn test_walk_clamps_overshoot() {
        // A step far larger than the range must still land inside it.
        let walk = RandomWalk::from_parts(10.0, 90.0, 1_000.0);
        let mut rng = rand::thread_rng();

        let mut value = 50.0;
        for _ in 0..1_000 {
            value = walk.advance(value, &mut rng);
            assert!((10.0..=90.0).contains(&value));
        }
    }

    #[test]
    fn test_walk_rejects_invalid_step() {
        let bounds = Bounds::new(0.0, 100.0).unwrap();

        assert!(RandomWalk::new(bounds, 0.0).is_err());
        assert!(RandomWalk::new(bounds, -1.0).is_err());
        assert!(RandomWalk::new(bounds, f64::INFINITY).is_err());
        assert!(RandomWalk::new(bounds, 5.0).is_ok());
    }
}
