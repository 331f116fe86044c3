use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::core::{Position, RoutePoint};
use crate::math::lerp;
use crate::runtime::{Error, Result};

/// Uniform jitter applied to interpolated route coordinates, in degrees.
pub const ROUTE_JITTER_DEGREES: f64 = 0.001;

/// Minimum displacement on either axis before a new position is recorded.
pub const DISPLACEMENT_THRESHOLD_DEGREES: f64 = 0.0003;

/// Synthesize the path a unit travelled between two coordinates.
///
/// Points are linearly interpolated from `start` to `current` with
/// independent uniform jitter on each axis, and timestamps are distributed
/// over `span` ending at the current wall-clock time. Timestamps are
/// non-decreasing; the first is `now - span` and the last is `now`.
/// A negative `span` is rejected, it would invert the timestamp order.
pub fn generate_route(
    start: Position,
    current: Position,
    point_count: usize,
    span: Duration,
    rng: &mut impl Rng,
) -> Result<Vec<RoutePoint>> {
    if point_count == 0 {
        return Err(Error::InvalidPointCount(point_count));
    }
    if span < Duration::zero() {
        return Err(Error::InvalidSpan(span));
    }
    start.validate()?;
    current.validate()?;

    let now = Utc::now();
    let span_ms = span.num_milliseconds() as f64;

    let mut route = Vec::with_capacity(point_count);
    for index in 0..point_count {
        // A single point degenerates to the start of the span.
        let ratio = if point_count > 1 {
            index as f64 / (point_count - 1) as f64
        } else {
            0.0
        };

        let jitter = ROUTE_JITTER_DEGREES;
        let latitude = lerp(start.latitude, current.latitude, ratio) + rng.gen_range(-jitter..=jitter);
        let longitude =
            lerp(start.longitude, current.longitude, ratio) + rng.gen_range(-jitter..=jitter);

        let backdate = Duration::milliseconds((span_ms - span_ms * ratio) as i64);

        route.push(RoutePoint {
            position: Position {
                latitude,
                longitude,
            },
            timestamp: now - backdate,
        });
    }

    Ok(route)
}

/// Bounded, time-ordered sequence of past positions.
///
/// Ring-buffer semantics: once at capacity, each recorded point evicts the
/// oldest. Positions are only recorded when the unit moved far enough from
/// the last sample to matter on a map.
#[derive(Clone, Debug)]
pub struct RouteHistory {
    points: VecDeque<RoutePoint>,
    capacity: usize,
}

impl RouteHistory {
    /// Construct an empty history with the given capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Construct a history seeded from an existing route.
    ///
    /// If the route exceeds the capacity the oldest points are dropped.
    pub fn from_route(route: Vec<RoutePoint>, capacity: usize) -> Result<Self> {
        let mut history = Self::new(capacity)?;
        for point in route {
            history.push(point);
        }

        Ok(history)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&RoutePoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutePoint> {
        self.points.iter()
    }

    /// Record a new position if it moved beyond the displacement threshold.
    ///
    /// Returns whether the position was recorded.
    pub fn record(&mut self, position: Position, timestamp: DateTime<Utc>) -> bool {
        if let Some(last) = self.points.back() {
            let moved = (last.position.latitude - position.latitude).abs()
                > DISPLACEMENT_THRESHOLD_DEGREES
                || (last.position.longitude - position.longitude).abs()
                    > DISPLACEMENT_THRESHOLD_DEGREES;
            if !moved {
                return false;
            }
        }

        self.push(RoutePoint {
            position,
            timestamp,
        });

        true
    }

    fn push(&mut self, point: RoutePoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Position {
        Position {
            latitude: -3.852,
            longitude: 103.918,
        }
    }

    fn current() -> Position {
        Position {
            latitude: -3.8289,
            longitude: 103.9349,
        }
    }

    #[test]
    fn test_route_point_count_and_order() {
        let mut rng = rand::thread_rng();
        let route = generate_route(start(), current(), 20, Duration::hours(8), &mut rng).unwrap();

        assert_eq!(route.len(), 20);
        for pair in route.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_route_spans_requested_duration() {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let route = generate_route(start(), current(), 20, Duration::hours(8), &mut rng).unwrap();

        let first = route.first().unwrap().timestamp;
        let last = route.last().unwrap().timestamp;

        assert!((first - (now - Duration::hours(8))).num_seconds().abs() <= 1);
        assert!((last - now).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_route_endpoints_within_jitter() {
        let mut rng = rand::thread_rng();
        let route = generate_route(start(), current(), 20, Duration::hours(8), &mut rng).unwrap();

        let first = route.first().unwrap().position;
        let last = route.last().unwrap().position;

        let tolerance = ROUTE_JITTER_DEGREES + 1e-9;
        assert!((first.latitude - start().latitude).abs() <= tolerance);
        assert!((first.longitude - start().longitude).abs() <= tolerance);
        assert!((last.latitude - current().latitude).abs() <= tolerance);
        assert!((last.longitude - current().longitude).abs() <= tolerance);
    }

    #[test]
    fn test_route_single_point() {
        let mut rng = rand::thread_rng();
        let route = generate_route(start(), current(), 1, Duration::hours(8), &mut rng).unwrap();

        assert_eq!(route.len(), 1);
    }

    #[test]
    fn test_route_rejects_invalid_input() {
        let mut rng = rand::thread_rng();

        assert!(generate_route(start(), current(), 0, Duration::hours(8), &mut rng).is_err());

        // A negative span would place the first point in the future and
        // invert the timestamp order.
        assert!(generate_route(start(), current(), 20, Duration::hours(-8), &mut rng).is_err());

        let malformed = Position {
            latitude: 123.0,
            longitude: 0.0,
        };
        assert!(generate_route(malformed, current(), 20, Duration::hours(8), &mut rng).is_err());
    }

    #[test]
    fn test_history_evicts_oldest_at_capacity() {
        let mut history = RouteHistory::new(3).unwrap();
        let now = Utc::now();

        for index in 0..5 {
            let position = Position {
                latitude: index as f64,
                longitude: 0.0,
            };
            assert!(history.record(position, now + Duration::seconds(index)));
            assert!(history.len() <= 3);
        }

        assert_eq!(history.len(), 3);

        // Only the three newest samples survive.
        let latitudes: Vec<f64> = history.iter().map(|p| p.position.latitude).collect();
        assert_eq!(latitudes, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_history_ignores_small_displacement() {
        let mut history = RouteHistory::new(10).unwrap();
        let now = Utc::now();

        let origin = Position {
            latitude: -3.852,
            longitude: 103.918,
        };
        assert!(history.record(origin, now));

        let nearby = Position {
            latitude: origin.latitude + 0.0001,
            longitude: origin.longitude + 0.0001,
        };
        assert!(!history.record(nearby, now + Duration::seconds(2)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_rejects_zero_capacity() {
        assert!(RouteHistory::new(0).is_err());
    }
}
