use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use super::{Service, ServiceContext};
use crate::config::TrafficConfig;
use crate::core::{FlowSample, GateEvent, GateEventKind, GateEventOutcome, Traffic};
use crate::runtime::SiteState;
use crate::sim::RandomWalk;

const DENSITY_WALK: RandomWalk = RandomWalk::from_parts(50.0, 85.0, 1.5);
const UPTIME_WALK: RandomWalk = RandomWalk::from_parts(98.0, 100.0, 0.05);

const FLEET_SIZE_MIN: u32 = 35;
const FLEET_SIZE_MAX: u32 = 50;
const SAFETY_ALERTS_MAX: u32 = 10;

const EVENT_PROBABILITY: f64 = 0.4;
const SPEEDING_PROBABILITY: f64 = 0.1;

/// Vehicle volume and gate traffic simulator.
pub struct TrafficSimulator {
    rng: rand::rngs::OsRng,
    interval: Duration,
}

impl Service<TrafficConfig> for TrafficSimulator {
    fn new(config: TrafficConfig) -> Self
    where
        Self: Sized,
    {
        log::debug!("Starting traffic simulator");

        Self {
            rng: rand::rngs::OsRng,
            interval: Duration::from_millis(config.interval),
        }
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("traffic simulator")
    }

    fn tick(&mut self, state: &mut SiteState) {
        if state.traffic.flow().count() == 0 {
            seed_history(&mut state.traffic, self.interval, &mut self.rng);
        }

        let traffic = &mut state.traffic;
        let now = Utc::now();

        traffic.fleet_size = step_counter(
            traffic.fleet_size,
            FLEET_SIZE_MIN,
            FLEET_SIZE_MAX,
            &mut self.rng,
        );
        traffic.density = DENSITY_WALK.advance(traffic.density, &mut self.rng);
        traffic.safety_alerts =
            step_counter(traffic.safety_alerts, 0, SAFETY_ALERTS_MAX, &mut self.rng);
        traffic.uptime = UPTIME_WALK.advance(traffic.uptime, &mut self.rng);

        traffic.push_flow(FlowSample {
            timestamp: now,
            count: self.rng.gen_range(10..24),
        });

        if self.rng.gen_bool(EVENT_PROBABILITY) {
            let event = random_event(&mut self.rng);
            if event.outcome == GateEventOutcome::PassingSpeedLimit {
                log::warn!("{} {} at gate: {}", event.vehicle, event.kind, event.outcome);
            }
            traffic.push_event(event);
        }

        traffic.last_update = now;
    }
}

/// Random walk on an integer counter, one unit at a time.
fn step_counter(value: u32, min: u32, max: u32, rng: &mut impl Rng) -> u32 {
    match rng.gen_range(0..3) {
        0 => value.saturating_sub(1).max(min),
        1 => (value + 1).min(max),
        _ => value,
    }
}

fn random_event(rng: &mut impl Rng) -> GateEvent {
    let kind = if rng.gen_bool(0.5) {
        GateEventKind::Entry
    } else {
        GateEventKind::Exit
    };
    let outcome = if rng.gen_bool(SPEEDING_PROBABILITY) {
        GateEventOutcome::PassingSpeedLimit
    } else {
        GateEventOutcome::Normal
    };

    GateEvent {
        timestamp: Utc::now(),
        vehicle: format!("DT-{:03}", rng.gen_range(1..=60)),
        kind,
        outcome,
    }
}

/// Backfill the flow and event histories so the charts are populated
/// from the first tick.
fn seed_history(traffic: &mut Traffic, interval: Duration, rng: &mut impl Rng) {
    let now = Utc::now();
    let interval = chrono::Duration::from_std(interval).unwrap_or(chrono::Duration::seconds(3));

    let counts = [12, 19, 15, 22, 18];
    for (index, count) in counts.into_iter().enumerate() {
        traffic.push_flow(FlowSample {
            timestamp: now - interval * (counts.len() - index) as i32,
            count,
        });
    }

    for index in 1..=5 {
        let mut event = random_event(rng);
        event.timestamp = now - interval * index;
        traffic.push_event(event);
    }

    log::info!("Simulating site gate traffic");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_stay_bounded() {
        let mut rng = rand::thread_rng();
        let mut fleet_size = 42;
        let mut alerts = 3;

        for _ in 0..1_000 {
            fleet_size = step_counter(fleet_size, FLEET_SIZE_MIN, FLEET_SIZE_MAX, &mut rng);
            alerts = step_counter(alerts, 0, SAFETY_ALERTS_MAX, &mut rng);

            assert!((FLEET_SIZE_MIN..=FLEET_SIZE_MAX).contains(&fleet_size));
            assert!(alerts <= SAFETY_ALERTS_MAX);
        }
    }

    #[test]
    fn test_seed_history_backfills_charts() {
        let mut rng = rand::thread_rng();
        let mut traffic = Traffic::default();

        seed_history(&mut traffic, Duration::from_secs(3), &mut rng);

        assert_eq!(traffic.flow().count(), 5);
        assert_eq!(traffic.events().count(), 5);
        // Flow samples run oldest to newest.
        let timestamps: Vec<_> = traffic.flow().map(|sample| sample.timestamp).collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
