use chrono::Utc;
use rand::Rng;

use super::{Service, ServiceContext};
use crate::config::PondConfig;
use crate::core::SamplePoint;
use crate::runtime::SiteState;
use crate::sim::RandomWalk;

const AMBIENT_TEMPERATURE_WALK: RandomWalk = RandomWalk::from_parts(25.0, 40.0, 0.4);
const AMBIENT_HUMIDITY_WALK: RandomWalk = RandomWalk::from_parts(50.0, 95.0, 2.0);
const WATER_TEMPERATURE_WALK: RandomWalk = RandomWalk::from_parts(22.0, 35.0, 0.3);
const PH_WALK: RandomWalk = RandomWalk::from_parts(4.0, 9.0, 0.1);
const CONDUCTIVITY_WALK: RandomWalk = RandomWalk::from_parts(500.0, 3_000.0, 50.0);
const DISSOLVED_SOLIDS_WALK: RandomWalk = RandomWalk::from_parts(300.0, 2_000.0, 40.0);
const SUSPENDED_SOLIDS_WALK: RandomWalk = RandomWalk::from_parts(100.0, 800.0, 15.0);
const OXYGEN_WALK: RandomWalk = RandomWalk::from_parts(2.0, 8.0, 0.2);

/// Settling pond water quality simulator.
pub struct PondSimulator {
    rng: rand::rngs::OsRng,
    randomize_start: bool,
}

impl Service<PondConfig> for PondSimulator {
    fn new(config: PondConfig) -> Self
    where
        Self: Sized,
    {
        log::debug!("Starting pond simulator");

        Self {
            rng: rand::rngs::OsRng,
            randomize_start: config.randomize_start,
        }
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("pond simulator")
    }

    fn tick(&mut self, state: &mut SiteState) {
        if state.pond.is_empty() {
            state.pond = seed_points(&mut self.rng, self.randomize_start);
            log::info!("Simulating {} pond sample points", state.pond.len());
        }

        let now = Utc::now();
        for point in &mut state.pond {
            let before = point.status();

            point.ambient_temperature =
                AMBIENT_TEMPERATURE_WALK.advance(point.ambient_temperature, &mut self.rng);
            point.ambient_humidity =
                AMBIENT_HUMIDITY_WALK.advance(point.ambient_humidity, &mut self.rng);
            point.water_temperature =
                WATER_TEMPERATURE_WALK.advance(point.water_temperature, &mut self.rng);
            point.ph = PH_WALK.advance(point.ph, &mut self.rng);
            point.conductivity = CONDUCTIVITY_WALK.advance(point.conductivity, &mut self.rng);
            point.total_dissolved_solids =
                DISSOLVED_SOLIDS_WALK.advance(point.total_dissolved_solids, &mut self.rng);
            point.total_suspended_solids =
                SUSPENDED_SOLIDS_WALK.advance(point.total_suspended_solids, &mut self.rng);
            point.dissolved_oxygen = OXYGEN_WALK.advance(point.dissolved_oxygen, &mut self.rng);
            point.last_update = now;

            let after = point.status();
            if after > before {
                log::warn!("{} escalated to {}", point.name, after);
            } else if after < before {
                log::info!("{} recovered to {}", point.name, after);
            }
        }
    }
}

fn seed_points(rng: &mut impl Rng, randomize_start: bool) -> Vec<SamplePoint> {
    let now = Utc::now();

    (1..=5)
        .map(|index| {
            let mut point = SamplePoint {
                id: index.to_string(),
                name: format!("Titik {}", index),
                ambient_temperature: 31.0,
                ambient_humidity: 70.0,
                water_temperature: 28.0,
                ph: 7.2,
                conductivity: 1_400.0,
                total_dissolved_solids: 900.0,
                total_suspended_solids: 350.0,
                dissolved_oxygen: 6.1,
                last_update: now,
            };

            if randomize_start || index > 1 {
                point.ambient_temperature = rng.gen_range(28.0..=34.0);
                point.ambient_humidity = rng.gen_range(60.0..=85.0);
                point.water_temperature = rng.gen_range(25.0..=31.0);
                point.ph = rng.gen_range(6.2..=7.8);
                point.conductivity = rng.gen_range(1_000.0..=1_800.0);
                point.total_dissolved_solids = rng.gen_range(600.0..=1_200.0);
                point.total_suspended_solids = rng.gen_range(150.0..=550.0);
                point.dissolved_oxygen = rng.gen_range(4.5..=8.0);
            }

            point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    #[test]
    fn test_seed_points_start_normal() {
        let mut rng = rand::thread_rng();
        let points = seed_points(&mut rng, false);

        assert_eq!(points.len(), 5);
        for point in points {
            assert_eq!(point.status(), Status::Normal, "{}", point.name);
        }
    }

    #[test]
    fn test_readings_stay_bounded() {
        let mut rng = rand::thread_rng();
        let mut points = seed_points(&mut rng, false);

        for _ in 0..500 {
            for point in &mut points {
                point.ph = PH_WALK.advance(point.ph, &mut rng);
                point.total_suspended_solids =
                    SUSPENDED_SOLIDS_WALK.advance(point.total_suspended_solids, &mut rng);
                point.dissolved_oxygen = OXYGEN_WALK.advance(point.dissolved_oxygen, &mut rng);

                assert!((4.0..=9.0).contains(&point.ph));
                assert!((100.0..=800.0).contains(&point.total_suspended_solids));
                assert!((2.0..=8.0).contains(&point.dissolved_oxygen));
            }
        }
    }
}
