use chrono::Utc;
use rand::Rng;

use super::{Service, ServiceContext};
use crate::config::ClimateConfig;
use crate::core::{Room, TrendSample};
use crate::runtime::SiteState;
use crate::sim::RandomWalk;

const TEMPERATURE_WALK: RandomWalk = RandomWalk::from_parts(18.0, 32.0, 0.5);
const HUMIDITY_WALK: RandomWalk = RandomWalk::from_parts(30.0, 80.0, 2.0);
const LIGHT_WALK: RandomWalk = RandomWalk::from_parts(200.0, 1_200.0, 50.0);
const DUST_WALK: RandomWalk = RandomWalk::from_parts(0.0, 50.0, 2.0);
const CO2_WALK: RandomWalk = RandomWalk::from_parts(400.0, 1_500.0, 30.0);

/// Office climate simulator.
///
/// Drifts the readings of every monitored room and keeps the fleet-average
/// trend history up to date.
pub struct ClimateSimulator {
    rng: rand::rngs::OsRng,
    randomize_start: bool,
}

impl Service<ClimateConfig> for ClimateSimulator {
    fn new(config: ClimateConfig) -> Self
    where
        Self: Sized,
    {
        log::debug!("Starting climate simulator");

        Self {
            rng: rand::rngs::OsRng,
            randomize_start: config.randomize_start,
        }
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("climate simulator")
    }

    fn tick(&mut self, state: &mut SiteState) {
        if state.rooms.is_empty() {
            state.rooms = seed_rooms(&mut self.rng, self.randomize_start);
            log::info!("Simulating {} office rooms", state.rooms.len());
        }

        let now = Utc::now();
        for room in &mut state.rooms {
            room.temperature = TEMPERATURE_WALK.advance(room.temperature, &mut self.rng);
            room.humidity = HUMIDITY_WALK.advance(room.humidity, &mut self.rng);
            room.light_intensity = LIGHT_WALK.advance(room.light_intensity, &mut self.rng);
            room.dust_pm25 = DUST_WALK.advance(room.dust_pm25, &mut self.rng);
            room.co2 = CO2_WALK.advance(room.co2, &mut self.rng);
            room.last_update = now;
        }

        let count = state.rooms.len() as f64;
        state.climate_trend.push(TrendSample {
            timestamp: now,
            temperature: state.rooms.iter().map(|room| room.temperature).sum::<f64>() / count,
            humidity: state.rooms.iter().map(|room| room.humidity).sum::<f64>() / count,
        });
    }
}

fn seed_rooms(rng: &mut impl Rng, randomize_start: bool) -> Vec<Room> {
    let now = Utc::now();

    let seeds = [
        ("1", "Ruang Kontrol Utama", 24.5, 55.0, 450.0, 18.0, 650.0),
        ("2", "Ruang Server", 21.0, 45.0, 380.0, 12.0, 580.0),
        ("3", "Ruang Rapat", 25.0, 58.0, 520.0, 20.0, 720.0),
        ("4", "Ruang Administrasi", 24.0, 52.0, 480.0, 16.0, 690.0),
    ];

    seeds
        .into_iter()
        .map(|(id, name, temperature, humidity, light, dust, co2)| {
            let mut room = Room {
                id: id.to_owned(),
                name: name.to_owned(),
                temperature,
                humidity,
                light_intensity: light,
                dust_pm25: dust,
                co2,
                last_update: now,
            };

            if randomize_start {
                room.temperature = rng.gen_range(20.0..=28.0);
                room.humidity = rng.gen_range(40.0..=70.0);
                room.light_intensity = rng.gen_range(300.0..=1_000.0);
                room.dust_pm25 = rng.gen_range(5.0..=35.0);
                room.co2 = rng.gen_range(450.0..=1_000.0);
            }

            room
        })
        .collect()
}
