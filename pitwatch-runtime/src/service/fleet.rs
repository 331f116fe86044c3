use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{Service, ServiceContext};
use crate::config::FleetConfig;
use crate::core::truck::EYE_CLOSURE_CRITICAL_PERCENT;
use crate::core::{Drowsiness, DrowsinessState, Fuel, Position, Sos, Tilt, TirePressure, Truck, WorkShift};
use crate::math::Bounds;
use crate::runtime::SiteState;
use crate::sim::{generate_route, RandomWalk, RouteHistory};

const SPEED_WALK: RandomWalk = RandomWalk::from_parts(0.0, 60.0, 2.5);
const PITCH_WALK: RandomWalk = RandomWalk::from_parts(-30.0, 30.0, 1.0);
const ROLL_WALK: RandomWalk = RandomWalk::from_parts(-30.0, 30.0, 1.0);
const TIRE_WALK: RandomWalk = RandomWalk::from_parts(60.0, 120.0, 1.0);
const LATITUDE_WALK: RandomWalk = RandomWalk::from_parts(-90.0, 90.0, 0.00025);
const LONGITUDE_WALK: RandomWalk = RandomWalk::from_parts(-180.0, 180.0, 0.00025);

const FUEL_BOUNDS: Bounds = Bounds::spanning(0.0, 100.0);
const EYE_CLOSURE_BOUNDS: Bounds = Bounds::spanning(10.0, 90.0);
const YAWN_CAP: u8 = 10;

/// Haul truck telemetry simulator.
///
/// Owns the per-tick mutation of the truck fleet: GPS drift with route
/// recording, speed, tilt, fuel burn, tire pressures and the drowsiness
/// camera readings. Alarms and status are derived from the mutated metrics
/// by the truck itself.
pub struct FleetSimulator {
    rng: rand::rngs::OsRng,
    interval: Duration,
    randomize_start: bool,
}

impl Service<FleetConfig> for FleetSimulator {
    fn new(config: FleetConfig) -> Self
    where
        Self: Sized,
    {
        log::debug!("Starting fleet simulator");

        Self {
            rng: rand::rngs::OsRng,
            interval: Duration::from_millis(config.interval),
            randomize_start: config.randomize_start,
        }
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("fleet simulator")
    }

    fn tick(&mut self, state: &mut SiteState) {
        if state.trucks.is_empty() {
            state.trucks = seed_fleet(&mut self.rng, self.randomize_start);
            log::info!("Simulating {} haul trucks", state.trucks.len());
        }

        let now = Utc::now();
        for truck in &mut state.trucks {
            let before = truck.status();
            advance(truck, self.interval, now, &mut self.rng);
            let after = truck.status();

            if after > before {
                log::warn!("{} escalated to {}", truck.id, after);
            } else if after < before {
                log::info!("{} recovered to {}", truck.id, after);
            }
        }
    }
}

/// Advance a single truck by one tick.
fn advance(truck: &mut Truck, interval: Duration, now: DateTime<Utc>, rng: &mut impl Rng) {
    truck.speed = SPEED_WALK.advance(truck.speed, rng);

    truck.position.latitude = LATITUDE_WALK.advance(truck.position.latitude, rng);
    truck.position.longitude = LONGITUDE_WALK.advance(truck.position.longitude, rng);
    truck.route.record(truck.position, now);

    truck.tilt.pitch = PITCH_WALK.advance(truck.tilt.pitch, rng);
    truck.tilt.roll = ROLL_WALK.advance(truck.tilt.roll, rng);

    // Fuel burn integrated over the tick interval, in percent of capacity.
    let hours = interval.as_secs_f64() / 3_600.0;
    let burned = truck.fuel.consumption * hours / truck.fuel.capacity * 100.0;
    truck.fuel.level = FUEL_BOUNDS.clamp(truck.fuel.level - burned);

    truck.tires.front_left = TIRE_WALK.advance(truck.tires.front_left, rng);
    truck.tires.front_right = TIRE_WALK.advance(truck.tires.front_right, rng);
    truck.tires.rear_left = TIRE_WALK.advance(truck.tires.rear_left, rng);
    truck.tires.rear_right = TIRE_WALK.advance(truck.tires.rear_right, rng);

    // Eye closure drifts upward as the shift wears on.
    truck.drowsiness.eye_closure_rate =
        EYE_CLOSURE_BOUNDS.clamp(truck.drowsiness.eye_closure_rate + rng.gen_range(-2.0..=3.0));

    if truck.drowsiness.eye_closure_rate > EYE_CLOSURE_CRITICAL_PERCENT {
        if rng.gen_bool(0.2) {
            truck.drowsiness.yawn_count = (truck.drowsiness.yawn_count + 1).min(YAWN_CAP);
        }
    } else if rng.gen_bool(0.1) {
        truck.drowsiness.yawn_count = truck.drowsiness.yawn_count.saturating_sub(1);
    }

    if truck.drowsiness.state() == DrowsinessState::Critical {
        truck.drowsiness.last_alert = Some(now);
    }

    truck.shift.duration = (now - truck.shift.started_at).num_seconds() as f64 / 60.0;
    truck.last_update = now;
}

fn seed_route(rng: &mut impl Rng, start: Position, current: Position) -> RouteHistory {
    let route = generate_route(
        start,
        current,
        crate::consts::ROUTE_POINT_COUNT,
        chrono::Duration::hours(crate::consts::ROUTE_SPAN_HOURS),
        rng,
    )
    .expect("seed coordinates are valid and the route constants are positive");

    RouteHistory::from_route(route, crate::consts::ROUTE_HISTORY_CAPACITY)
        .expect("route history capacity constant is non-zero")
}

fn seed_fleet(rng: &mut impl Rng, randomize_start: bool) -> Vec<Truck> {
    let now = Utc::now();

    let mut fleet = vec![
        Truck {
            id: "TRK-001".to_owned(),
            name: "Dump Truck HD785-7".to_owned(),
            driver: "Budi Santoso".to_owned(),
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
                front_left: 105.0,
                front_right: 108.0,
                rear_left: 110.0,
                rear_right: 107.0,
                optimal: 110.0,
            },
            drowsiness: Drowsiness {
                eye_closure_rate: 15.0,
                yawn_count: 0,
                last_alert: None,
            },
            shift: WorkShift {
                started_at: now - chrono::Duration::minutes(270),
                duration: 270.0,
                max_duration: 480.0,
            },
            route: seed_route(
                rng,
                Position {
                    latitude: -3.852,
                    longitude: 103.918,
                },
                Position {
                    latitude: -3.8289,
                    longitude: 103.9349,
                },
            ),
            last_update: now,
        },
        Truck {
            id: "TRK-002".to_owned(),
            name: "Dump Truck CAT797F".to_owned(),
            driver: "Ahmad Hidayat".to_owned(),
            position: Position {
                latitude: -3.8312,
                longitude: 103.9278,
            },
            speed: 52.0,
            heading: 230.0,
            tilt: Tilt {
                pitch: 12.0,
                roll: 5.0,
            },
            sos: Sos::default(),
            fuel: Fuel {
                level: 28.0,
                capacity: 500.0,
                consumption: 30.0,
            },
            tires: TirePressure {
                front_left: 95.0,
                front_right: 98.0,
                rear_left: 92.0,
                rear_right: 90.0,
                optimal: 110.0,
            },
            drowsiness: Drowsiness {
                eye_closure_rate: 45.0,
                yawn_count: 3,
                last_alert: Some(now - chrono::Duration::minutes(3)),
            },
            shift: WorkShift {
                started_at: now - chrono::Duration::minutes(360),
                duration: 360.0,
                max_duration: 480.0,
            },
            route: seed_route(
                rng,
                Position {
                    latitude: -3.848,
                    longitude: 103.94,
                },
                Position {
                    latitude: -3.8312,
                    longitude: 103.9278,
                },
            ),
            last_update: now,
        },
        Truck {
            id: "TRK-003".to_owned(),
            name: "Dump Truck Komatsu HD605".to_owned(),
            driver: "Joko Widodo".to_owned(),
            position: Position {
                latitude: -3.8334,
                longitude: 103.9401,
            },
            speed: 28.0,
            heading: 90.0,
            tilt: Tilt {
                pitch: 22.0,
                roll: 18.0,
            },
            sos: Sos {
                active: true,
                since: Some(now - chrono::Duration::minutes(2)),
            },
            fuel: Fuel {
                level: 15.0,
                capacity: 420.0,
                consumption: 28.0,
            },
            tires: TirePressure {
                front_left: 110.0,
                front_right: 108.0,
                rear_left: 65.0,
                rear_right: 112.0,
                optimal: 110.0,
            },
            drowsiness: Drowsiness {
                eye_closure_rate: 75.0,
                yawn_count: 8,
                last_alert: Some(now - chrono::Duration::seconds(30)),
            },
            shift: WorkShift {
                started_at: now - chrono::Duration::minutes(180),
                duration: 180.0,
                max_duration: 480.0,
            },
            route: seed_route(
                rng,
                Position {
                    latitude: -3.85,
                    longitude: 103.928,
                },
                Position {
                    latitude: -3.8334,
                    longitude: 103.9401,
                },
            ),
            last_update: now,
        },
        Truck {
            id: "TRK-004".to_owned(),
            name: "Dump Truck Volvo A60H".to_owned(),
            driver: "Siti Nurhaliza".to_owned(),
            position: Position {
                latitude: -3.8298,
                longitude: 103.9365,
            },
            speed: 42.0,
            heading: 315.0,
            tilt: Tilt {
                pitch: 6.0,
                roll: 2.0,
            },
            sos: Sos::default(),
            fuel: Fuel {
                level: 45.0,
                capacity: 480.0,
                consumption: 27.0,
            },
            tires: TirePressure {
                front_left: 109.0,
                front_right: 111.0,
                rear_left: 108.0,
                rear_right: 110.0,
                optimal: 110.0,
            },
            drowsiness: Drowsiness {
                eye_closure_rate: 20.0,
                yawn_count: 1,
                last_alert: None,
            },
            shift: WorkShift {
                started_at: now - chrono::Duration::minutes(510),
                duration: 510.0,
                max_duration: 480.0,
            },
            route: seed_route(
                rng,
                Position {
                    latitude: -3.853,
                    longitude: 103.924,
                },
                Position {
                    latitude: -3.8298,
                    longitude: 103.9365,
                },
            ),
            last_update: now,
        },
    ];

    if randomize_start {
        for truck in &mut fleet {
            randomize(truck, rng);
        }
    }

    fleet
}

/// Scatter the scalar metrics uniformly within their bounds.
fn randomize(truck: &mut Truck, rng: &mut impl Rng) {
    truck.speed = rng.gen_range(0.0..=60.0);
    truck.heading = rng.gen_range(0.0..360.0);
    truck.tilt.pitch = rng.gen_range(-15.0..=15.0);
    truck.tilt.roll = rng.gen_range(-15.0..=15.0);
    truck.fuel.level = rng.gen_range(10.0..=100.0);
    truck.tires.front_left = rng.gen_range(90.0..=115.0);
    truck.tires.front_right = rng.gen_range(90.0..=115.0);
    truck.tires.rear_left = rng.gen_range(90.0..=115.0);
    truck.tires.rear_right = rng.gen_range(90.0..=115.0);
    truck.drowsiness.eye_closure_rate = rng.gen_range(10.0..=50.0);
    truck.drowsiness.yawn_count = rng.gen_range(0u8..=3);
}
