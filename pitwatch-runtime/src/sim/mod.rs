pub use self::route::{
    generate_route, RouteHistory, DISPLACEMENT_THRESHOLD_DEGREES, ROUTE_JITTER_DEGREES,
};
pub use self::walk::RandomWalk;

mod route;
mod walk;
