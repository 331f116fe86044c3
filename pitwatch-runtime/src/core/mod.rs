pub use self::pond::SamplePoint;
pub use self::position::{Position, RoutePoint};
pub use self::room::{ClimateTrend, Room, TrendSample};
pub use self::site::SiteProfile;
pub use self::status::Status;
pub use self::traffic::{FlowSample, GateEvent, GateEventKind, GateEventOutcome, Traffic};
pub use self::truck::{
    Drowsiness, DrowsinessState, Fuel, Sos, Tilt, TirePressure, Truck, TruckAlarms, WorkShift,
};

mod pond;
mod position;
mod room;
mod site;
mod status;
mod traffic;
pub mod truck;
