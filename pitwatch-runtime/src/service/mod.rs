pub use self::announcer::Announcer;
pub use self::climate::ClimateSimulator;
pub use self::fleet::FleetSimulator;
pub use self::pond::PondSimulator;
pub use self::recorder::Recorder;
pub use self::traffic::TrafficSimulator;

mod announcer;
mod climate;
mod fleet;
mod pond;
mod recorder;
mod traffic;

use crate::runtime::SiteState;

/// Service identification for logging purposes.
pub struct ServiceContext {
    /// Service name.
    name: &'static str,
    /// Service address, if applicable.
    address: Option<String>,
}

impl ServiceContext {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            address: None,
        }
    }

    pub fn with_address(name: &'static str, address: impl ToString) -> Self {
        Self {
            name,
            address: Some(address.to_string()),
        }
    }
}

impl std::fmt::Display for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(address) = &self.address {
            write!(f, " on {}", address)?;
        }

        Ok(())
    }
}

/// Periodic simulation service.
///
/// Services are scheduled on the runtime with a fixed tick interval. A tick
/// runs to completion under the state write lock before the next fires, so
/// every unit a service owns is updated exactly once per tick.
pub trait Service<Cnf> {
    /// Construct the service.
    ///
    /// This method is called once on startup.
    fn new(config: Cnf) -> Self
    where
        Self: Sized;

    /// Service context for logging.
    fn ctx(&self) -> ServiceContext;

    /// Advance the service by one tick.
    fn tick(&mut self, state: &mut SiteState);
}
