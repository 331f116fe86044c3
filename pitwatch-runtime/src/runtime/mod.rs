use std::sync::Arc;
use std::time::Duration;

use crate::core::{ClimateTrend, Room, SamplePoint, SiteProfile, Traffic, Truck};
use crate::service::Service;

mod error;

pub use self::error::Error;

pub type Result<T = ()> = std::result::Result<T, error::Error>;

pub mod builder;

pub use self::builder::Builder;

/// Construct a runtime builder for the given site.
pub fn builder(profile: SiteProfile) -> Builder {
    Builder::new(profile)
}

/// Configuration for services that take none.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullConfig;

/// Complete state of the simulated site.
///
/// Services mutate their own section under the runtime write lock; readers
/// take a snapshot. Status and alarms are never stored here, they are
/// derived from the metrics on demand.
#[derive(Clone, Debug, Default)]
pub struct SiteState {
    /// Site identity.
    pub profile: SiteProfile,
    /// Haul truck fleet.
    pub trucks: Vec<Truck>,
    /// Monitored office rooms.
    pub rooms: Vec<Room>,
    /// Fleet-average climate history.
    pub climate_trend: ClimateTrend,
    /// Settling pond sample points.
    pub pond: Vec<SamplePoint>,
    /// Vehicle volume counters.
    pub traffic: Traffic,
}

pub type SharedSiteState = Arc<tokio::sync::RwLock<SiteState>>;

pub struct Runtime {
    /// Shared site state.
    state: SharedSiteState,
    /// Runtime event bus.
    shutdown: (
        tokio::sync::broadcast::Sender<()>,
        tokio::sync::broadcast::Receiver<()>,
    ),
}

impl Runtime {
    /// Shared handle to the site state.
    pub fn state(&self) -> SharedSiteState {
        Arc::clone(&self.state)
    }

    /// Clone of the current site state.
    pub async fn snapshot(&self) -> SiteState {
        self.state.read().await.clone()
    }

    /// Listen for shutdown signal.
    pub fn shutdown_signal(&self) -> tokio::sync::broadcast::Receiver<()> {
        self.shutdown.0.subscribe()
    }

    /// Schedule a service on a fixed tick interval.
    ///
    /// Each tick runs to completion under the state write lock, so ticks
    /// are serialized across all scheduled services. The task terminates
    /// when the shutdown signal is received.
    pub fn schedule_service<S, C>(&self, config: C, interval: Duration)
    where
        S: Service<C> + Send + 'static,
        C: Send + 'static,
    {
        let state = self.state();
        let mut shutdown = self.shutdown_signal();

        tokio::spawn(async move {
            let mut service = S::new(config);

            log::debug!(
                "Scheduled service '{}' every {}ms",
                service.ctx(),
                interval.as_millis()
            );

            let mut tick = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let mut state = state.write().await;
                        service.tick(&mut state);
                    }
                    _ = shutdown.recv() => {
                        log::debug!("Shutting down service '{}'", service.ctx());
                        break;
                    }
                }
            }
        });
    }

    /// Wait for the runtime to shutdown.
    ///
    /// This method will block until the runtime is shutdown.
    pub async fn wait_for_shutdown(&mut self) {
        self.shutdown.1.recv().await.ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceContext;

    struct Counter;

    impl Service<NullConfig> for Counter {
        fn new(_config: NullConfig) -> Self {
            Self
        }

        fn ctx(&self) -> ServiceContext {
            ServiceContext::new("counter")
        }

        fn tick(&mut self, state: &mut SiteState) {
            state.traffic.fleet_size += 1;
        }
    }

    #[tokio::test]
    async fn test_scheduled_service_ticks_and_stops() {
        let runtime = builder(SiteProfile::default()).build();

        runtime.schedule_service::<Counter, _>(NullConfig, Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(40)).await;

        let before = runtime.snapshot().await.traffic.fleet_size;
        assert!(before > Traffic::default().fleet_size);

        runtime.shutdown.0.send(()).ok();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let after = runtime.snapshot().await.traffic.fleet_size;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(runtime.snapshot().await.traffic.fleet_size, after);
    }
}
