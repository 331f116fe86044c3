use std::sync::Arc;

use crate::core::SiteProfile;
use crate::runtime::{Runtime, SiteState};

/// Runtime builder.
///
/// The builder creates and configures the runtime core. It presents the
/// caller with a simple method to wire optional runtime behavior before
/// services are scheduled.
pub struct Builder {
    runtime: Runtime,
}

impl Builder {
    /// Construct a runtime for the given site.
    pub fn new(profile: SiteProfile) -> Self {
        let state = SiteState {
            profile,
            ..Default::default()
        };

        Self {
            runtime: Runtime {
                state: Arc::new(tokio::sync::RwLock::new(state)),
                shutdown: tokio::sync::broadcast::channel(1),
            },
        }
    }

    /// Wire the termination signal to the runtime shutdown bus.
    pub fn with_shutdown(self) -> Self {
        log::debug!("Enable shutdown signal");

        let sender = self.runtime.shutdown.0.clone();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Termination requested");

                sender.send(()).ok();
            }
        });

        self
    }

    /// Consume the builder and return the runtime.
    pub fn build(self) -> Runtime {
        self.runtime
    }
}
