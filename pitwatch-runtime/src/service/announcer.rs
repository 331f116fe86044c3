use super::{Service, ServiceContext};
use crate::core::Status;
use crate::runtime::{NullConfig, SiteState};

/// Periodic site-wide status announcement.
///
/// Summarizes the severity of every simulated unit in a single log line,
/// which doubles as a liveness signal when the daemon runs unattended.
pub struct Announcer;

impl Announcer {
    fn tally(statuses: impl Iterator<Item = Status>) -> (usize, usize, usize) {
        statuses.fold((0, 0, 0), |(normal, warning, danger), status| match status {
            Status::Normal => (normal + 1, warning, danger),
            Status::Warning => (normal, warning + 1, danger),
            Status::Danger => (normal, warning, danger + 1),
        })
    }
}

impl Service<NullConfig> for Announcer {
    fn new(_config: NullConfig) -> Self
    where
        Self: Sized,
    {
        Self
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("announcer")
    }

    fn tick(&mut self, state: &mut SiteState) {
        let statuses = state
            .trucks
            .iter()
            .map(|truck| truck.status())
            .chain(state.rooms.iter().map(|room| room.status()))
            .chain(state.pond.iter().map(|point| point.status()));

        let (normal, warning, danger) = Self::tally(statuses);

        if danger > 0 {
            log::warn!(
                "Site status: {} normal; {} warning; {} danger",
                normal,
                warning,
                danger
            );
        } else {
            log::info!(
                "Site status: {} normal; {} warning; {} danger",
                normal,
                warning,
                danger
            );
        }
    }
}
