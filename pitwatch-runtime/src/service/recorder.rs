use super::{Service, ServiceContext};
use crate::runtime::{NullConfig, SiteState};

/// Blinks the CCTV recording indicator.
///
/// Runs on its own timer, independent of the traffic tick, so the
/// indicator keeps blinking even when the volume counters idle.
pub struct Recorder;

impl Service<NullConfig> for Recorder {
    fn new(_config: NullConfig) -> Self
    where
        Self: Sized,
    {
        Self
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("recording indicator")
    }

    fn tick(&mut self, state: &mut SiteState) {
        state.traffic.recording = !state.traffic.recording;
    }
}
