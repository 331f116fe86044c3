use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Direction of a gate passage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateEventKind {
    Entry,
    Exit,
}

impl std::fmt::Display for GateEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateEventKind::Entry => write!(f, "Entry"),
            GateEventKind::Exit => write!(f, "Exit"),
        }
    }
}

/// Outcome recorded by the gate camera.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateEventOutcome {
    Normal,
    PassingSpeedLimit,
}

impl std::fmt::Display for GateEventOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateEventOutcome::Normal => write!(f, "Normal"),
            GateEventOutcome::PassingSpeedLimit => write!(f, "Passing Speed Limit"),
        }
    }
}

/// Single vehicle passage at the site gate.
#[derive(Clone, Debug)]
pub struct GateEvent {
    pub timestamp: DateTime<Utc>,
    pub vehicle: String,
    pub kind: GateEventKind,
    pub outcome: GateEventOutcome,
}

/// Truck flow count for one traffic interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowSample {
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

/// Fleet-wide vehicle volume counters.
#[derive(Clone, Debug)]
pub struct Traffic {
    /// Number of active vehicles on site.
    pub fleet_size: u32,
    /// Haul road traffic density in percent.
    pub density: f64,
    /// Open safety alerts.
    pub safety_alerts: u32,
    /// CCTV system uptime in percent.
    pub uptime: f64,
    /// Camera recording indicator, toggled on its own timer.
    pub recording: bool,
    /// Recent truck flow counts, newest last.
    flow: VecDeque<FlowSample>,
    /// Recent gate events, newest first.
    events: VecDeque<GateEvent>,
    pub last_update: DateTime<Utc>,
}

impl Traffic {
    pub fn new(fleet_size: u32, density: f64, safety_alerts: u32, uptime: f64) -> Self {
        Self {
            fleet_size,
            density,
            safety_alerts,
            uptime,
            recording: true,
            flow: VecDeque::with_capacity(crate::consts::FLOW_HISTORY_CAPACITY),
            events: VecDeque::with_capacity(crate::consts::EVENT_LOG_CAPACITY),
            last_update: Utc::now(),
        }
    }

    /// Append a flow sample, evicting the oldest at capacity.
    pub fn push_flow(&mut self, sample: FlowSample) {
        if self.flow.len() == crate::consts::FLOW_HISTORY_CAPACITY {
            self.flow.pop_front();
        }
        self.flow.push_back(sample);
    }

    /// Prepend a gate event, dropping the oldest at capacity.
    pub fn push_event(&mut self, event: GateEvent) {
        if self.events.len() == crate::consts::EVENT_LOG_CAPACITY {
            self.events.pop_back();
        }
        self.events.push_front(event);
    }

    pub fn flow(&self) -> impl Iterator<Item = &FlowSample> {
        self.flow.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &GateEvent> {
        self.events.iter()
    }
}

impl Default for Traffic {
    fn default() -> Self {
        Self::new(42, 68.0, 3, 99.8)
    }
}
