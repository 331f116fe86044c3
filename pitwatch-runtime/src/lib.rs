// Copyright (C) 2024 PT Lorem Ipsum
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! The `pitwatch` library provides the simulation runtime for the mine site
//! telemetry daemon.
//!
//! The runtime owns the shared [`SiteState`](runtime::SiteState) and drives a
//! set of periodic services against it: the haul truck fleet, the office
//! climate, the settling pond water quality and the gate traffic counters.
//! Every service mutates its metrics with bounded random walks so the
//! telemetry stays plausible over any runtime length, while alarms and
//! status are derived from the metrics on demand and never stored.

pub mod classify;
pub mod config;
pub mod core;
pub mod math;
pub mod service;
pub mod sim;

pub use rand;

pub mod runtime;
pub use self::runtime::Error;
pub use self::runtime::Runtime;

/// Pitwatch runtime module containing various constants.
pub mod consts {
    /// Pitwatch runtime version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Default configuration path.
    pub const DEFAULT_CONFIG_PATH: &str = "/etc/pitwatch.conf";
    /// Number of points in a generated route.
    pub const ROUTE_POINT_COUNT: usize = 20;
    /// Time span covered by a generated route, in hours.
    pub const ROUTE_SPAN_HOURS: i64 = 8;
    /// Maximum number of retained route points per truck.
    pub const ROUTE_HISTORY_CAPACITY: usize = 30;
    /// Maximum number of retained climate trend samples.
    pub const TREND_HISTORY_CAPACITY: usize = 10;
    /// Maximum number of retained truck flow samples.
    pub const FLOW_HISTORY_CAPACITY: usize = 8;
    /// Maximum number of retained gate events.
    pub const EVENT_LOG_CAPACITY: usize = 10;
}
