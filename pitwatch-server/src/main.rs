// Copyright (C) 2024 PT Lorem Ipsum
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::Parser;

use pitwatch::service;

mod config;

/// Shortest tick interval a service may be configured with, in milliseconds.
const MIN_TICK_INTERVAL: u64 = 100;
/// Recording indicator blink interval, in milliseconds.
const RECORDER_INTERVAL: u64 = 1_000;
/// Status announcement interval, in milliseconds.
const ANNOUNCER_INTERVAL: u64 = 30_000;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 PT Lorem Ipsum")]
#[command(version, propagate_version = true)]
#[command(about = "Pitwatch site telemetry daemon", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(
        short = 'c',
        long = "config",
        alias = "conf",
        default_value = pitwatch::consts::DEFAULT_CONFIG_PATH,
        value_name = "FILE"
    )]
    config: std::path::PathBuf,
    /// Randomize the start values of every simulated metric.
    #[arg(long, default_value_t = false)]
    randomize_start: bool,
    /// Quiet output (no logging).
    #[arg(long)]
    quiet: bool,
    /// Daemonize the service.
    #[arg(short = 'D', long)]
    daemon: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    if args.daemon {
        log_config.set_time_level(LevelFilter::Off);
        log_config.set_thread_level(LevelFilter::Off);
    } else {
        log_config.set_time_offset_to_local().ok();
        log_config.set_time_format_rfc2822();
    }

    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);
    log_config.add_filter_ignore_str("mio");

    let log_level = if args.daemon {
        LevelFilter::Info
    } else if args.quiet {
        LevelFilter::Off
    } else {
        match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let color_choice = if args.daemon {
        simplelog::ColorChoice::Never
    } else {
        simplelog::ColorChoice::Auto
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        color_choice,
    )?;

    if args.daemon {
        log::debug!("Running service as daemon");
    }

    let mut config = if args.config.exists() {
        pitwatch::config::from_file(&args.config)?
    } else {
        log::warn!(
            "Configuration file '{}' not found, using defaults",
            args.config.display()
        );

        config::Config::default()
    };

    if args.randomize_start {
        config.fleet.randomize_start = true;
        config.climate.randomize_start = true;
        config.pond.randomize_start = true;
    }

    log::trace!("{:#?}", config);

    daemonize(config).await
}

async fn daemonize(config: config::Config) -> anyhow::Result<()> {
    use std::time::Duration;

    log::info!("Starting pitwatch daemon {}", pitwatch::consts::VERSION);
    log::info!("{}", config.site);

    let mut runtime = pitwatch::runtime::builder(config.site.clone())
        .with_shutdown()
        .build();

    let interval = |millis: u64| Duration::from_millis(millis.max(MIN_TICK_INTERVAL));

    runtime.schedule_service::<service::FleetSimulator, _>(
        config.fleet.clone(),
        interval(config.fleet.interval),
    );
    runtime.schedule_service::<service::ClimateSimulator, _>(
        config.climate.clone(),
        interval(config.climate.interval),
    );
    runtime.schedule_service::<service::PondSimulator, _>(
        config.pond.clone(),
        interval(config.pond.interval),
    );
    runtime.schedule_service::<service::TrafficSimulator, _>(
        config.traffic.clone(),
        interval(config.traffic.interval),
    );
    runtime.schedule_service::<service::Recorder, _>(
        pitwatch::runtime::NullConfig,
        Duration::from_millis(RECORDER_INTERVAL),
    );
    runtime.schedule_service::<service::Announcer, _>(
        pitwatch::runtime::NullConfig,
        Duration::from_millis(ANNOUNCER_INTERVAL),
    );

    runtime.wait_for_shutdown().await;

    log::info!("Daemon stopped");

    Ok(())
}
