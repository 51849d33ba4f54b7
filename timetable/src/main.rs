use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

use timetable::arrival::format_wait_time;
use timetable::domain::{TokenPolicy, format_days};
use timetable::registry::{
    DEFAULT_PATH, PATH_ENV, Registry, RegistryConfig, RegistryError, STRICT_DAYS_ENV,
    STRICT_KINDS_ENV,
};
use timetable::stats::{RouteStats, StopStats};

#[derive(Debug, Parser)]
#[command(name = "timetable", about = "Query a municipal transit timetable.")]
struct Opt {
    /// Timetable file.
    #[arg(short = 'f', long = "file", env = PATH_ENV, default_value = DEFAULT_PATH)]
    file: PathBuf,

    /// What to do with unknown day names when loading: lenient or reject.
    #[arg(long, env = STRICT_DAYS_ENV, default_value = "lenient")]
    unknown_days: TokenPolicy,

    /// What to do with unknown transport kinds when loading: lenient or reject.
    #[arg(long, env = STRICT_KINDS_ENV, default_value = "lenient")]
    unknown_kinds: TokenPolicy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every stop.
    Stops,
    /// List every scheduled route.
    Routes,
    /// Upcoming arrivals at a stop.
    Next {
        /// Stop name, any case.
        stop: String,
    },
    /// Route and stop statistics as JSON.
    Stats,
}

/// Errors the command line reports.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Statistics {
    routes: RouteStats,
    stops: StopStats,
    daily_schedules: Vec<DailyCount>,
}

#[derive(Serialize)]
struct DailyCount {
    day: &'static str,
    schedules: usize,
}

fn init_logger() {
    let default_level = LevelFilter::WARN;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|e| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            e,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn run(opt: Opt) -> Result<(), CliError> {
    let config = RegistryConfig::new(opt.file)
        .with_unknown_days(opt.unknown_days)
        .with_unknown_kinds(opt.unknown_kinds);
    info!(path = ?config.path(), "Opening timetable");
    let registry = Registry::open(config)?;

    match opt.command {
        Command::Stops => print_stops(&registry),
        Command::Routes => print_routes(&registry),
        Command::Next { stop } => print_next(&registry, &stop),
        Command::Stats => print_stats(&registry)?,
    }
    Ok(())
}

fn print_stops(registry: &Registry) {
    for stop in registry.all_stops() {
        if stop.coordinate().is_empty() {
            println!("{}", stop.name());
        } else {
            println!("{} ({})", stop.name(), stop.coordinate());
        }
    }
}

fn print_routes(registry: &Registry) {
    for schedule in registry.all_schedules() {
        let route = schedule.route();
        let names: Vec<&str> = route.stops().iter().map(|s| s.name.as_str()).collect();
        println!(
            "{} at {} [{}]: {}",
            route.vehicle().full_name(),
            schedule.start_time(),
            format_days(route.days()),
            names.join(" -> ")
        );
    }
}

fn print_next(registry: &Registry, stop: &str) {
    let now = registry.current_time();
    let today = registry.current_day_of_week();
    let departures = registry.find_next_transport(stop, now, today);
    if departures.is_empty() {
        println!("No arrivals at {stop} today ({today}, {now})");
        return;
    }
    for departure in departures {
        println!(
            "{:>6}  {}  in {}",
            departure.schedule.route().vehicle().short_name(),
            departure.arrival,
            format_wait_time(departure.wait_minutes)
        );
    }
}

fn print_stats(registry: &Registry) -> Result<(), CliError> {
    let statistics = Statistics {
        routes: registry.route_statistics(),
        stops: registry.stop_statistics(),
        daily_schedules: registry
            .daily_schedule_count()
            .into_iter()
            .map(|(day, schedules)| DailyCount {
                day: day.as_str(),
                schedules,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}

fn main() -> ExitCode {
    init_logger();
    match run(Opt::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
