mod fleet;
mod session;
mod views;
mod web;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use std::time::Duration;

use crate::fleet::{Entropy, TrackedUnit};
use crate::views::{FleetView, Mounted, SingleUnitView, TerminalScreen};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "bus-o-mat")]
#[command(about = "School bus tracking demo with a simulated live feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the login, parent and admin screens
    Serve {
        #[arg(long)]
        config: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(long)]
        config: String,
    },
    /// Follow the simulated feed in the terminal
    Watch {
        #[arg(long, value_enum, default_value_t = ViewKind::Admin)]
        view: ViewKind,
        #[arg(long)]
        config: Option<String>,
        /// Tick interval, e.g. `3s`; defaults to the view's own cadence
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
        /// Stop after this many ticks instead of waiting for Ctrl-C
        #[arg(long)]
        ticks: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewKind {
    Admin,
    Parent,
}

impl ViewKind {
    fn default_interval(self) -> Duration {
        match self {
            ViewKind::Admin => Duration::from_secs(4),
            ViewKind::Parent => Duration::from_secs(3),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Validate { config } => validate(&config),
        Commands::Watch {
            view,
            config,
            interval,
            ticks,
            seed,
        } => watch(view, config.as_deref(), interval, ticks, seed).await,
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let config = match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &str) -> ExitCode {
    match Config::from_file(path) {
        Ok(config) => {
            println!(
                "Config is valid ({} buses, tick every {})",
                config.fleet.len(),
                humantime::format_duration(config.simulation.interval)
            );
            for seed in &config.fleet {
                println!(
                    "  Bus #{}: {} @ {:.4}, {:.4} ({}, {})",
                    seed.id,
                    seed.driver,
                    seed.position.lat,
                    seed.position.lng,
                    seed.status,
                    seed.route
                );
            }
            println!("  Parent screen follows bus #{}", config.parent.unit_id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn watch(
    kind: ViewKind,
    path: Option<&str>,
    interval: Option<Duration>,
    ticks: Option<u32>,
    seed: Option<u64>,
) -> ExitCode {
    let config = match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let interval = interval.unwrap_or(kind.default_interval());
    let random = Entropy::from_seed(seed.or(config.simulation.seed));
    let now = Utc::now();
    let units: Vec<TrackedUnit> = config
        .fleet
        .iter()
        .cloned()
        .map(|s| s.into_unit(now))
        .collect();

    let out = std::io::stdout();
    let mounted: Result<Mounted, _> = match kind {
        ViewKind::Admin => {
            let screen = TerminalScreen::fleet(FleetView::default(), out);
            views::mount(screen, units, interval, random)
        }
        ViewKind::Parent => {
            let view = SingleUnitView::new("School Bus Tracker", config.parent.clone());
            views::mount(TerminalScreen::single_unit(view, out), units, interval, random)
        }
    };
    let mounted = match mounted {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Simulator error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match ticks {
        Some(n) => {
            // Land halfway between the last wanted tick and the next one.
            tokio::time::sleep(interval * n + interval / 2).await;
        }
        None => {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
            }
        }
    }

    if !mounted.is_running() {
        log::warn!("Simulator ended before the screen was unmounted");
    }
    mounted.unmount().await;
    ExitCode::SUCCESS
}
