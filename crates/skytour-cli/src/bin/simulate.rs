//! Run the built-in drone fleet headlessly.
//!
//! By default ticks are applied back to back (virtual clock). With
//! `--realtime` each tick waits for the interval like the server does.

use anyhow::Context;
use clap::Parser;
use skytour_cli::{build_simulator, report};
use skytour_core::{DEFAULT_NO_FLY_RADIUS_M, DEFAULT_RECENT_ALERTS};
use std::time::Duration;
use tokio::time;

/// Simulate the drone tour fleet against the no-fly zone
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of ticks to run
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Wait `--interval-ms` between ticks
    #[arg(long)]
    realtime: bool,

    /// Tick period in realtime mode
    #[arg(long, default_value_t = 2000)]
    interval_ms: u64,

    /// No-fly zone radius in meters
    #[arg(long, default_value_t = DEFAULT_NO_FLY_RADIUS_M)]
    no_fly_radius: f64,

    /// Only simulate these drones (repeatable)
    #[arg(long = "drone")]
    drones: Vec<String>,

    /// Alerts kept in each printed snapshot
    #[arg(long, default_value_t = DEFAULT_RECENT_ALERTS)]
    recent_alerts: usize,

    /// Print one JSON snapshot per tick instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut sim = build_simulator(args.no_fly_radius, &args.drones)?;

    if !args.json {
        println!(
            "Simulating {} drone(s) for {} tick(s), no-fly radius {}m\n",
            sim.state().drones.len(),
            args.ticks,
            args.no_fly_radius
        );
    }

    let mut interval = time::interval(Duration::from_millis(args.interval_ms.max(1)));
    // First interval tick completes immediately.
    interval.tick().await;

    for _ in 0..args.ticks {
        if args.realtime {
            interval.tick().await;
        }

        let tick = sim.tick();
        if args.json {
            let snapshot = sim.snapshot(args.recent_alerts);
            println!(
                "{}",
                serde_json::to_string(&snapshot).context("serializing snapshot")?
            );
        } else {
            for line in report::tick_lines(&tick) {
                println!("{line}");
            }
        }
    }

    if !args.json {
        println!("\n{}", report::fleet_table(&sim.snapshot(args.recent_alerts)));
    }

    Ok(())
}
