//! Print the fleet of a running SkyTour server.

use anyhow::Context;
use clap::Parser;
use skytour_cli::report;
use skytour_core::FleetSnapshot;

/// Show drone positions and recent alerts from a SkyTour server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// SkyTour Server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let url = format!("{}/v1/fleet", args.url.trim_end_matches('/'));

    let snapshot: FleetSnapshot = reqwest::blocking::get(&url)
        .with_context(|| format!("connecting to {url}"))?
        .error_for_status()?
        .json()
        .context("decoding fleet snapshot")?;

    println!("{}", report::fleet_table(&snapshot));

    if !snapshot.recent_alerts.is_empty() {
        println!("\nRecent alerts:");
        for alert in &snapshot.recent_alerts {
            println!(
                "  #{} {} {}",
                alert.sequence,
                alert.raised_at.format("%Y-%m-%d %H:%M:%S"),
                alert.message
            );
        }
    }

    Ok(())
}
