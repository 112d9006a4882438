//! Plain-text rendering of ticks and fleet snapshots.

use skytour_core::{DroneState, FleetSnapshot, TickReport};

/// One drone as a fixed-width table row.
pub fn drone_row(drone: &DroneState) -> String {
    format!(
        "{:<8} {:<22} {:>9.4} {:>9.4} {:>3} {:<8} {}",
        drone.drone_id,
        drone.assignment.site.display_name(),
        drone.position.lat,
        drone.position.lon,
        drone.route_index,
        if drone.is_flying { "flying" } else { "grounded" },
        drone.status
    )
}

pub fn fleet_table(snapshot: &FleetSnapshot) -> String {
    let mut out = format!(
        "{:<8} {:<22} {:>9} {:>9} {:>3} {:<8} {}\n",
        "DRONE", "SITE", "LAT", "LON", "WP", "STATE", "STATUS"
    );
    for drone in &snapshot.drones {
        out.push_str(&drone_row(drone));
        out.push('\n');
    }
    out.push_str(&format!(
        "tick {} | active {} | grounded {} | alerts {}",
        snapshot.tick, snapshot.summary.active, snapshot.summary.grounded, snapshot.total_alerts
    ));
    out
}

/// Summary line for a tick, then one line per alert or completed route.
pub fn tick_lines(report: &TickReport) -> Vec<String> {
    let mut lines = vec![format!(
        "[tick {:>3}] advanced: {}",
        report.tick,
        if report.advanced.is_empty() {
            "-".to_string()
        } else {
            report.advanced.join(", ")
        }
    )];
    for alert in &report.alerts {
        lines.push(format!(
            "  ALERT #{} {} {}",
            alert.sequence,
            alert.raised_at.format("%H:%M:%S"),
            alert.message
        ));
    }
    for drone_id in &report.completed {
        lines.push(format!("  {drone_id} finished its route, offloading footage"));
    }
    lines
}
