//! Append-only log of geofence violation alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Alert, NoFlyZone};

/// How many alerts the operator panel shows by default.
pub const DEFAULT_RECENT_ALERTS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertLog {
    entries: Vec<Alert>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation of `zone` by `drone_id`.
    pub fn push(
        &mut self,
        drone_id: &str,
        zone: &NoFlyZone,
        tick: u64,
        raised_at: DateTime<Utc>,
    ) -> &Alert {
        let alert = Alert {
            sequence: self.entries.len() as u64 + 1,
            drone_id: drone_id.to_string(),
            geofence_id: zone.id.clone(),
            tick,
            message: format!(
                "WARNING: drone {} entered the {} and was forced to hover",
                drone_id, zone.name
            ),
            raised_at,
        };
        self.entries.push(alert);
        &self.entries[self.entries.len() - 1]
    }

    /// Last `limit` alerts, oldest first.
    pub fn recent(&self, limit: usize) -> &[Alert] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    pub fn for_drone<'a>(&'a self, drone_id: &'a str) -> impl Iterator<Item = &'a Alert> + 'a {
        self.entries.iter().filter(move |a| a.drone_id == drone_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
