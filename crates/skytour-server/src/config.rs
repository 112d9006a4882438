//! Server configuration from environment.

use std::env;
use std::time::Duration;

use skytour_core::{DEFAULT_NO_FLY_RADIUS_M, DEFAULT_RECENT_ALERTS};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Wall-clock period between simulation ticks
    pub tick_interval: Duration,
    /// Alerts included in snapshots and the default `/v1/alerts` window
    pub recent_alerts: usize,
    /// Buffered snapshots per WebSocket subscriber before it lags
    pub stream_capacity: usize,
    pub no_fly_radius_m: f64,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            tick_interval: Duration::from_millis(2000),
            recent_alerts: DEFAULT_RECENT_ALERTS,
            stream_capacity: 64,
            no_fly_radius_m: DEFAULT_NO_FLY_RADIUS_M,
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unparseable or out-of-range values
    /// keep their defaults; the tick interval and stream capacity are at
    /// least 1.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |name: &str| lookup(name).map(|s| s.trim().to_string());
        let defaults = Self::default();
        Self {
            server_port: parse_as(parse("SKYTOUR_PORT")).unwrap_or(defaults.server_port),
            tick_interval: parse_as::<u64>(parse("SKYTOUR_TICK_MS"))
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or(defaults.tick_interval),
            recent_alerts: parse_as(parse("SKYTOUR_RECENT_ALERTS"))
                .unwrap_or(defaults.recent_alerts),
            stream_capacity: parse_as::<usize>(parse("SKYTOUR_STREAM_CAPACITY"))
                .map(|n| n.max(1))
                .unwrap_or(defaults.stream_capacity),
            no_fly_radius_m: parse_as::<f64>(parse("SKYTOUR_NOFLY_RADIUS_M"))
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(defaults.no_fly_radius_m),
            log_json: parse("SKYTOUR_LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.log_json),
        }
    }
}

fn parse_as<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}
