//! SkyTour CLI - Command line tools for the drone tour simulator.
//!
//! Binaries:
//! - simulate: headless run of the built-in fleet
//! - fleet_status: fleet table from a running server

pub mod report;
pub mod scenario;

pub use scenario::build_simulator;
