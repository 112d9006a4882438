//! Shared library surface for the SkyTour server and its tests.

pub mod api;
pub mod config;
pub mod logging;
pub mod loops;
pub mod server;
pub mod state;
