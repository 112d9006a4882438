//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber: `RUST_LOG` filters plus a default
/// directive for this crate, human-readable or JSON lines.
pub fn init_logging(json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("skytour_server=debug".parse()?);

    let (plain, structured) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(structured)
        .try_init()?;

    Ok(())
}
