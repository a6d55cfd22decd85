//! # Warden
//!
//! Headless arena that runs guardian NPCs against a scripted player.
//!
//! The binary wires the `warden-ai` behavior engine to simple in-process
//! collaborators:
//! - Straight-line navigation and a logging animator for each guardian
//! - A scripted player that walks a path and fights back
//! - Quest and HUD state updated by the guardians
//!
//! Usage: `warden [config.toml]` (defaults to `warden.toml`).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use warden_sim::{app, config};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("warden=info".parse()?))
        .init();

    info!("Warden arena starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(config::CONFIG_FILE), PathBuf::from);

    let summary = app::run(&config_path)?;

    info!(
        "Warden arena finished: {} of {} guardian(s) defeated",
        summary.guardians_defeated, summary.guardians_spawned
    );
    Ok(())
}
