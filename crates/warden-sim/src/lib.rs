//! # Warden Sim
//!
//! Headless arena host for the Warden behavior engine. Provides the
//! in-process collaborators a guardian needs (navigation, animation,
//! perception, the player it hunts, quest and HUD state) and a fixed
//! timestep loop that drives them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod animation;
pub mod app;
pub mod config;
pub mod navigation;
pub mod sensor;
pub mod timing;
pub mod world;
