//! Renders per-timestep particle-filter results into an animated video.
//!
//! The filter itself runs elsewhere; this crate only turns its CSV artifacts
//! (true state, estimated state, particle cloud, sensor readings) into a
//! two-panel MP4 animation.

pub mod config;
pub mod frames;
pub mod render;
pub mod types;
pub mod video;
