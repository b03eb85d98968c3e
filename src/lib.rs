//! voice-resample-rs library crate
//!
//! Streaming Lagrange sample-rate conversion for the music playback
//! pipeline. The demo binary is in main.rs.

#[macro_use]
extern crate log;

pub mod chunk;
pub mod config;
pub mod constants;
pub mod interpolate;
pub mod net;
pub mod resampler;
pub mod sources;
