//! Command-line interface wiring: argument parsing, telemetry, dispatch.

pub mod actions;
pub mod commands;
pub mod dispatch;
mod start;
pub mod telemetry;

pub use start::start;
