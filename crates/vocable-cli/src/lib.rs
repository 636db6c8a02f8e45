//! Command-line front end for vocable.
//!
//! The binary has no speech engine of its own: `export` always goes through
//! the network fallback, and `estimate` only needs the timing helpers.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

// Used by the binary target only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod config;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{Commands, ExportArgs};
pub use config::{settings_from_env, settings_from_lookup};
pub use parser::Cli;
