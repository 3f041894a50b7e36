//! CLI command implementations.

pub mod classify;
pub mod common;
pub mod config;
pub mod monitor;
pub mod stats;
