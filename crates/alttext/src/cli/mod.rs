//! CLI command implementations.

pub mod config;
pub mod describe;
pub mod interactive;
