//! CLI module for the `docrag` binary
//!
//! - Command line argument parsing
//! - Command handlers

pub mod commands;
pub mod handlers;

pub use commands::*;
pub use handlers::*;
