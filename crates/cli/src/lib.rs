//! Diagnostic front end for weighted hash rings.
//!
//! Provides commands for:
//! - Routing keys to nodes or replica sets
//! - Sampling how evenly keys spread by weight
//! - Previewing the key movement of a membership change

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
