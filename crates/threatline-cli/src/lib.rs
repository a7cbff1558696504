//! # Threatline CLI Library
//!
//! Command definitions and execution for the threatline binary.

pub mod commands;

pub use commands::{run, Cli, Command};
