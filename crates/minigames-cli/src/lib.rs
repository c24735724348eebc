//! Minigames message tool library.
//!
//! Core components of the `mgmsg` binary.

pub mod builtin;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
