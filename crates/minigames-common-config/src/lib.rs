//! Configuration types for Minigames.
//!
//! The data directory holds `minigames.yaml`, the messages document and an
//! optional `.env` file.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
