// HoyoModManager - per-character mod folders and persisted toggles for 3DMigoto games
//
// This is the library crate containing the core logic and data structures.
// The binary crate (main.rs) provides the command line front end.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{GameId, ModLayout, UserConfig};
pub use services::{ModError, ModStore, OverrideSynchronizer, SyncReport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
