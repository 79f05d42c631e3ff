//! Services module - filesystem logic for mod folders and persisted toggles.
//!
//! Everything here is framework-agnostic: no printing, no prompts. Results and
//! problems are returned as values for whatever front end drives them.
//!
//! # Components
//!
//! - [`resolve_case_insensitive`]: Maps a Windows-style relative path onto the
//!   real, case-sensitive directory tree, one segment at a time.
//! - [`ModStore`]: Enables, disables, counts, randomizes and scaffolds mod
//!   folders. State lives only in folder names (see [`crate::models::ModState`]).
//! - [`NamespaceIndex`]: Finds the mod `.ini` declaring a given namespace, the
//!   fallback when a declared path does not exist on disk.
//! - [`OverrideSynchronizer`]: Copies `d3dx_user.ini` values into the
//!   `global persist` declarations of the mod files and reports what failed.
//!
//! # Failure model
//!
//! Operations on folders are all-or-nothing per call and return [`ModError`].
//! Synchronization is best effort per entry: one bad entry never stops the
//! others, and every problem ends up in [`SyncReport::issues`].
//!
//! # Usage Example
//!
//! ```ignore
//! use hoyomm::models::{GameId, ModLayout};
//! use hoyomm::services::{ModStore, OverrideSynchronizer};
//!
//! let layout = ModLayout::new("/games/GIMI");
//! let categories = GameId::Genshin.categories();
//!
//! let store = ModStore::new(layout.clone());
//! store.randomize(categories)?;
//!
//! let report = OverrideSynchronizer::new()
//!     .synchronize(&layout.override_file(), &layout, categories)?;
//! for issue in &report.issues {
//!     println!("{issue}");
//! }
//! ```

pub mod error;
pub mod fs;
pub mod mod_store;
pub mod namespace_index;
pub mod overrides;
pub mod path_resolver;

pub use error::ModError;
pub use fs::{ModFs, RealFs};
pub use mod_store::ModStore;
pub use namespace_index::{NamespaceIndex, normalize_namespace};
pub use overrides::{
    EntryOutcome, OverrideEntry, OverrideSynchronizer, Resolution, SyncIssue, SyncReport,
};
pub use path_resolver::{normalize_separators, resolve_case_insensitive, split_segments};
