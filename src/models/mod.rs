//! Data models for the mod manager.
//!
//! - [`GameId`]: Supported games, their configuration keys and category catalogs
//! - [`ModLayout`]: Where a game's mods and `d3dx_user.ini` live under its root
//! - [`ModDirectory`] / [`ModState`]: A mod folder and the state encoded in its name
//! - [`CategorySummary`]: Category label data (`Name (n)`) for list views
//! - [`UserConfig`]: Game root paths loaded from `HoyoModManager Config.yaml`
//!
//! # Architecture Note
//!
//! Nothing here touches the filesystem. The enabled flag of a mod is a pure
//! function of its folder name ([`toggled_name`], [`enabled_name`],
//! [`disabled_name`]), which lets the naming rules be tested on their own.

pub mod config;
pub mod game;
pub mod layout;
pub mod mod_entry;

pub use config::UserConfig;
pub use game::GameId;
pub use layout::{APP_DIR_NAME, ModLayout, OVERRIDE_FILE_NAME};
pub use mod_entry::{
    CategorySummary, DISABLED_PREFIX, ModDirectory, ModState, category_from_label, disabled_name,
    enabled_name, toggled_name,
};
