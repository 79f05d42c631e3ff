use crate::models::{GameId, ModLayout};
use crate::services::ModError;
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// User configuration from `HoyoModManager Config.yaml`
///
/// Holds one root path per game, keyed by [`GameId::config_key`]. The root is
/// the 3DMigoto loader folder, i.e. the one containing `d3dx_user.ini` and
/// `Mods/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Paths", default = "default_paths")]
    pub paths: IndexMap<String, String>,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            debug_mode: false,
        }
    }
}

fn default_paths() -> IndexMap<String, String> {
    GameId::ALL
        .iter()
        .map(|game| (game.config_key().to_string(), String::new()))
        .collect()
}

impl UserConfig {
    /// Configured root for `game`.
    ///
    /// # Errors
    /// [`ModError::ConfigurationMissing`] if the key is absent or blank.
    pub fn game_root(&self, game: GameId) -> Result<Utf8PathBuf, ModError> {
        match self.paths.get(game.config_key()).map(|p| p.trim()) {
            Some(path) if !path.is_empty() => Ok(Utf8PathBuf::from(path)),
            _ => Err(ModError::ConfigurationMissing(format!(
                "no path configured for {} ({})",
                game,
                game.config_key()
            ))),
        }
    }

    /// Layout rooted at the configured path for `game`.
    pub fn layout(&self, game: GameId) -> Result<ModLayout, ModError> {
        self.game_root(game).map(ModLayout::new)
    }

    pub fn set_game_root(&mut self, game: GameId, path: impl Into<String>) {
        self.paths.insert(game.config_key().to_string(), path.into());
    }
}
