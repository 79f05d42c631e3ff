use camino::{Utf8Path, Utf8PathBuf};

/// Folder under `Mods` that holds the per-category mod directories.
pub const APP_DIR_NAME: &str = "HoyoModManager";

/// Name of 3DMigoto's persisted-variable file in the game root.
pub const OVERRIDE_FILE_NAME: &str = "d3dx_user.ini";

/// On-disk layout of a single game's mod tree:
///
/// ```text
/// <game_root>/d3dx_user.ini
/// <game_root>/Mods/HoyoModManager/<Category>/<ModName>/...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModLayout {
    game_root: Utf8PathBuf,
}

impl ModLayout {
    pub fn new<P: AsRef<Utf8Path>>(game_root: P) -> Self {
        Self {
            game_root: game_root.as_ref().to_path_buf(),
        }
    }

    pub fn game_root(&self) -> &Utf8Path {
        &self.game_root
    }

    pub fn mods_root(&self) -> Utf8PathBuf {
        self.game_root.join("Mods")
    }

    pub fn base_dir(&self) -> Utf8PathBuf {
        self.mods_root().join(APP_DIR_NAME)
    }

    pub fn category_dir(&self, category: &str) -> Utf8PathBuf {
        self.base_dir().join(category)
    }

    pub fn mod_dir(&self, category: &str, mod_name: &str) -> Utf8PathBuf {
        self.category_dir(category).join(mod_name)
    }

    pub fn override_file(&self) -> Utf8PathBuf {
        self.game_root.join(OVERRIDE_FILE_NAME)
    }
}
