use crate::models::{
    CategorySummary, ModDirectory, ModLayout, ModState, disabled_name, enabled_name, toggled_name,
};
use crate::services::error::ModError;
use crate::services::fs::{ModFs, RealFs};
use camino::{Utf8Path, Utf8PathBuf};
use rand::Rng;

/// Enabled/disabled state of mod folders for one game.
///
/// The store keeps no state of its own: every call lists the directory tree
/// again, so the folder names on disk are the only source of truth.
///
/// # Errors
///
/// A missing game root or `Mods` folder is reported as
/// [`ModError::ConfigurationMissing`] by every operation. Missing base or
/// category folders are [`ModError::DirectoryMissing`], and a missing mod
/// folder is [`ModError::ModNotFound`].
pub struct ModStore<F: ModFs = RealFs> {
    layout: ModLayout,
    fs: F,
}

impl ModStore<RealFs> {
    pub fn new(layout: ModLayout) -> Self {
        Self::with_fs(layout, RealFs)
    }
}

impl<F: ModFs> ModStore<F> {
    pub fn with_fs(layout: ModLayout, fs: F) -> Self {
        Self { layout, fs }
    }

    pub fn layout(&self) -> &ModLayout {
        &self.layout
    }

    fn ensure_mods_root(&self) -> Result<(), ModError> {
        let game_root = self.layout.game_root();
        if !self.fs.is_dir(game_root) {
            return Err(ModError::ConfigurationMissing(format!(
                "game folder {} does not exist",
                game_root
            )));
        }

        let mods_root = self.layout.mods_root();
        if !self.fs.is_dir(&mods_root) {
            return Err(ModError::ConfigurationMissing(format!(
                "{} does not exist",
                mods_root
            )));
        }

        Ok(())
    }

    fn ensure_base_dir(&self) -> Result<Utf8PathBuf, ModError> {
        self.ensure_mods_root()?;
        let base_dir = self.layout.base_dir();
        if !self.fs.is_dir(&base_dir) {
            return Err(ModError::DirectoryMissing(base_dir));
        }
        Ok(base_dir)
    }

    fn list_dir_names(&self, dir: &Utf8Path) -> Result<Vec<String>, ModError> {
        self.fs.list_dirs(dir).map_err(|e| ModError::io(dir, e))
    }

    fn rename(&self, dir: &Utf8Path, from: &str, to: &str) -> Result<(), ModError> {
        let source = dir.join(from);
        let target = dir.join(to);

        if !self.fs.is_dir(&source) {
            return Err(ModError::ModNotFound(source));
        }
        if self.fs.exists(&target) {
            return Err(ModError::RenameConflict(target));
        }

        self.fs
            .rename(&source, &target)
            .map_err(|e| ModError::io(&source, e))?;
        tracing::info!("Renamed {} -> {}", source, to);
        Ok(())
    }

    /// Number of mod folders in `category`, 0 if its folder does not exist.
    pub fn count_mods(&self, category: &str) -> Result<usize, ModError> {
        self.ensure_mods_root()?;
        let dir = self.layout.category_dir(category);
        if !self.fs.is_dir(&dir) {
            return Ok(0);
        }
        Ok(self.list_dir_names(&dir)?.len())
    }

    /// Mod folders in `category` in enumeration order. A category without a
    /// folder has no mods.
    pub fn list_mods(&self, category: &str) -> Result<Vec<ModDirectory>, ModError> {
        self.ensure_mods_root()?;
        let dir = self.layout.category_dir(category);
        if !self.fs.is_dir(&dir) {
            tracing::debug!("Category folder {} does not exist", dir);
            return Ok(Vec::new());
        }

        Ok(self
            .list_dir_names(&dir)?
            .iter()
            .map(|name| ModDirectory::new(category, name, &dir))
            .collect())
    }

    /// Counts for every category, in catalog order.
    ///
    /// Requires the base folder to exist so a user is pointed at scaffolding
    /// instead of seeing every count as zero.
    pub fn category_summaries<S: AsRef<str>>(
        &self,
        categories: &[S],
    ) -> Result<Vec<CategorySummary>, ModError> {
        self.ensure_base_dir()?;
        categories
            .iter()
            .map(|category| {
                let name = category.as_ref();
                Ok(CategorySummary {
                    name: name.to_string(),
                    mod_count: self.count_mods(name)?,
                })
            })
            .collect()
    }

    /// Flip a mod between enabled and disabled by renaming its folder.
    ///
    /// Returns the mod under its new name.
    pub fn toggle(&self, category: &str, mod_name: &str) -> Result<ModDirectory, ModError> {
        self.ensure_mods_root()?;
        let dir = self.layout.category_dir(category);
        let new_name = toggled_name(mod_name);

        self.rename(&dir, mod_name, &new_name)?;
        Ok(ModDirectory::new(category, &new_name, &dir))
    }

    /// [`randomize_with`](Self::randomize_with) using the thread-local RNG.
    pub fn randomize<S: AsRef<str>>(&self, categories: &[S]) -> Result<Vec<ModDirectory>, ModError> {
        self.randomize_with(categories, &mut rand::rng())
    }

    /// Leave exactly one enabled mod in every non-empty category.
    ///
    /// All enabled mods are disabled first, then one mod is picked uniformly
    /// among all mods of the category and enabled. Every category is checked
    /// before anything is renamed: a missing folder or a disabled name that is
    /// already taken aborts the whole batch untouched.
    ///
    /// Returns the enabled pick of each non-empty category.
    pub fn randomize_with<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        categories: &[S],
        rng: &mut R,
    ) -> Result<Vec<ModDirectory>, ModError> {
        self.ensure_base_dir()?;

        let mut dirs = Vec::with_capacity(categories.len());
        for category in categories {
            let dir = self.layout.category_dir(category.as_ref());
            if !self.fs.is_dir(&dir) {
                return Err(ModError::DirectoryMissing(dir));
            }
            dirs.push((category.as_ref(), dir));
        }

        let mut plan = Vec::with_capacity(dirs.len());
        for (category, dir) in dirs {
            let names = self.list_dir_names(&dir)?;
            self.check_disable_targets(&dir, &names)?;
            plan.push((category, dir, names));
        }

        let mut picks = Vec::new();
        for (category, dir, mut names) in plan {
            for name in names.iter_mut() {
                if ModState::from_dir_name(name).is_enabled() {
                    let disabled = disabled_name(name);
                    self.rename(&dir, name, &disabled)?;
                    *name = disabled;
                }
            }

            if names.is_empty() {
                tracing::debug!("No mods for {}, nothing to pick", category);
                continue;
            }

            let chosen = &names[rng.random_range(0..names.len())];
            let enabled = enabled_name(chosen);
            if enabled != *chosen {
                self.rename(&dir, chosen, &enabled)?;
            }

            tracing::info!("Randomized {}: enabled {}", category, enabled);
            picks.push(ModDirectory::new(category, &enabled, &dir));
        }

        Ok(picks)
    }

    /// Fail if disabling an enabled mod in `dir` would hit an existing entry.
    fn check_disable_targets(&self, dir: &Utf8Path, names: &[String]) -> Result<(), ModError> {
        for name in names {
            if !ModState::from_dir_name(name).is_enabled() {
                continue;
            }
            let target = dir.join(disabled_name(name));
            if self.fs.exists(&target) {
                return Err(ModError::RenameConflict(target));
            }
        }
        Ok(())
    }

    /// Create the base folder and one folder per category. Existing folders
    /// are left alone.
    pub fn create_scaffold<S: AsRef<str>>(&self, categories: &[S]) -> Result<(), ModError> {
        self.ensure_mods_root()?;

        let base_dir = self.layout.base_dir();
        self.fs
            .create_dir_all(&base_dir)
            .map_err(|e| ModError::io(&base_dir, e))?;

        for category in categories {
            let dir = self.layout.category_dir(category.as_ref());
            self.fs
                .create_dir_all(&dir)
                .map_err(|e| ModError::io(&dir, e))?;
        }

        tracing::info!(
            "Created folder scaffold for {} categories under {}",
            categories.len(),
            base_dir
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fs::MockModFs;

    fn layout() -> ModLayout {
        ModLayout::new("/game")
    }

    /// Game root, `Mods` and base folder present; anything else decided by `dirs`.
    fn mock_with_dirs(dirs: &'static [&'static str]) -> MockModFs {
        let mut fs = MockModFs::new();
        fs.expect_is_dir().returning(move |p| {
            matches!(p.as_str(), "/game" | "/game/Mods" | "/game/Mods/HoyoModManager")
                || dirs.iter().any(|d| *d == p.as_str())
        });
        fs
    }

    #[test]
    fn test_missing_mods_root_is_configuration_error() {
        let mut fs = MockModFs::new();
        fs.expect_is_dir().returning(|p| p.as_str() == "/game");
        let store = ModStore::with_fs(layout(), fs);

        assert!(matches!(
            store.count_mods("Klee"),
            Err(ModError::ConfigurationMissing(_))
        ));
        assert!(matches!(
            store.toggle("Klee", "Skin"),
            Err(ModError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn test_count_missing_category_is_zero() {
        let mut fs = mock_with_dirs(&[]);
        fs.expect_list_dirs().never();
        let store = ModStore::with_fs(layout(), fs);

        assert_eq!(store.count_mods("Klee").unwrap(), 0);
    }

    #[test]
    fn test_toggle_rejects_existing_target() {
        let mut fs = mock_with_dirs(&["/game/Mods/HoyoModManager/Klee/Skin"]);
        fs.expect_exists()
            .returning(|p| p.as_str() == "/game/Mods/HoyoModManager/Klee/DISABLED Skin");
        fs.expect_rename().never();
        let store = ModStore::with_fs(layout(), fs);

        let err = store.toggle("Klee", "Skin").unwrap_err();
        assert!(matches!(err, ModError::RenameConflict(_)));
    }

    #[test]
    fn test_toggle_missing_mod() {
        let mut fs = mock_with_dirs(&[]);
        fs.expect_rename().never();
        let store = ModStore::with_fs(layout(), fs);

        assert!(matches!(
            store.toggle("Klee", "Ghost"),
            Err(ModError::ModNotFound(_))
        ));
    }

    #[test]
    fn test_toggle_renames_with_prefix() {
        let mut fs = mock_with_dirs(&["/game/Mods/HoyoModManager/Klee/Skin"]);
        fs.expect_exists().returning(|_| false);
        fs.expect_rename()
            .withf(|from, to| {
                from.as_str() == "/game/Mods/HoyoModManager/Klee/Skin"
                    && to.as_str() == "/game/Mods/HoyoModManager/Klee/DISABLED Skin"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let store = ModStore::with_fs(layout(), fs);

        let toggled = store.toggle("Klee", "Skin").unwrap();
        assert_eq!(toggled.name, "DISABLED Skin");
        assert_eq!(toggled.state(), ModState::Disabled);
    }

    #[test]
    fn test_randomize_missing_category_touches_nothing() {
        let mut fs = mock_with_dirs(&["/game/Mods/HoyoModManager/Klee"]);
        fs.expect_list_dirs().never();
        fs.expect_rename().never();
        let store = ModStore::with_fs(layout(), fs);

        let err = store.randomize(&["Klee", "Qiqi"]).unwrap_err();
        match err {
            ModError::DirectoryMissing(dir) => {
                assert_eq!(dir.as_str(), "/game/Mods/HoyoModManager/Qiqi")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_randomize_conflict_touches_nothing() {
        let mut fs = mock_with_dirs(&[
            "/game/Mods/HoyoModManager/Amber",
            "/game/Mods/HoyoModManager/Klee",
        ]);
        fs.expect_list_dirs().returning(|p| {
            Ok(match p.as_str() {
                "/game/Mods/HoyoModManager/Amber" => vec!["A".to_string(), "B".to_string()],
                _ => vec!["X".to_string(), "DISABLED X".to_string()],
            })
        });
        fs.expect_exists()
            .returning(|p| p.as_str() == "/game/Mods/HoyoModManager/Klee/DISABLED X");
        fs.expect_rename().never();
        let store = ModStore::with_fs(layout(), fs);

        let err = store.randomize(&["Amber", "Klee"]).unwrap_err();
        match err {
            ModError::RenameConflict(target) => {
                assert_eq!(target.as_str(), "/game/Mods/HoyoModManager/Klee/DISABLED X")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scaffold_requires_mods_root() {
        let mut fs = MockModFs::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_create_dir_all().never();
        let store = ModStore::with_fs(layout(), fs);

        assert!(matches!(
            store.create_scaffold(&["Klee"]),
            Err(ModError::ConfigurationMissing(_))
        ));
    }
}
