use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Marker prepended to a mod directory name to disable it.
///
/// The game's loader skips any folder whose name starts with `DISABLED`, so the
/// enabled flag is never stored anywhere else than in the folder name itself.
pub const DISABLED_PREFIX: &str = "DISABLED ";

/// Matches the ` (12)` count suffix appended to category labels.
static COUNT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\(\d+\)$").expect("Invalid count suffix regex"));

/// Whether a mod directory is picked up by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModState {
    Enabled,
    Disabled,
}

impl ModState {
    /// Derive the state from a directory name.
    pub fn from_dir_name(name: &str) -> Self {
        if name.starts_with(DISABLED_PREFIX) {
            ModState::Disabled
        } else {
            ModState::Enabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == ModState::Enabled
    }
}

/// Name the directory must carry to be disabled. Already disabled names are
/// returned unchanged.
pub fn disabled_name(name: &str) -> String {
    if name.starts_with(DISABLED_PREFIX) {
        name.to_string()
    } else {
        format!("{DISABLED_PREFIX}{name}")
    }
}

/// Name the directory must carry to be enabled. Only one leading prefix is
/// stripped, so `DISABLED DISABLED x` becomes `DISABLED x`.
pub fn enabled_name(name: &str) -> String {
    name.strip_prefix(DISABLED_PREFIX).unwrap_or(name).to_string()
}

/// Flip the state encoded in `name`.
///
/// Applying it twice yields `name` again for every name whose unprefixed part
/// does not itself start with [`DISABLED_PREFIX`].
pub fn toggled_name(name: &str) -> String {
    match ModState::from_dir_name(name) {
        ModState::Enabled => disabled_name(name),
        ModState::Disabled => enabled_name(name),
    }
}

/// A mod folder found under a category directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDirectory {
    pub category: String,
    pub name: String,
    pub path: Utf8PathBuf,
}

impl ModDirectory {
    pub fn new(category: &str, name: &str, category_dir: &Utf8Path) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            path: category_dir.join(name),
        }
    }

    pub fn state(&self) -> ModState {
        ModState::from_dir_name(&self.name)
    }

    /// Folder name without the disabling marker.
    pub fn display_name(&self) -> &str {
        self.name.strip_prefix(DISABLED_PREFIX).unwrap_or(&self.name)
    }
}

/// A category together with how many mod folders it currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub mod_count: usize,
}

impl fmt::Display for CategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.mod_count)
    }
}

/// Recover the category name from a `Name (n)` label.
///
/// Labels without a count suffix are returned unchanged. Category names that
/// themselves end in a parenthesised word, like `March 7th (hunt)`, are safe
/// because only a digit-only suffix is removed.
pub fn category_from_label(label: &str) -> &str {
    match COUNT_SUFFIX.find(label) {
        Some(m) => &label[..m.start()],
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_state_from_name() {
        assert_eq!(ModState::from_dir_name("Cool Skin"), ModState::Enabled);
        assert_eq!(ModState::from_dir_name("DISABLED Cool Skin"), ModState::Disabled);
        // The marker must be followed by a space.
        assert_eq!(ModState::from_dir_name("DISABLEDCool"), ModState::Enabled);
        assert_eq!(ModState::from_dir_name("disabled Cool"), ModState::Enabled);
    }

    #[test]
    fn test_enable_strips_single_prefix() {
        assert_eq!(enabled_name("DISABLED DISABLED x"), "DISABLED x");
        assert_eq!(enabled_name("x DISABLED y"), "x DISABLED y");
        assert_eq!(enabled_name("plain"), "plain");
    }

    #[test]
    fn test_disable_is_idempotent() {
        assert_eq!(disabled_name("Skin"), "DISABLED Skin");
        assert_eq!(disabled_name("DISABLED Skin"), "DISABLED Skin");
    }

    #[test]
    fn test_display_name() {
        let dir = ModDirectory::new("Keqing", "DISABLED Lantern Rite", Utf8Path::new("/m/Keqing"));
        assert_eq!(dir.display_name(), "Lantern Rite");
        assert_eq!(dir.state(), ModState::Disabled);
        assert_eq!(dir.path, Utf8PathBuf::from("/m/Keqing/DISABLED Lantern Rite"));
    }

    #[test]
    fn test_category_label_round_trip() {
        let summary = CategorySummary {
            name: "Hu Tao".to_string(),
            mod_count: 12,
        };
        assert_eq!(summary.to_string(), "Hu Tao (12)");
        assert_eq!(category_from_label(&summary.to_string()), "Hu Tao");
        assert_eq!(category_from_label("March 7th (hunt)"), "March 7th (hunt)");
        assert_eq!(category_from_label("March 7th (hunt) (0)"), "March 7th (hunt)");
    }

    proptest! {
        #[test]
        fn toggle_twice_restores_name(name in "(DISABLED )?[A-CE-Za-z0-9_.-][A-Za-z0-9 _.-]{0,23}") {
            prop_assert_eq!(toggled_name(&toggled_name(&name)), name.clone());
        }

        #[test]
        fn toggle_flips_state(name in "(DISABLED )?[A-Za-z0-9_.-]{1,24}") {
            let before = ModState::from_dir_name(&name);
            let after = ModState::from_dir_name(&toggled_name(&name));
            prop_assert_ne!(before, after);
        }
    }
}
