use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort a mod-folder operation.
///
/// Per-entry synchronization problems are not errors; they are collected in a
/// [`SyncReport`](crate::services::SyncReport) instead.
#[derive(Error, Debug)]
pub enum ModError {
    /// Game root unset, or the game root / `Mods` folder does not exist.
    #[error("Game path is not configured correctly: {0}")]
    ConfigurationMissing(String),

    /// A base or category folder expected by the operation is absent.
    #[error("Directory {0} not found, create the necessary folders first")]
    DirectoryMissing(Utf8PathBuf),

    #[error("Mod folder {0} not found")]
    ModNotFound(Utf8PathBuf),

    #[error("Cannot rename to {0}: a folder with that name already exists")]
    RenameConflict(Utf8PathBuf),

    #[error("'{0}' file not found")]
    OverrideFileMissing(Utf8PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        ModError::Io {
            path: path.into(),
            source,
        }
    }
}
