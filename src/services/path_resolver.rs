//! Case-insensitive resolution of relative paths against a real directory tree.
//!
//! Paths in `d3dx_user.ini` are written by 3DMigoto on Windows, which lowercases
//! them and uses backslashes. On a case-sensitive filesystem they have to be
//! matched segment by segment against what is actually on disk.
//!
//! # Ambiguity
//!
//! If a directory holds two children whose names differ only by case (for
//! example `Skin.ini` and `skin.ini`), the first one returned by directory
//! enumeration wins. Enumeration order is filesystem dependent, so the result
//! is unspecified in that case; no tie-break is applied.

use camino::{Utf8Path, Utf8PathBuf};

/// Split a path on either separator, dropping empty segments.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty())
}

/// Rewrite `path` to use forward slashes only.
pub fn normalize_separators(path: &str) -> String {
    split_segments(path).collect::<Vec<_>>().join("/")
}

fn names_match(on_disk: &str, wanted: &str) -> bool {
    on_disk.eq_ignore_ascii_case(wanted) || on_disk.to_lowercase() == wanted.to_lowercase()
}

/// Resolve `relative` under `root`, ignoring case in every segment.
///
/// Returns the real on-disk path, or `None` if some segment has no match or an
/// intermediate prefix is not a directory. The returned path may name a file
/// or a directory; callers that need a file must check.
pub fn resolve_case_insensitive(root: &Utf8Path, relative: &str) -> Option<Utf8PathBuf> {
    let mut current = root.to_path_buf();

    for segment in split_segments(relative) {
        if !current.is_dir() {
            tracing::debug!("Resolution stopped, {} is not a directory", current);
            return None;
        }

        let entries = match current.read_dir_utf8() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Failed to list {}: {}", current, e);
                return None;
            }
        };

        let matched = entries
            .filter_map(Result::ok)
            .find(|entry| names_match(entry.file_name(), segment));

        match matched {
            Some(entry) => current = entry.into_path(),
            None => {
                tracing::debug!("No entry matching '{}' in {}", segment, current);
                return None;
            }
        }
    }

    Some(current)
}
