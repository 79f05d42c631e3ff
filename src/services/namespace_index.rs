use crate::models::ModLayout;
use crate::services::path_resolver::split_segments;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use walkdir::WalkDir;

/// Locates the mod `.ini` that declares a given namespace.
///
/// 3DMigoto lets a mod declare `namespace = some\path` and then refers to its
/// persisted variables as `$\some\path\var`, regardless of where the mod is
/// installed. When such a path does not exist on disk, the declaring file is
/// found by scanning mod metadata instead.
pub struct NamespaceIndex {
    /// Matches `namespace = <value>` at line start, keyword case-insensitive
    namespace_pattern: Regex,
}

/// Canonical form used to compare namespaces: backslash separators, no
/// leading or trailing separator, lowercase.
pub fn normalize_namespace(value: &str) -> String {
    split_segments(value.trim())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("\\")
}

fn is_ini(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"))
}

impl NamespaceIndex {
    pub fn new() -> Self {
        Self {
            namespace_pattern: Regex::new(r"(?i)^\s*namespace\s*=\s*(.*?)\s*$")
                .expect("Invalid namespace regex"),
        }
    }

    /// The namespace declared in `content`, if any (first declaration wins).
    pub fn declared_namespace<'a>(&self, content: &'a str) -> Option<&'a str> {
        content.lines().find_map(|line| {
            self.namespace_pattern
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .filter(|value| !value.is_empty())
        })
    }

    /// Does the file at `path` declare `wanted` (already normalized)?
    fn file_declares(&self, path: &Utf8Path, wanted: &str) -> bool {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Skipping unreadable {}: {}", path, e);
                return false;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        self.declared_namespace(&content)
            .is_some_and(|ns| normalize_namespace(ns) == wanted)
    }

    /// Search every `.ini` under each category folder for a namespace equal to
    /// `declared_path`, ignoring case and separator style.
    ///
    /// Categories are searched in the given order and files within a category
    /// in file-name order, so the first match is deterministic. Missing
    /// category folders are skipped.
    pub fn find_by_namespace<S: AsRef<str>>(
        &self,
        layout: &ModLayout,
        categories: &[S],
        declared_path: &str,
    ) -> Option<Utf8PathBuf> {
        let wanted = normalize_namespace(declared_path);
        if wanted.is_empty() {
            return None;
        }

        for category in categories {
            let dir = layout.category_dir(category.as_ref());
            if !dir.is_dir() {
                continue;
            }

            let walker = WalkDir::new(&dir)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::debug!("Walk error under {}: {}", dir, e);
                        None
                    }
                });

            for entry in walker {
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                    continue;
                };
                if is_ini(&path) && self.file_declares(&path, &wanted) {
                    tracing::debug!("Namespace {} declared by {}", declared_path, path);
                    return Some(path);
                }
            }
        }

        None
    }
}

impl Default for NamespaceIndex {
    fn default() -> Self {
        Self::new()
    }
}
