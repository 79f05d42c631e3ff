//! Permanent-toggle synchronization.
//!
//! 3DMigoto stores the current value of every `global persist` variable in
//! `d3dx_user.ini`, one line per variable:
//!
//! ```text
//! $\mods\hoyomodmanager\klee\summer\summer.ini\swapvar = 2
//! ```
//!
//! [`OverrideSynchronizer`] writes those values back into the declaring mod
//! files, so the toggles survive even if `d3dx_user.ini` is reset:
//!
//! 1. Parse each override line into an [`OverrideEntry`]
//! 2. Resolve the path case-insensitively under the game root; if that fails,
//!    find the mod file declaring the path as its namespace
//! 3. Replace the first matching `global persist $<var>` line, leaving every
//!    other byte of the file untouched
//!
//! Entries that cannot be resolved, or whose variable is absent, are recorded
//! in the [`SyncReport`] and the pass moves on.

use crate::models::ModLayout;
use crate::services::error::ModError;
use crate::services::namespace_index::NamespaceIndex;
use crate::services::path_resolver::resolve_case_insensitive;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use regex::bytes::Regex as BytesRegex;
use std::fmt;
use std::fs;

/// One `$<path>\<variable> = <value>` line from `d3dx_user.ini`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideEntry {
    /// Path as written in the override file, separators and case untouched
    pub raw_path: String,
    pub variable: String,
    /// Trailing text after `=`, not type-checked
    pub value: String,
}

/// How the target file of an entry was located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The declared path exists on disk (ignoring case)
    Direct(Utf8PathBuf),
    /// A mod file declares the path as its namespace
    Namespace(Utf8PathBuf),
    NotFound,
}

impl Resolution {
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Resolution::Direct(path) | Resolution::Namespace(path) => Some(path),
            Resolution::NotFound => None,
        }
    }
}

/// A non-fatal problem with a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncIssue {
    /// Neither the path nor any namespace declaration matched
    Unresolved { raw_path: String, variable: String },
    /// The file was found but declares no such persisted variable
    VariableNotFound { variable: String, file: Utf8PathBuf },
    /// The file was found but could not be read or written
    FileError { file: Utf8PathBuf, message: String },
}

impl fmt::Display for SyncIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncIssue::Unresolved { raw_path, .. } => {
                write!(f, "Path could not be resolved for: {}", raw_path)
            }
            SyncIssue::VariableNotFound { variable, file } => {
                write!(f, "Variable {} not found in {}", variable, file)
            }
            SyncIssue::FileError { file, message } => write!(f, "{}: {}", file, message),
        }
    }
}

/// Result of processing one entry.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub entry: OverrideEntry,
    pub resolution: Resolution,
    /// True if the declaration was found and now carries the entry's value
    pub updated: bool,
}

/// Everything a synchronization pass did and could not do.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<EntryOutcome>,
    pub issues: Vec<SyncIssue>,
}

impl SyncReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &SyncIssue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, SyncIssue::Unresolved { .. }))
    }

    pub fn missing_variables(&self) -> impl Iterator<Item = &SyncIssue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, SyncIssue::VariableNotFound { .. }))
    }

    pub fn file_errors(&self) -> impl Iterator<Item = &SyncIssue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, SyncIssue::FileError { .. }))
    }

    pub fn updated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.updated).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Split a line into its content and its terminator (`\r\n`, `\n` or none).
fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    if let Some(body) = line.strip_suffix(b"\r\n") {
        (body, &b"\r\n"[..])
    } else if let Some(body) = line.strip_suffix(b"\n") {
        (body, &b"\n"[..])
    } else {
        (line, &b""[..])
    }
}

/// Rewrites `global persist` values from `d3dx_user.ini` into mod files.
///
/// Regex patterns are compiled once at construction:
///
/// - `entry_pattern`: `$<path>\<variable> = <value>`, either separator
/// - `persist_pattern`: `global persist $<variable>` at line start, keyword
///   case-insensitive, capturing the variable name. Matched on raw bytes
///   since mod files are not always UTF-8.
pub struct OverrideSynchronizer {
    entry_pattern: Regex,
    persist_pattern: BytesRegex,
    namespaces: NamespaceIndex,
}

impl OverrideSynchronizer {
    pub fn new() -> Self {
        Self {
            entry_pattern: Regex::new(r"^\$[\\/]?(.+)[\\/]([^\s\\/=]+)\s*=\s*(.+)$")
                .expect("Invalid override entry regex"),
            persist_pattern: BytesRegex::new(r"^\s*(?i:global\s+persist)\s+\$([^\s=]+)")
                .expect("Invalid persist regex"),
            namespaces: NamespaceIndex::new(),
        }
    }

    /// Parse one override line. Lines that do not match are not entries.
    pub fn parse_line(&self, line: &str) -> Option<OverrideEntry> {
        let caps = self.entry_pattern.captures(line.trim())?;
        Some(OverrideEntry {
            raw_path: caps[1].to_string(),
            variable: caps[2].to_string(),
            value: caps[3].to_string(),
        })
    }

    pub fn parse_overrides(&self, content: &str) -> Vec<OverrideEntry> {
        content
            .lines()
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    /// Replace the first `global persist $<variable>` line of `content` with
    /// `global persist $<variable> = <value>`.
    ///
    /// Returns `None` if no line declares the variable. Every other byte,
    /// including line endings and non-UTF-8 text, is kept as is.
    pub fn rewrite_persisted(&self, content: &[u8], variable: &str, value: &str) -> Option<Vec<u8>> {
        let mut output = Vec::with_capacity(content.len() + value.len());
        let mut found = false;

        for line in content.split_inclusive(|b| *b == b'\n') {
            let (body, terminator) = split_terminator(line);
            let matches = !found
                && self
                    .persist_pattern
                    .captures(body)
                    .is_some_and(|caps| &caps[1] == variable.as_bytes());

            if matches {
                output.extend_from_slice(format!("global persist ${} = {}", variable, value).as_bytes());
                output.extend_from_slice(terminator);
                found = true;
            } else {
                output.extend_from_slice(line);
            }
        }

        found.then_some(output)
    }

    /// Locate the file an entry refers to.
    ///
    /// The path is first resolved under the game root; a hit must be a file.
    /// Otherwise the original path string is looked up as a namespace across
    /// `categories`.
    pub fn resolve<S: AsRef<str>>(
        &self,
        layout: &ModLayout,
        categories: &[S],
        entry: &OverrideEntry,
    ) -> Resolution {
        match resolve_case_insensitive(layout.game_root(), &entry.raw_path) {
            Some(path) if path.is_file() => return Resolution::Direct(path),
            Some(path) => tracing::debug!("{} resolved to {}, which is not a file", entry.raw_path, path),
            None => tracing::debug!("{} not found under {}", entry.raw_path, layout.game_root()),
        }

        match self
            .namespaces
            .find_by_namespace(layout, categories, &entry.raw_path)
        {
            Some(path) => Resolution::Namespace(path),
            None => Resolution::NotFound,
        }
    }

    /// Write the entry's value into `file`. Returns whether the file changed.
    fn apply(&self, file: &Utf8Path, entry: &OverrideEntry) -> Result<bool, SyncIssue> {
        let to_issue = |e: std::io::Error| SyncIssue::FileError {
            file: file.to_path_buf(),
            message: e.to_string(),
        };

        let content = fs::read(file).map_err(to_issue)?;
        match self.rewrite_persisted(&content, &entry.variable, &entry.value) {
            Some(updated) => {
                if updated != content {
                    fs::write(file, updated).map_err(to_issue)?;
                }
                tracing::info!("Set {} = {} in {}", entry.variable, entry.value, file);
                Ok(true)
            }
            None => Err(SyncIssue::VariableNotFound {
                variable: entry.variable.clone(),
                file: file.to_path_buf(),
            }),
        }
    }

    /// Apply every entry of `override_file` to the mods of `layout`.
    ///
    /// Per-entry failures are collected in the report; only a missing game
    /// root or an unreadable override file abort the pass. A missing base
    /// folder only disables the namespace fallback.
    pub fn synchronize<S: AsRef<str>>(
        &self,
        override_file: &Utf8Path,
        layout: &ModLayout,
        categories: &[S],
    ) -> Result<SyncReport, ModError> {
        if !layout.game_root().is_dir() {
            return Err(ModError::ConfigurationMissing(format!(
                "game folder {} does not exist",
                layout.game_root()
            )));
        }
        if !override_file.is_file() {
            return Err(ModError::OverrideFileMissing(override_file.to_path_buf()));
        }
        if !layout.base_dir().is_dir() {
            tracing::warn!(
                "{} not found, namespace lookup will find nothing",
                layout.base_dir()
            );
        }

        let bytes = fs::read(override_file).map_err(|e| ModError::io(override_file, e))?;
        let content = String::from_utf8_lossy(&bytes);

        let mut report = SyncReport::default();
        for entry in self.parse_overrides(&content) {
            let resolution = self.resolve(layout, categories, &entry);

            let updated = match resolution.path() {
                Some(file) => match self.apply(file, &entry) {
                    Ok(updated) => updated,
                    Err(issue) => {
                        tracing::warn!("{}", issue);
                        report.issues.push(issue);
                        false
                    }
                },
                None => {
                    let issue = SyncIssue::Unresolved {
                        raw_path: entry.raw_path.clone(),
                        variable: entry.variable.clone(),
                    };
                    tracing::warn!("{}", issue);
                    report.issues.push(issue);
                    false
                }
            };

            report.outcomes.push(EntryOutcome {
                entry,
                resolution,
                updated,
            });
        }

        tracing::info!(
            "Synchronized {} of {} persisted variables ({} issues)",
            report.updated_count(),
            report.outcomes.len(),
            report.issues.len()
        );

        Ok(report)
    }
}

impl Default for OverrideSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let sync = OverrideSynchronizer::new();
        let entry = sync.parse_line("  $\\Mods\\char\\skill.ini\\var1 = 5  ").unwrap();
        assert_eq!(entry.raw_path, "Mods\\char\\skill.ini");
        assert_eq!(entry.variable, "var1");
        assert_eq!(entry.value, "5");

        let entry = sync.parse_line("$/mods/a b/c.ini/swap=1.5").unwrap();
        assert_eq!(entry.raw_path, "mods/a b/c.ini");
        assert_eq!(entry.variable, "swap");
        assert_eq!(entry.value, "1.5");
    }

    #[test]
    fn test_parse_ignores_other_lines() {
        let sync = OverrideSynchronizer::new();
        let content = "; Automatically generated\n[Constants]\n\n$novar = 3\n$\\a\\b.ini\\x = 1\n";
        let entries = sync.parse_overrides(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].variable, "x");
    }

    #[test]
    fn test_rewrite_first_match_only() {
        let sync = OverrideSynchronizer::new();
        let content = b"[Constants]\nglobal persist $var1 = 3\nGLOBAL  PERSIST $var1 = 4\n";
        let updated = sync.rewrite_persisted(content, "var1", "5").unwrap();
        assert_eq!(
            updated.as_slice(),
            b"[Constants]\nglobal persist $var1 = 5\nGLOBAL  PERSIST $var1 = 4\n"
        );
    }

    #[test]
    fn test_rewrite_keeps_crlf_and_missing_final_newline() {
        let sync = OverrideSynchronizer::new();
        let content = b"[Constants]\r\n  Global Persist $swap = 0\r\nend";
        let updated = sync.rewrite_persisted(content, "swap", "2").unwrap();
        assert_eq!(updated.as_slice(), b"[Constants]\r\nglobal persist $swap = 2\r\nend");
    }

    #[test]
    fn test_rewrite_variable_name_is_case_sensitive() {
        let sync = OverrideSynchronizer::new();
        assert!(sync.rewrite_persisted(b"global persist $Var1 = 3\n", "var1", "5").is_none());
        // Prefix of a longer name is not a match
        assert!(sync.rewrite_persisted(b"global persist $var10 = 3\n", "var1", "5").is_none());
        // Declarations without a value still match
        assert_eq!(
            sync.rewrite_persisted(b"global persist $var1\n", "var1", "5").as_deref(),
            Some(&b"global persist $var1 = 5\n"[..])
        );
    }

    #[test]
    fn test_rewrite_keeps_non_utf8_bytes() {
        let sync = OverrideSynchronizer::new();
        // GBK-encoded comment ahead of the declaration
        let mut content = b"; \xc7\xd0\xbb\xbb\r\n".to_vec();
        content.extend_from_slice(b"global persist $swap = 0\r\n");

        let updated = sync.rewrite_persisted(&content, "swap", "1").unwrap();
        assert_eq!(
            updated.as_slice(),
            b"; \xc7\xd0\xbb\xbb\r\nglobal persist $swap = 1\r\n"
        );
    }

    #[test]
    fn test_issue_messages() {
        let issue = SyncIssue::VariableNotFound {
            variable: "swap".to_string(),
            file: Utf8PathBuf::from("/m/a.ini"),
        };
        assert_eq!(issue.to_string(), "Variable swap not found in /m/a.ini");
    }
}
