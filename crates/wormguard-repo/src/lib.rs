//! Filesystem adapters: locate project roots and scan installed code for indicator files.
//!
//! This crate is allowed to do filesystem IO. It does not spawn external processes; the
//! package manager is driven from `wormguard-pm`.
//!
//! Neither walk ever fails as a whole. Every entry that cannot be read is recorded as a
//! [`SkippedEntry`] and the walk moves on to its siblings.

#![forbid(unsafe_code)]

mod artifacts;
mod locate;

pub use artifacts::scan_artifacts;
pub use locate::locate_projects;

use std::fmt;

/// Why an entry was left out of a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Reading the directory or stat-ing the entry failed.
    Unreadable(String),
    /// The path is not valid UTF-8 and cannot be reported faithfully.
    NonUtf8Path,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(err) => write!(f, "unreadable: {err}"),
            SkipReason::NonUtf8Path => f.write_str("path is not valid UTF-8"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Lossy display form of the path.
    pub path: String,
    pub reason: SkipReason,
}

/// Result of a walk: what was found plus what had to be skipped on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversal<T> {
    pub found: Vec<T>,
    pub skipped: Vec<SkippedEntry>,
}

impl<T> Default for Traversal<T> {
    fn default() -> Self {
        Self {
            found: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Traversal<T> {
    fn skip(&mut self, path: impl Into<String>, reason: SkipReason) {
        let path = path.into();
        tracing::debug!(path = %path, reason = %reason, "skipping entry");
        self.skipped.push(SkippedEntry { path, reason });
    }
}
