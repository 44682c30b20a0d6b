use crate::{SkipReason, Traversal};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use wormguard_domain::model::SensitiveArtifact;
use wormguard_domain::policy::{IndicatorSet, ScanLayout};
use wormguard_types::RepoPath;

/// State carried down the walk. Each directory hands a copy to its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct WalkState {
    /// Set once an install directory has been entered; stays set for all descendants.
    inside_install_dir: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    /// Symlinks and special files. Never followed, never reported.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Descend(WalkState),
    Report,
    Ignore,
}

/// Walk the whole tree under `root` and report indicator files inside install directories.
///
/// Files are only reported once the walk is inside an install directory, so a `cloud.json`
/// that belongs to the project itself is not flagged. Hidden directories are skipped except
/// the package manager's store directory, where installed packages may live. Symlinks are
/// inspected with `symlink_metadata` and never followed.
pub fn scan_artifacts(
    root: &Utf8Path,
    layout: &ScanLayout,
    indicators: &IndicatorSet,
) -> Traversal<SensitiveArtifact> {
    let mut out = Traversal::default();
    scan_dir(root, root, layout, indicators, WalkState::default(), &mut out);
    out
}

fn scan_dir(
    root: &Utf8Path,
    dir: &Utf8Path,
    layout: &ScanLayout,
    indicators: &IndicatorSet,
    state: WalkState,
    out: &mut Traversal<SensitiveArtifact>,
) {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(err) => {
            out.skip(dir.to_string(), SkipReason::Unreadable(err.to_string()));
            return;
        }
    };

    let mut entries = Vec::new();
    for entry in read {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => out.skip(dir.to_string(), SkipReason::Unreadable(err.to_string())),
        }
    }
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
            out.skip(
                entry.path().to_string_lossy().into_owned(),
                SkipReason::NonUtf8Path,
            );
            continue;
        };
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(err) => {
                out.skip(path.to_string(), SkipReason::Unreadable(err.to_string()));
                continue;
            }
        };
        let kind = if meta.file_type().is_dir() {
            EntryKind::Dir
        } else if meta.file_type().is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let Some(name) = path.file_name() else {
            continue;
        };

        match step(state, name, kind, layout, indicators) {
            Step::Descend(next) => scan_dir(root, &path, layout, indicators, next, out),
            Step::Report => {
                tracing::debug!(path = %path, "sensitive artifact");
                let relative = RepoPath::relative_to(root, &path);
                out.found.push(SensitiveArtifact { path, relative });
            }
            Step::Ignore => {}
        }
    }
}

/// Decide what to do with one entry. Pure.
fn step(
    state: WalkState,
    name: &str,
    kind: EntryKind,
    layout: &ScanLayout,
    indicators: &IndicatorSet,
) -> Step {
    match kind {
        EntryKind::Dir if layout.is_install_dir(name) => Step::Descend(WalkState {
            inside_install_dir: true,
        }),
        EntryKind::Dir if name.starts_with('.') && !layout.is_store_dir(name) => Step::Ignore,
        EntryKind::Dir => Step::Descend(state),
        EntryKind::File if state.inside_install_dir && indicators.contains(name) => Step::Report,
        EntryKind::File | EntryKind::Other => Step::Ignore,
    }
}
