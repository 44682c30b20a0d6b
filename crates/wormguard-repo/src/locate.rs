use crate::{SkipReason, Traversal};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::ErrorKind;
use walkdir::{DirEntry, WalkDir};
use wormguard_domain::model::ProjectRoot;
use wormguard_domain::policy::ScanLayout;
use wormguard_types::RepoPath;

/// Find every directory under `root` (inclusive) that directly contains the lockfile.
///
/// Behavior:
/// - depth-first, pre-order, siblings in file-name order
/// - never descends into the install directory or hidden directories (the root itself is
///   always visited, whatever its name)
/// - symlinked directories are not followed
/// - unreadable subtrees are recorded and skipped; everything else is still returned
pub fn locate_projects(root: &Utf8Path, layout: &ScanLayout) -> Traversal<ProjectRoot> {
    let mut out = Traversal::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e, layout));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.to_string());
                out.skip(path, SkipReason::Unreadable(err.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(dir) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            out.skip(
                entry.path().to_string_lossy().into_owned(),
                SkipReason::NonUtf8Path,
            );
            continue;
        };

        match std::fs::symlink_metadata(dir.join(&layout.lockfile)) {
            Ok(_) => {
                tracing::debug!(project = %dir, "found project root");
                let relative = RepoPath::relative_to(root, &dir);
                out.found.push(ProjectRoot {
                    path: dir,
                    relative,
                });
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => out.skip(dir.to_string(), SkipReason::Unreadable(err.to_string())),
        }
    }

    out
}

fn is_excluded_dir(entry: &DirEntry, layout: &ScanLayout) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    layout.is_install_dir(&name) || name.starts_with('.')
}

fn pathbuf_to_utf8(path: std::path::PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
