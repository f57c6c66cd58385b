//! Candidate file discovery under the policy-cache root.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Recursively list `*.xml` files under `root`, in stable sorted order.
///
/// Symlinks are not followed. Entries that cannot be read are skipped so the
/// reachable part of the tree still gets scanned.
pub fn xml_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        warn!(root = %root.display(), "scan root does not exist");
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    files.sort();
    files
}
