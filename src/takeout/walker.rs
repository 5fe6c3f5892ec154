//! Sidecar traversal shared by the album and library indexes.

use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};
use takeout_sync_common::Sidecar;
use tracing::debug;
use walkdir::WalkDir;

pub const ALBUM_METADATA: &str = "metadata.json";
pub const SIDECAR_SUFFIX: &str = ".json";
pub const SUPPLEMENTAL_SUFFIX: &str = ".supplemental-metadata.json";

/// How far below the starting directory to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Direct children only.
    Shallow,
    /// Every descendant.
    Recursive,
}

/// Item sidecar inside an album directory.
pub fn is_item_sidecar(name: &str) -> bool {
    name != ALBUM_METADATA && name.ends_with(SIDECAR_SUFFIX)
}

/// Per-asset supplemental sidecar anywhere in the library.
pub fn is_supplemental_sidecar(name: &str) -> bool {
    name != ALBUM_METADATA && name.ends_with(SUPPLEMENTAL_SUFFIX)
}

pub fn read_sidecar(path: &Path) -> takeout_sync_common::Result<Sidecar> {
    let content = std::fs::read_to_string(path)?;
    Sidecar::from_json(&content)
}

/// Sorted entries directly under `dir`. Failing to list it is fatal.
pub fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| SyncError::ExportRead {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SyncError::ExportRead {
            path: dir.display().to_string(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Visit every sidecar under `dir` whose file name passes `accept`.
///
/// Directory listing failures abort the walk. A sidecar that cannot be read or
/// parsed is skipped and counted; the count is returned.
pub fn walk_sidecars<P, F>(dir: &Path, scope: Scope, accept: P, mut visit: F) -> Result<usize>
where
    P: Fn(&str) -> bool,
    F: FnMut(&Path, Sidecar),
{
    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if scope == Scope::Shallow {
        walker = walker.max_depth(1);
    }

    let mut skipped = 0;
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !accept(&name) {
            continue;
        }

        match read_sidecar(entry.path()) {
            Ok(sidecar) => visit(entry.path(), sidecar),
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "skipping sidecar");
                skipped += 1;
            }
        }
    }

    Ok(skipped)
}
