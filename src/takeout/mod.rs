//! Export metadata index
//!
//! Two views of the same export:
//! - per album: directories carrying a titled `metadata.json`
//! - whole library: every supplemental sidecar, recursively

pub mod walker;

use crate::error::Result;
use std::path::Path;
use takeout_sync_common::{AlbumGrouping, Sidecar, TakeoutRecord};
use tracing::debug;
use walker::{
    is_item_sidecar, is_supplemental_sidecar, list_dir, read_sidecar, walk_sidecars, Scope,
    ALBUM_METADATA, SUPPLEMENTAL_SUFFIX,
};

#[derive(Debug, Clone, Default)]
pub struct AlbumIndex {
    pub albums: AlbumGrouping,
    /// Album directories found; directories sharing a title merge into one grouping.
    pub albums_found: usize,
    pub skipped_sidecars: usize,
}

impl AlbumIndex {
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.albums.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    pub records: Vec<TakeoutRecord>,
    pub skipped_sidecars: usize,
}

impl LibraryIndex {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group the export by album.
///
/// Each top-level entry with a `metadata.json` declaring a non-empty title is
/// an album; its item sidecars become records named by their own `title`.
pub fn build_album_index(root: &Path) -> Result<AlbumIndex> {
    let mut index = AlbumIndex::default();

    for entry in list_dir(root)? {
        let album_title = match read_sidecar(&entry.join(ALBUM_METADATA)) {
            Ok(sidecar) => match sidecar.title() {
                Some(title) => title.to_string(),
                None => continue,
            },
            Err(e) => {
                debug!(path = %entry.display(), error = %e, "not an album directory");
                continue;
            }
        };

        index.albums_found += 1;
        let records = index.albums.entry(album_title).or_default();

        let skipped = walk_sidecars(&entry, Scope::Shallow, is_item_sidecar, |path, sidecar| {
            let Some(filename) = sidecar.title().map(str::to_string) else {
                debug!(path = %path.display(), "item sidecar without title");
                return;
            };
            records.push(sidecar.into_record(filename));
        })?;
        index.skipped_sidecars += skipped;
    }

    Ok(index)
}

/// Flatten the whole export into records named after their sidecar file.
///
/// Only directories under the root are walked. Sidecars without a title or
/// without a capture time are dropped.
pub fn build_library_index(root: &Path) -> Result<LibraryIndex> {
    let mut index = LibraryIndex::default();

    for entry in list_dir(root)? {
        if !entry.is_dir() {
            continue;
        }

        let records = &mut index.records;
        let visit = |path: &Path, sidecar: Sidecar| {
            if sidecar.title().is_none() || !sidecar.has_taken_time() {
                return;
            }
            if let Some(filename) = asset_filename(path) {
                records.push(sidecar.into_record(filename));
            }
        };
        let skipped = walk_sidecars(&entry, Scope::Recursive, is_supplemental_sidecar, visit)?;
        index.skipped_sidecars += skipped;
    }

    Ok(index)
}

/// `IMG_0001.jpg.supplemental-metadata.json` -> `IMG_0001.jpg`
fn asset_filename(sidecar_path: &Path) -> Option<String> {
    let name = sidecar_path.file_name()?.to_str()?;
    name.strip_suffix(SUPPLEMENTAL_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
