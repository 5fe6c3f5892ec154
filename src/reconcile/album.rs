//! Album membership sync
//!
//! Adds assets the export places in an album but the catalog album lacks.
//! Members present remotely but absent locally are left alone.

use super::ReconciliationContext;
use crate::catalog::RemoteAlbum;
use crate::error::Result;
use crate::matcher::MatchResult;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use takeout_sync_common::{AlbumGrouping, TakeoutRecord};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedMember {
    pub id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumSyncReport {
    pub album: String,
    pub created: bool,
    /// The operator declined creation or the add batch.
    pub declined: bool,
    pub already_present: usize,
    /// Asset ids sent (or proposed) in the add batch, in discovery order.
    pub requested: Vec<String>,
    pub added: usize,
    pub failed: Vec<FailedMember>,
    pub not_found: usize,
    pub ambiguous: usize,
    pub search_errors: usize,
    /// A catalog call that abandoned the album's mutation.
    pub error: Option<String>,
}

impl AlbumSyncReport {
    fn new(album: &str) -> Self {
        Self {
            album: album.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlbumPhaseSummary {
    pub reports: Vec<AlbumSyncReport>,
}

impl AlbumPhaseSummary {
    pub fn albums_created(&self) -> usize {
        self.reports.iter().filter(|r| r.created).count()
    }

    pub fn assets_added(&self) -> usize {
        self.reports.iter().map(|r| r.added).sum()
    }

    pub fn assets_failed(&self) -> usize {
        self.reports.iter().map(|r| r.failed.len()).sum()
    }

    pub fn assets_not_found(&self) -> usize {
        self.reports.iter().map(|r| r.not_found).sum()
    }

    pub fn ambiguous(&self) -> usize {
        self.reports.iter().map(|r| r.ambiguous).sum()
    }
}

/// Sync every album of the grouping, creating the ones the catalog lacks.
///
/// Remote albums are matched by exact name; the first one listed wins.
pub async fn sync_albums(
    ctx: &mut ReconciliationContext<'_>,
    grouping: &AlbumGrouping,
) -> Result<AlbumPhaseSummary> {
    println!("Getting remote albums...");
    let remote_albums = ctx.catalog().list_albums().await?;
    println!("Total albums: {}", remote_albums.len());

    let mut summary = AlbumPhaseSummary::default();
    for (name, records) in grouping {
        let report = match remote_albums.iter().find(|a| &a.album_name == name) {
            Some(existing) => sync_existing(ctx, existing, records).await?,
            None => create_and_sync(ctx, name, records).await?,
        };
        summary.reports.push(report);
    }

    Ok(summary)
}

async fn sync_existing(
    ctx: &mut ReconciliationContext<'_>,
    listed: &RemoteAlbum,
    records: &[TakeoutRecord],
) -> Result<AlbumSyncReport> {
    let mut album = match ctx.catalog().get_album(&listed.id).await {
        Ok(album) => album,
        Err(e) => {
            warn!(album = %listed.album_name, error = %e, "cannot fetch album");
            let mut report = AlbumSyncReport::new(&listed.album_name);
            report.error = Some(e.to_string());
            return Ok(report);
        }
    };
    if album.album_name.is_empty() {
        album.album_name = listed.album_name.clone();
    }

    reconcile_album(ctx, records, &album, false).await
}

async fn create_and_sync(
    ctx: &mut ReconciliationContext<'_>,
    name: &str,
    records: &[TakeoutRecord],
) -> Result<AlbumSyncReport> {
    println!("Creating album: {}", name);
    if !ctx.confirm("Are you sure you want to create this album?", true, false)? {
        let mut report = AlbumSyncReport::new(name);
        report.declined = true;
        return Ok(report);
    }

    let created = match ctx.catalog().create_album(name).await {
        Ok(album) => album,
        Err(e) => {
            warn!(album = name, error = %e, "cannot create album");
            let mut report = AlbumSyncReport::new(name);
            report.error = Some(e.to_string());
            return Ok(report);
        }
    };
    println!("New album created: {}", created.id);

    // Creating the album was the explicit decision; the initial fill follows it.
    let empty = RemoteAlbum {
        assets: Vec::new(),
        ..created
    };
    let mut report = reconcile_album(ctx, records, &empty, true).await?;
    report.created = true;
    Ok(report)
}

/// Add the records missing from `remote` in one batch.
///
/// Records are searched by filename inside `[taken - 1 day, created + 1 day]`;
/// every candidate of an ambiguous search is added. The batch is confirmed
/// unless `auto_confirm` is set.
pub async fn reconcile_album(
    ctx: &mut ReconciliationContext<'_>,
    records: &[TakeoutRecord],
    remote: &RemoteAlbum,
    auto_confirm: bool,
) -> Result<AlbumSyncReport> {
    let name = remote.album_name.as_str();
    println!("Syncing album: {}", name);
    let mut report = AlbumSyncReport::new(name);

    let present: HashSet<&str> = remote
        .assets
        .iter()
        .map(|a| a.original_file_name.as_str())
        .collect();
    let member_ids: HashSet<&str> = remote.assets.iter().map(|a| a.id.as_str()).collect();

    let missing: Vec<&TakeoutRecord> = records
        .iter()
        .filter(|r| !present.contains(r.filename.as_str()))
        .collect();
    report.already_present = records.len() - missing.len();

    let matcher = ctx.matcher();
    let mut searched: HashSet<&str> = HashSet::new();
    let mut pending: HashSet<String> = HashSet::new();
    let progress = search_progress(missing.len() as u64);

    for record in missing {
        progress.inc(1);
        if !searched.insert(record.filename.as_str()) {
            continue;
        }

        let window = match record.search_window() {
            Ok(window) => Some(window),
            Err(e) => {
                debug!(filename = %record.filename, error = %e, "searching without date window");
                None
            }
        };

        let result = match matcher.resolve(&record.filename, window.as_ref()).await {
            Ok(result) => result,
            Err(e) => {
                report.search_errors += 1;
                warn!(album = name, filename = %record.filename, error = %e, "search failed");
                continue;
            }
        };

        match &result {
            MatchResult::NotFound => {
                report.not_found += 1;
                warn!(album = name, filename = %record.filename, "asset not found");
            }
            MatchResult::Ambiguous(candidates) => {
                report.ambiguous += 1;
                warn!(
                    album = name,
                    filename = %record.filename,
                    candidates = candidates.len(),
                    "several assets match, adding all"
                );
            }
            MatchResult::Unique(_) => {}
        }

        for asset in result.candidates() {
            if member_ids.contains(asset.id.as_str()) {
                continue;
            }
            if pending.insert(asset.id.clone()) {
                report.requested.push(asset.id.clone());
            }
        }
    }
    progress.finish_and_clear();

    if report.requested.is_empty() {
        println!("No new assets added to {}", name);
    } else {
        let prompt = format!("Add {} assets to {}?", report.requested.len(), name);
        if !auto_confirm && !ctx.confirm(&prompt, true, false)? {
            report.declined = true;
            println!("Skipped {}", name);
        } else {
            add_batch(ctx, remote, &mut report).await;
        }
    }

    if report.not_found > 0 {
        println!("Warning: {} assets not found", report.not_found);
    }

    Ok(report)
}

async fn add_batch(
    ctx: &mut ReconciliationContext<'_>,
    remote: &RemoteAlbum,
    report: &mut AlbumSyncReport,
) {
    let results = match ctx.catalog().add_members(&remote.id, &report.requested).await {
        Ok(results) => results,
        Err(e) => {
            warn!(album = %remote.album_name, error = %e, "adding assets failed");
            report.error = Some(e.to_string());
            return;
        }
    };

    for result in results {
        if result.success {
            report.added += 1;
        } else {
            println!("Error syncing asset: {}", result.id);
            report.failed.push(FailedMember {
                id: result.id,
                reason: result.error,
            });
        }
    }
    println!("Synced {} assets to {}", report.added, remote.album_name);
}

fn search_progress(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("Searching files {bar:30} {pos}/{len}") {
        progress.set_style(style);
    }
    progress
}
