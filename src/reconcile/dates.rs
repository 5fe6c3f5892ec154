//! Capture-date correction
//!
//! A remote asset is corrected when its stored capture day (UTC) differs from
//! the export's `photoTakenTime` day. Time-of-day differences alone are left
//! as they are. Every correction is a required confirmation.

use super::ReconciliationContext;
use crate::catalog::{RemoteAsset, SearchQuery};
use crate::error::Result;
use crate::matcher::MatchResult;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use takeout_sync_common::{format_catalog_time, same_utc_day, TakeoutRecord};
use tracing::warn;

const UPDATE_PROMPT: &str = "Are you sure you want to update this file?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCorrection {
    pub asset_id: String,
    pub filename: String,
    /// Catalog value being replaced, as stored.
    pub current: String,
    pub target: DateTime<Utc>,
}

impl DateCorrection {
    pub fn target_value(&self) -> String {
        format_catalog_time(&self.target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSyncReport {
    pub examined: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub ambiguous: usize,
    /// Local or remote timestamp could not be parsed.
    pub unparsable: usize,
    pub declined: usize,
    pub failed: usize,
    /// Single-day mode: remote asset without an export record.
    pub no_local_match: usize,
    pub search_errors: usize,
}

/// Compare the export capture day with the catalog's and propose the export
/// time when they differ.
pub fn propose_correction(
    record: &TakeoutRecord,
    asset: &RemoteAsset,
) -> takeout_sync_common::Result<Option<DateCorrection>> {
    let taken = record.taken_at()?;
    let stored = asset.created_at()?;

    if same_utc_day(&taken, &stored) {
        return Ok(None);
    }

    Ok(Some(DateCorrection {
        asset_id: asset.id.clone(),
        filename: record.filename.clone(),
        current: asset.file_created_at.clone(),
        target: taken,
    }))
}

/// Check every export record. Only records resolving to exactly one asset are
/// corrected.
pub async fn sync_all_dates(
    ctx: &mut ReconciliationContext<'_>,
    records: &[TakeoutRecord],
) -> Result<DateSyncReport> {
    println!("Syncing files dates...");
    let matcher = ctx.matcher();
    let mut report = DateSyncReport::default();

    for record in records {
        report.examined += 1;

        if let Err(e) = record.taken_at() {
            report.unparsable += 1;
            warn!(filename = %record.filename, error = %e, "unparsable capture time, skipping");
            continue;
        }

        match matcher.resolve(&record.filename, None).await {
            Ok(MatchResult::NotFound) => {
                report.not_found += 1;
                println!("Asset not found: {}", record.filename);
            }
            Ok(MatchResult::Ambiguous(_)) => {
                report.ambiguous += 1;
                println!("More than one asset found: {}", record.filename);
            }
            Ok(MatchResult::Unique(asset)) => {
                apply_correction(ctx, record, &asset, &mut report).await?;
            }
            Err(e) => {
                report.search_errors += 1;
                warn!(filename = %record.filename, error = %e, "search failed");
            }
        }
    }

    Ok(report)
}

/// Check the assets the catalog holds for one UTC day against the export.
///
/// Optional-prompt suppression is switched off for the duration: the assets
/// here were picked by the catalog, not reviewed by the operator.
pub async fn sync_day(
    ctx: &mut ReconciliationContext<'_>,
    records: &[TakeoutRecord],
    date: NaiveDate,
) -> Result<DateSyncReport> {
    let previous = ctx.confirmer().suppress_optional();
    ctx.confirmer().set_suppress_optional(false);
    let result = sync_day_inner(ctx, records, date).await;
    ctx.confirmer().set_suppress_optional(previous);
    result
}

async fn sync_day_inner(
    ctx: &mut ReconciliationContext<'_>,
    records: &[TakeoutRecord],
    date: NaiveDate,
) -> Result<DateSyncReport> {
    println!("Syncing files by date: {}", date);
    let mut report = DateSyncReport::default();

    let assets = match ctx.catalog().search(&SearchQuery::within_day(date)).await {
        Ok(assets) => assets,
        Err(e) => {
            report.search_errors += 1;
            warn!(%date, error = %e, "search failed");
            return Ok(report);
        }
    };
    if assets.is_empty() {
        println!("No assets found for date: {}", date);
        return Ok(report);
    }
    println!("Found {} assets for date: {}", assets.len(), date);

    let mut by_name: HashMap<&str, &TakeoutRecord> = HashMap::new();
    for record in records {
        by_name.entry(record.filename.as_str()).or_insert(record);
    }

    for asset in &assets {
        report.examined += 1;
        match by_name.get(asset.original_file_name.as_str()) {
            Some(record) => apply_correction(ctx, record, asset, &mut report).await?,
            None => {
                report.no_local_match += 1;
                println!(
                    "No matching file found in takeout for asset: {}",
                    asset.original_file_name
                );
            }
        }
    }

    Ok(report)
}

async fn apply_correction(
    ctx: &mut ReconciliationContext<'_>,
    record: &TakeoutRecord,
    asset: &RemoteAsset,
    report: &mut DateSyncReport,
) -> Result<()> {
    let correction = match propose_correction(record, asset) {
        Ok(Some(correction)) => correction,
        Ok(None) => {
            report.unchanged += 1;
            println!("No update needed for {}", record.filename);
            return Ok(());
        }
        Err(e) => {
            report.unparsable += 1;
            warn!(
                filename = %record.filename,
                asset = %asset.id,
                error = %e,
                "cannot compare dates, skipping"
            );
            return Ok(());
        }
    };

    println!(
        "Updating {}: {} -> {}",
        correction.filename,
        correction.current,
        correction.target_value()
    );
    if !ctx.confirm(UPDATE_PROMPT, false, true)? {
        report.declined += 1;
        return Ok(());
    }

    match ctx
        .catalog()
        .update_asset_date(&correction.asset_id, &correction.target)
        .await
    {
        Ok(()) => report.updated += 1,
        Err(e) => {
            report.failed += 1;
            warn!(asset = %correction.asset_id, error = %e, "date update failed");
        }
    }
    Ok(())
}
