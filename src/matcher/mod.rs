//! Filename + capture-window lookup against the catalog.

use crate::catalog::{CatalogClient, RemoteAsset, SearchQuery};
use crate::error::Result;
use takeout_sync_common::DateWindow;
use tracing::debug;

/// Outcome of resolving one export record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NotFound,
    Unique(RemoteAsset),
    Ambiguous(Vec<RemoteAsset>),
}

impl MatchResult {
    pub fn from_candidates(mut candidates: Vec<RemoteAsset>) -> Self {
        match candidates.len() {
            0 => MatchResult::NotFound,
            1 => MatchResult::Unique(candidates.remove(0)),
            _ => MatchResult::Ambiguous(candidates),
        }
    }

    /// Every candidate, whatever the outcome.
    pub fn candidates(&self) -> &[RemoteAsset] {
        match self {
            MatchResult::NotFound => &[],
            MatchResult::Unique(asset) => std::slice::from_ref(asset),
            MatchResult::Ambiguous(assets) => assets,
        }
    }
}

/// Resolves export filenames to catalog assets.
///
/// The matcher only classifies; callers decide what an ambiguous result means.
pub struct AssetMatcher<'a> {
    catalog: &'a dyn CatalogClient,
}

impl<'a> AssetMatcher<'a> {
    pub fn new(catalog: &'a dyn CatalogClient) -> Self {
        Self { catalog }
    }

    pub async fn resolve(
        &self,
        filename: &str,
        window: Option<&DateWindow>,
    ) -> Result<MatchResult> {
        let query = SearchQuery::by_filename(filename, window);
        let candidates = self.catalog.search(&query).await?;
        debug!(
            filename,
            window = ?window.map(ToString::to_string),
            candidates = candidates.len(),
            "resolved"
        );
        Ok(MatchResult::from_candidates(candidates))
    }
}
