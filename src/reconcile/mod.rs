//! Reconciliation of the export against the catalog
//!
//! - album: additive album membership sync
//! - dates: capture-date corrections
//!
//! Both only ever add album members or rewrite `dateTimeOriginal`; nothing
//! remote is removed.

pub mod album;
pub mod dates;

pub use album::{reconcile_album, sync_albums, AlbumPhaseSummary, AlbumSyncReport, FailedMember};
pub use dates::{propose_correction, sync_all_dates, sync_day, DateCorrection, DateSyncReport};

use crate::catalog::CatalogClient;
use crate::confirm::Confirmer;
use crate::error::Result;
use crate::matcher::AssetMatcher;

/// State owned by one reconciliation run.
pub struct ReconciliationContext<'a> {
    catalog: &'a dyn CatalogClient,
    confirmer: &'a mut dyn Confirmer,
}

impl<'a> ReconciliationContext<'a> {
    pub fn new(catalog: &'a dyn CatalogClient, confirmer: &'a mut dyn Confirmer) -> Self {
        Self { catalog, confirmer }
    }

    pub fn catalog(&self) -> &'a dyn CatalogClient {
        self.catalog
    }

    pub fn matcher(&self) -> AssetMatcher<'a> {
        AssetMatcher::new(self.catalog)
    }

    pub fn confirm(&mut self, prompt: &str, default: bool, required: bool) -> Result<bool> {
        self.confirmer.ask(prompt, default, required)
    }

    pub fn confirmer(&mut self) -> &mut dyn Confirmer {
        &mut *self.confirmer
    }
}
