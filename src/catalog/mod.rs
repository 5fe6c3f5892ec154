//! Remote catalog access
//!
//! `CatalogClient` is the seam the reconcilers talk through; `ImmichClient`
//! is the HTTP implementation.

mod http;
pub mod types;

pub use http::ImmichClient;
pub use types::{
    AlbumMember, AssetType, CurrentUser, MemberResult, RemoteAlbum, RemoteAsset, SearchQuery,
};

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn current_user(&self) -> Result<CurrentUser>;

    async fn list_albums(&self) -> Result<Vec<RemoteAlbum>>;

    /// Album with its member list.
    async fn get_album(&self, album_id: &str) -> Result<RemoteAlbum>;

    async fn create_album(&self, name: &str) -> Result<RemoteAlbum>;

    /// Append assets to an album. Returns one result per requested id.
    async fn add_members(&self, album_id: &str, asset_ids: &[String]) -> Result<Vec<MemberResult>>;

    /// All assets matching the query, across every result page.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RemoteAsset>>;

    /// Overwrite the asset's original capture time.
    async fn update_asset_date(&self, asset_id: &str, taken_at: &DateTime<Utc>) -> Result<()>;
}
