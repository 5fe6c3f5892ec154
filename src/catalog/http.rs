use super::types::{
    CurrentUser, MemberResult, RemoteAlbum, RemoteAsset, SearchQuery, SearchResponse,
};
use super::CatalogClient;
use crate::config::Config;
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::time::Duration;
use takeout_sync_common::format_catalog_time;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-api-key";

/// JSON/HTTP client for the Immich API.
#[derive(Clone)]
pub struct ImmichClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for ImmichClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmichClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ImmichClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_url,
            &config.api_key,
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.build_url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SyncError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| SyncError::ApiParse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        self.send_json(self.request(Method::GET, path)).await
    }

    async fn with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(%method, path, "request");
        self.send_json(self.request(method, path).json(body)).await
    }
}

#[async_trait]
impl CatalogClient for ImmichClient {
    async fn current_user(&self) -> Result<CurrentUser> {
        self.get("users/me").await
    }

    async fn list_albums(&self) -> Result<Vec<RemoteAlbum>> {
        self.get("albums").await
    }

    async fn get_album(&self, album_id: &str) -> Result<RemoteAlbum> {
        self.get(&format!("albums/{}", album_id)).await
    }

    async fn create_album(&self, name: &str) -> Result<RemoteAlbum> {
        let mut album: RemoteAlbum = self
            .with_body(Method::POST, "albums", &json!({ "albumName": name }))
            .await?;
        if album.album_name.is_empty() {
            album.album_name = name.to_string();
        }
        Ok(album)
    }

    async fn add_members(
        &self,
        album_id: &str,
        asset_ids: &[String],
    ) -> Result<Vec<MemberResult>> {
        self.with_body(
            Method::PUT,
            &format!("albums/{}/assets", album_id),
            &json!({ "ids": asset_ids }),
        )
        .await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RemoteAsset>> {
        let mut query = query.clone();
        let mut assets = Vec::new();

        loop {
            let response: SearchResponse = self
                .with_body(Method::POST, "search/metadata", &query)
                .await?;
            assets.extend(response.assets.items);

            let Some(next) = response.assets.next_page else {
                break;
            };
            let current = query.page.unwrap_or(1);
            match next.parse::<u32>() {
                Ok(page) if page > current => query.page = Some(page),
                _ => {
                    warn!(next_page = %next, current, "unexpected search cursor, stopping");
                    break;
                }
            }
        }

        Ok(assets)
    }

    async fn update_asset_date(&self, asset_id: &str, taken_at: &DateTime<Utc>) -> Result<()> {
        let body = json!({ "dateTimeOriginal": format_catalog_time(taken_at) });
        let request = self
            .request(Method::PUT, &format!("assets/{}", asset_id))
            .json(&body);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_normalises_slashes() {
        let client =
            ImmichClient::new("http://immich.local/api/", "k", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://immich.local/api");
        assert_eq!(client.build_url("albums"), "http://immich.local/api/albums");
        assert_eq!(client.build_url("/users/me"), "http://immich.local/api/users/me");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client =
            ImmichClient::new("http://immich.local/api", "secret-key", Duration::from_secs(5))
                .unwrap();
        let printed = format!("{:?}", client);
        assert!(printed.contains("http://immich.local/api"));
        assert!(!printed.contains("secret-key"));
    }
}
