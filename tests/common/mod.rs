//! In-memory catalog and scripted confirmer shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use takeout_sync::catalog::{
    AlbumMember, CatalogClient, CurrentUser, MemberResult, RemoteAlbum, RemoteAsset, SearchQuery,
};
use takeout_sync::confirm::Confirmer;
use takeout_sync::error::{Result, SyncError};
use takeout_sync_common::format_catalog_time;

#[derive(Debug, Default)]
pub struct CatalogState {
    pub assets: Vec<RemoteAsset>,
    pub albums: Vec<RemoteAlbum>,
    pub searches: Vec<SearchQuery>,
    pub add_calls: Vec<(String, Vec<String>)>,
    pub created_albums: Vec<String>,
    pub date_updates: Vec<(String, String)>,
    /// Ids the catalog refuses to add.
    pub rejected_ids: HashSet<String>,
    pub fail_searches: bool,
    pub fail_updates: bool,
}

#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub state: Mutex<CatalogState>,
}

impl FakeCatalog {
    pub fn new(assets: Vec<RemoteAsset>, albums: Vec<RemoteAlbum>) -> Self {
        Self {
            state: Mutex::new(CatalogState {
                assets,
                albums,
                ..Default::default()
            }),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn add_calls(&self) -> Vec<(String, Vec<String>)> {
        self.with(|s| s.add_calls.clone())
    }

    pub fn searches(&self) -> Vec<SearchQuery> {
        self.with(|s| s.searches.clone())
    }

    pub fn date_updates(&self) -> Vec<(String, String)> {
        self.with(|s| s.date_updates.clone())
    }

    pub fn album(&self, name: &str) -> Option<RemoteAlbum> {
        self.with(|s| s.albums.iter().find(|a| a.album_name == name).cloned())
    }
}

/// `YYYY-MM-DD` prefix comparison is enough for the fake's date filters.
fn within(value: &str, after: Option<&String>, before: Option<&String>) -> bool {
    let day = value.get(..10).unwrap_or(value);
    after.map_or(true, |a| day >= a.get(..10).unwrap_or(a.as_str()))
        && before.map_or(true, |b| day <= b.get(..10).unwrap_or(b.as_str()))
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn current_user(&self) -> Result<CurrentUser> {
        Ok(CurrentUser {
            id: "u1".into(),
            name: "Tester".into(),
        })
    }

    async fn list_albums(&self) -> Result<Vec<RemoteAlbum>> {
        // The listing carries no members, like the real endpoint.
        Ok(self.with(|s| {
            s.albums
                .iter()
                .map(|a| RemoteAlbum {
                    assets: Vec::new(),
                    ..a.clone()
                })
                .collect()
        }))
    }

    async fn get_album(&self, album_id: &str) -> Result<RemoteAlbum> {
        self.with(|s| s.albums.iter().find(|a| a.id == album_id).cloned())
            .ok_or(SyncError::Api {
                status: 404,
                body: "album not found".into(),
            })
    }

    async fn create_album(&self, name: &str) -> Result<RemoteAlbum> {
        Ok(self.with(|s| {
            let album = RemoteAlbum {
                id: format!("album-{}", s.albums.len() + 1),
                album_name: name.to_string(),
                owner_id: "u1".into(),
                assets: Vec::new(),
            };
            s.albums.push(album.clone());
            s.created_albums.push(name.to_string());
            album
        }))
    }

    async fn add_members(&self, album_id: &str, asset_ids: &[String]) -> Result<Vec<MemberResult>> {
        Ok(self.with(|s| {
            s.add_calls.push((album_id.to_string(), asset_ids.to_vec()));
            let mut results = Vec::new();
            for id in asset_ids {
                if s.rejected_ids.contains(id) {
                    results.push(MemberResult {
                        id: id.clone(),
                        success: false,
                        error: Some("no_permission".into()),
                    });
                    continue;
                }
                let member = s
                    .assets
                    .iter()
                    .find(|a| &a.id == id)
                    .map(|a| AlbumMember {
                        id: a.id.clone(),
                        original_file_name: a.original_file_name.clone(),
                        original_mime_type: a.original_mime_type.clone(),
                    });
                if let (Some(member), Some(album)) =
                    (member, s.albums.iter_mut().find(|a| a.id == album_id))
                {
                    album.assets.push(member);
                }
                results.push(MemberResult {
                    id: id.clone(),
                    success: true,
                    error: None,
                });
            }
            results
        }))
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RemoteAsset>> {
        self.with(|s| {
            s.searches.push(query.clone());
            if s.fail_searches {
                return Err(SyncError::Api {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(s.assets
                .iter()
                .filter(|a| {
                    query
                        .original_file_name
                        .as_ref()
                        .map_or(true, |name| &a.original_file_name == name)
                })
                .filter(|a| {
                    within(
                        &a.file_created_at,
                        query.taken_after.as_ref(),
                        query.taken_before.as_ref(),
                    )
                })
                .cloned()
                .collect())
        })
    }

    async fn update_asset_date(&self, asset_id: &str, taken_at: &DateTime<Utc>) -> Result<()> {
        self.with(|s| {
            if s.fail_updates {
                return Err(SyncError::Api {
                    status: 400,
                    body: "bad request".into(),
                });
            }
            let value = format_catalog_time(taken_at);
            s.date_updates.push((asset_id.to_string(), value.clone()));
            if let Some(asset) = s.assets.iter_mut().find(|a| a.id == asset_id) {
                asset.file_created_at = value;
            }
            Ok(())
        })
    }
}

/// Answers from a script, then falls back to `fallback`.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    pub answers: VecDeque<bool>,
    pub fallback: bool,
    pub suppress: bool,
    /// Prompts actually shown, with their `required` flag.
    pub asked: Vec<(String, bool)>,
    /// Suppression states observed at each shown prompt.
    pub suppress_seen: Vec<bool>,
}

impl ScriptedConfirmer {
    pub fn always(answer: bool) -> Self {
        Self {
            fallback: answer,
            ..Default::default()
        }
    }

    pub fn scripted(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn suppressing(mut self) -> Self {
        self.suppress = true;
        self
    }
}

impl Confirmer for ScriptedConfirmer {
    fn ask(&mut self, prompt: &str, _default: bool, required: bool) -> Result<bool> {
        if !required && self.suppress {
            return Ok(true);
        }
        self.asked.push((prompt.to_string(), required));
        self.suppress_seen.push(self.suppress);
        Ok(self.answers.pop_front().unwrap_or(self.fallback))
    }

    fn set_suppress_optional(&mut self, suppress: bool) {
        self.suppress = suppress;
    }

    fn suppress_optional(&self) -> bool {
        self.suppress
    }
}

pub fn asset(id: &str, filename: &str, file_created_at: &str) -> RemoteAsset {
    RemoteAsset {
        id: id.into(),
        original_file_name: filename.into(),
        original_mime_type: "image/jpeg".into(),
        file_created_at: file_created_at.into(),
        ..Default::default()
    }
}

pub fn album(id: &str, name: &str, members: &[&RemoteAsset]) -> RemoteAlbum {
    RemoteAlbum {
        id: id.into(),
        album_name: name.into(),
        owner_id: "u1".into(),
        assets: members
            .iter()
            .map(|a| AlbumMember {
                id: a.id.clone(),
                original_file_name: a.original_file_name.clone(),
                original_mime_type: a.original_mime_type.clone(),
            })
            .collect(),
    }
}
