use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use takeout_sync_common::{day_bounds, parse_catalog_time, DateWindow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Image,
    Video,
    Audio,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteAsset {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub original_file_name: String,
    pub original_mime_type: String,
    /// Raw catalog value; parsed on demand so a bad value only affects its asset.
    pub file_created_at: String,
}

impl RemoteAsset {
    pub fn created_at(&self) -> takeout_sync_common::Result<DateTime<Utc>> {
        parse_catalog_time(&self.file_created_at)
    }
}

/// Album member as listed by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumMember {
    pub id: String,
    pub original_file_name: String,
    pub original_mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteAlbum {
    pub id: String,
    pub album_name: String,
    pub owner_id: String,
    pub assets: Vec<AlbumMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberResult {
    pub id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
}

/// Body of `POST search/metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SearchQuery {
    /// Exact filename, optionally limited to an inclusive date window.
    pub fn by_filename(filename: &str, window: Option<&DateWindow>) -> Self {
        Self {
            original_file_name: Some(filename.to_string()),
            taken_after: window.map(DateWindow::after_param),
            taken_before: window.map(DateWindow::before_param),
            page: None,
        }
    }

    /// Everything captured on one UTC day.
    pub fn within_day(date: NaiveDate) -> Self {
        let (after, before) = day_bounds(date);
        Self {
            original_file_name: None,
            taken_after: Some(after),
            taken_before: Some(before),
            page: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub assets: SearchPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPage {
    pub items: Vec<RemoteAsset>,
    pub next_page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_query_by_filename() {
        let query = SearchQuery::by_filename("img1.jpg", None);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"originalFileName": "img1.jpg"})
        );

        let window = DateWindow {
            after: NaiveDate::from_ymd_opt(2023, 5, 31).unwrap(),
            before: NaiveDate::from_ymd_opt(2023, 6, 2).unwrap(),
        };
        let query = SearchQuery::by_filename("img1.jpg", Some(&window));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "originalFileName": "img1.jpg",
                "takenAfter": "2023-05-31",
                "takenBefore": "2023-06-02"
            })
        );
    }

    #[test]
    fn test_search_query_within_day() {
        let query = SearchQuery::within_day(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "takenAfter": "2023-06-01T00:00:00Z",
                "takenBefore": "2023-06-01T23:59:59Z"
            })
        );
    }

    #[test]
    fn test_search_response_parse() {
        let body = json!({
            "albums": {"total": 0, "count": 0, "items": []},
            "assets": {
                "total": 1,
                "count": 1,
                "nextPage": null,
                "items": [{
                    "id": "a1",
                    "type": "IMAGE",
                    "originalFileName": "img1.jpg",
                    "originalMimeType": "image/jpeg",
                    "fileCreatedAt": "2023-06-01T10:00:00.000Z",
                    "isFavorite": false
                }]
            }
        });
        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.assets.items.len(), 1);
        let asset = &response.assets.items[0];
        assert_eq!(asset.asset_type, AssetType::Image);
        assert!(asset.created_at().is_ok());
        assert!(response.assets.next_page.is_none());
    }

    #[test]
    fn test_unknown_asset_type() {
        let asset: RemoteAsset =
            serde_json::from_value(json!({"id": "x", "type": "HOLOGRAM"})).unwrap();
        assert_eq!(asset.asset_type, AssetType::Other);
    }
}
