//! Export record types
//!
//! - Sidecar: raw JSON shape of a takeout metadata file
//! - TakeoutRecord: one exported asset, normalised from its sidecar
//! - AlbumGrouping: album title -> records

use crate::error::Result;
use crate::timestamp::{parse_epoch, DateWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `{"timestamp": "1685613600", ...}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SidecarTime {
    pub timestamp: String,
}

/// Sidecar JSON as written by the export, per item or per album.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sidecar {
    pub title: Option<String>,
    pub creation_time: SidecarTime,
    pub photo_taken_time: SidecarTime,
}

impl Sidecar {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// The title, treating an empty string the same as a missing one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn has_taken_time(&self) -> bool {
        !self.photo_taken_time.timestamp.is_empty()
    }

    pub fn into_record(self, filename: String) -> TakeoutRecord {
        TakeoutRecord {
            filename,
            creation_time: self.creation_time.timestamp,
            photo_taken_time: self.photo_taken_time.timestamp,
        }
    }
}

/// One exported asset. Timestamps are kept as the raw epoch strings so a bad
/// value is reported where it is used rather than dropping the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeoutRecord {
    pub filename: String,
    pub creation_time: String,
    pub photo_taken_time: String,
}

impl TakeoutRecord {
    pub fn new(
        filename: impl Into<String>,
        creation_time: impl Into<String>,
        photo_taken_time: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            creation_time: creation_time.into(),
            photo_taken_time: photo_taken_time.into(),
        }
    }

    pub fn taken_at(&self) -> Result<DateTime<Utc>> {
        parse_epoch(&self.photo_taken_time)
    }

    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        parse_epoch(&self.creation_time)
    }

    /// Capture window used when looking the record up in the catalog.
    pub fn search_window(&self) -> Result<DateWindow> {
        DateWindow::around(&self.taken_at()?, &self.created_at()?)
    }
}

/// Album title -> records. Ordered so progress output is stable between runs.
pub type AlbumGrouping = BTreeMap<String, Vec<TakeoutRecord>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_full() {
        let json = r#"{
            "title": "IMG_0001.jpg",
            "description": "",
            "creationTime": {"timestamp": "1685613900", "formatted": "Jun 1, 2023"},
            "photoTakenTime": {"timestamp": "1685613600", "formatted": "Jun 1, 2023"}
        }"#;
        let sidecar = Sidecar::from_json(json).unwrap();
        assert_eq!(sidecar.title(), Some("IMG_0001.jpg"));
        assert!(sidecar.has_taken_time());

        let record = sidecar.into_record("IMG_0001.jpg".into());
        assert_eq!(record.creation_time, "1685613900");
        assert_eq!(record.photo_taken_time, "1685613600");
    }

    #[test]
    fn test_sidecar_empty_title_is_absent() {
        let sidecar = Sidecar::from_json(r#"{"title": ""}"#).unwrap();
        assert_eq!(sidecar.title(), None);

        let sidecar = Sidecar::from_json("{}").unwrap();
        assert_eq!(sidecar.title(), None);
        assert!(!sidecar.has_taken_time());
    }

    #[test]
    fn test_sidecar_invalid_json() {
        assert!(Sidecar::from_json("{ not json").is_err());
    }

    #[test]
    fn test_record_search_window() {
        // 2023-05-10T12:00:00Z / 2023-05-12T08:00:00Z
        let record = TakeoutRecord::new("a.jpg", "1683878400", "1683720000");
        let window = record.search_window().unwrap();
        assert_eq!(window.after_param(), "2023-05-09");
        assert_eq!(window.before_param(), "2023-05-13");
    }

    #[test]
    fn test_record_window_needs_both_timestamps() {
        let record = TakeoutRecord::new("a.jpg", "", "1683720000");
        assert!(record.taken_at().is_ok());
        assert!(record.search_window().is_err());
    }

    #[test]
    fn test_record_window_out_of_range_is_an_error() {
        // Parses as an epoch, but one day later is past the last representable date.
        let record = TakeoutRecord::new("x.jpg", "8210266876799", "1685613600");
        assert!(record.created_at().is_ok());
        assert!(matches!(
            record.search_window(),
            Err(crate::error::Error::InvalidEpoch(_))
        ));
    }
}
