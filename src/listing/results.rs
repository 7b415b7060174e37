//! Listing result types
//!
//! Defines the items produced by a listing and the JSON envelope they are
//! reported in.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::storage::RawPath;
use crate::utils::paths::{combine_url, leaf_name, parent_directory};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// One file or directory in a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItem {
    pub name: String,
    /// Parent directory; `/` for entries at the container root
    pub directory: String,
    pub url: String,
    pub is_directory: bool,
    pub content_length: u64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_modified: DateTime<Utc>,
}

impl PathItem {
    /// Builds an item from a provider entry, addressing it under `base_url`
    pub fn from_raw(raw: RawPath, base_url: &str) -> Self {
        Self {
            name: leaf_name(&raw.path).to_string(),
            directory: parent_directory(&raw.path),
            url: combine_url(base_url, &raw.path),
            is_directory: raw.is_directory(),
            content_length: raw.content_length.unwrap_or(0),
            last_modified: raw
                .last_modified
                .map(|instant| instant.with_timezone(&Utc))
                .unwrap_or_default(),
        }
    }

    /// Full path of the item relative to the container root
    pub fn path(&self) -> String {
        format!("{}/{}", self.directory, self.name)
            .trim_start_matches('/')
            .to_string()
    }
}

fn serialize_timestamp<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&instant.format(TIMESTAMP_FORMAT).to_string())
}

/// Result of a listing query
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<PathItem>,
    pub all_filters_valid: bool,
    /// Set only when case correction changed the requested directory
    pub corrected_directory: Option<String>,
}

/// Serialized form of a [`Listing`]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEnvelope<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_file_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<&'a [PathItem]>,
}

impl Listing {
    pub fn envelope(&self) -> ListingEnvelope<'_> {
        let files = self.all_filters_valid.then_some(self.items.as_slice());
        ListingEnvelope {
            corrected_file_path: self.corrected_directory.as_deref(),
            file_count: files.map(<[PathItem]>::len),
            files,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.envelope())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    fn raw(path: &str) -> RawPath {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        RawPath {
            path: path.to_string(),
            is_directory: None,
            content_length: Some(42),
            last_modified: Some(offset.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap()),
        }
    }

    #[test]
    fn builds_items_from_provider_entries() {
        let item = PathItem::from_raw(raw("Reports/2024/Jan.csv"), "https://acct.dfs.core.windows.net/lake");
        assert_eq!(item.name, "Jan.csv");
        assert_eq!(item.directory, "Reports/2024");
        assert_eq!(item.url, "https://acct.dfs.core.windows.net/lake/Reports/2024/Jan.csv");
        assert!(!item.is_directory);
        assert_eq!(item.path(), "Reports/2024/Jan.csv");
        assert_eq!(item.last_modified, Utc.with_ymd_and_hms(2024, 1, 5, 8, 30, 0).unwrap());
    }

    #[test]
    fn missing_metadata_defaults() {
        let item = PathItem::from_raw(
            RawPath {
                path: "top".into(),
                is_directory: None,
                content_length: None,
                last_modified: None,
            },
            "https://x/lake",
        );
        assert_eq!(item.directory, "/");
        assert_eq!(item.path(), "top");
        assert_eq!(item.content_length, 0);
        assert_eq!(item.last_modified.timestamp(), 0);
    }

    #[test]
    fn serializes_with_millisecond_utc_timestamps() {
        let item = PathItem::from_raw(raw("a.csv"), "https://x/lake");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "a.csv",
                "directory": "/",
                "url": "https://x/lake/a.csv",
                "isDirectory": false,
                "contentLength": 42,
                "lastModified": "2024-01-05T08:30:00.000Z"
            })
        );
    }

    #[test]
    fn envelope_hides_files_when_filters_are_invalid() {
        let listing = Listing {
            items: vec![],
            all_filters_valid: false,
            corrected_directory: Some("Reports".into()),
        };
        assert_eq!(listing.to_json().unwrap(), json!({ "correctedFilePath": "Reports" }));

        let listing = Listing {
            items: vec![PathItem::from_raw(raw("a.csv"), "https://x/lake")],
            all_filters_valid: true,
            corrected_directory: None,
        };
        let value = listing.to_json().unwrap();
        assert_eq!(value["fileCount"], 1);
        assert!(value.get("correctedFilePath").is_none());
    }
}
