use std::fs;

use chrono::{FixedOffset, TimeZone};
use serde_json::json;

use lakepath::error::{ListingError, ResolveError};
use lakepath::{
    FilterSpec, ListingQuery, ListingRequest, LocalStore, MemoryStore, PathMatch, PathResolver,
};

const BASE_URL: &str = "https://mydatalake.dfs.core.windows.net/mycontainer";

// Helper to build the reports lake used by most tests
fn reports_store() -> MemoryStore {
    let offset = FixedOffset::east_opt(0).unwrap();
    MemoryStore::new()
        .with_file_modified(
            "Reports/Jan.csv",
            100,
            offset.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap(),
        )
        .with_file_modified(
            "Reports/feb.CSV",
            200,
            offset.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap(),
        )
}

#[tokio::test]
async fn test_case_insensitive_listing_envelope() {
    let store = reports_store();
    let request = ListingRequest::new("reports")
        .ignore_directory_case(true)
        .filter(FilterSpec::new("name", "contains", ".csv"))
        .order_by("contentLength", true)
        .limit(1);

    let listing = ListingQuery::new(&store)
        .execute(BASE_URL, &request)
        .await
        .unwrap();

    assert_eq!(
        listing.to_json().unwrap(),
        json!({
            "correctedFilePath": "Reports",
            "fileCount": 1,
            "files": [{
                "name": "feb.CSV",
                "directory": "Reports",
                "url": format!("{BASE_URL}/Reports/feb.CSV"),
                "isDirectory": false,
                "contentLength": 200,
                "lastModified": "2024-02-29T09:00:00.000Z"
            }]
        })
    );
}

#[tokio::test]
async fn test_invalid_filter_omits_files() {
    let store = reports_store();
    let request = ListingRequest::new("Reports")
        .filter(FilterSpec::new("name", "contains", ".csv"))
        .filter(FilterSpec::new("contentLength", "gt", "lots"));

    let listing = ListingQuery::new(&store)
        .execute(BASE_URL, &request)
        .await
        .unwrap();

    assert!(!listing.all_filters_valid);
    assert_eq!(listing.to_json().unwrap(), json!({}));
}

#[tokio::test]
async fn test_sort_by_last_modified() {
    let store = reports_store();
    let request = ListingRequest::new("Reports").order_by("lastModified", true);

    let listing = ListingQuery::new(&store)
        .execute(BASE_URL, &request)
        .await
        .unwrap();

    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["feb.CSV", "Jan.csv"]);
}

#[tokio::test]
async fn test_resolver_fast_path_and_ambiguity() {
    let store = MemoryStore::new()
        .with_file("Data/2024/Jan.csv", 1)
        .with_directory("data");
    let resolver = PathResolver::new(&store);

    let found = resolver.resolve_file(Some("Data/2024/Jan.csv")).await.unwrap();
    assert_eq!(found, PathMatch::Found("Data/2024/Jan.csv".into()));
    assert_eq!(store.list_calls(), 0);

    let err = resolver
        .resolve_file(Some("DATA/2024/jan.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::AmbiguousMatch { segment, .. } if segment == "DATA"));
}

#[tokio::test]
async fn test_local_store_listing() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Reports/2024")).unwrap();
    fs::write(dir.path().join("Reports/Jan.csv"), vec![0u8; 100]).unwrap();
    fs::write(dir.path().join("Reports/feb.CSV"), vec![0u8; 200]).unwrap();
    fs::write(dir.path().join("Reports/2024/Q1.csv"), vec![0u8; 50]).unwrap();

    let store = LocalStore::new(dir.path());
    let request = ListingRequest::new("reports")
        .ignore_directory_case(true)
        .recursive(true)
        .filter(FilterSpec::new("isDirectory", "eq", "false"))
        .order_by("contentLength", false);

    let listing = ListingQuery::new(&store)
        .execute(BASE_URL, &request)
        .await
        .unwrap();

    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Q1.csv", "Jan.csv", "feb.CSV"]);
    assert_eq!(listing.items[0].directory, "Reports/2024");
    assert_eq!(listing.corrected_directory.as_deref(), Some("Reports"));
}

#[tokio::test]
async fn test_local_store_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());

    let err = ListingQuery::new(&store)
        .execute(BASE_URL, &ListingRequest::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ListingError::DirectoryNotFound(_)));
}
