//! Integration tests for the catalog and its HTTP surface.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use relicdex::catalog::{Catalog, SearchRequest};
use relicdex::server::create_rest_router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Lay out a small data root resembling a real dataset.
fn build_dataset(root: &Path) {
    let layout: &[(&str, &str)] = &[
        ("Characters/seele.json", r#"{"Name":"Seele","Rarity":"5","Path":"The Hunt"}"#),
        ("Characters/march.json", r#"{"Name":"March 7th","Rarity":"4"}"#),
        ("Lightcones/in_the_night.json", r#"{"Name":"In the Night","Rarity":"Lightcone 5"}"#),
        ("Conos/river.json", r#"{"Name":"River Flows in Spring"}"#),
        ("Weapons/Swords/edge.json", r#"{"Name":"Edge","Refinements":{"1":"+10%"}}"#),
        ("Weapons/broken.json", "{\"Name\": "),
        ("readme.json", r#"["top", "level"]"#),
        ("Weapons/notes.txt", "not a record"),
    ];

    for (relative, content) in layout {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn sorted_files(hits: &[relicdex::catalog::SearchHit]) -> Vec<String> {
    let mut files: Vec<_> = hits.iter().map(|h| h.file.clone()).collect();
    files.sort();
    files
}

/// List count equals the number of record files anywhere in the tree.
#[tokio::test]
async fn test_list_counts_every_record() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());
    let catalog = Catalog::new(tmp.path());

    let listed = catalog.list().await.unwrap();
    assert_eq!(listed.len(), 7);
    assert!(listed.iter().all(|d| d.name.ends_with(".json")));
}

/// Every listed path fetches content structurally equal to the file.
#[tokio::test]
async fn test_every_listed_path_is_fetchable() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());
    let catalog = Arc::new(Catalog::new(tmp.path()));
    let router = create_rest_router(Arc::clone(&catalog));

    for descriptor in catalog.list().await.unwrap() {
        if descriptor.name == "broken.json" {
            continue;
        }

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(descriptor.path.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {}", descriptor.path);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let served: Value = serde_json::from_slice(&bytes).unwrap();

        let relative = if descriptor.folder.is_empty() {
            descriptor.name.clone()
        } else {
            format!("{}/{}", descriptor.folder, descriptor.name)
        };
        let on_disk: Value =
            serde_json::from_str(&fs::read_to_string(tmp.path().join(relative)).unwrap()).unwrap();
        assert_eq!(served, on_disk);
    }
}

/// Corrupt records fetch as 404 but do not break search.
#[tokio::test]
async fn test_corrupt_record_is_isolated() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());
    let catalog = Catalog::new(tmp.path());

    let fetched = catalog.fetch(Some("Weapons"), Some("broken.json")).await;
    assert!(fetched.is_err());

    let hits = catalog.search(&SearchRequest::general("")).await.unwrap();
    assert_eq!(hits.len(), 6);
    assert!(!sorted_files(&hits).contains(&"broken.json".to_string()));
}

/// Lightcone mode ignores the query text.
#[tokio::test]
async fn test_lightcone_search_ignores_query() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());
    let catalog = Catalog::new(tmp.path());

    let mut first = SearchRequest::lightcone();
    first.query = "seele".to_string();
    let mut second = SearchRequest::lightcone();
    second.query = "something else entirely".to_string();

    let a = catalog.search(&first).await.unwrap();
    let b = catalog.search(&second).await.unwrap();

    assert_eq!(a, b);
    assert_eq!(
        sorted_files(&a),
        vec!["edge.json", "in_the_night.json", "river.json"]
    );
}

/// General mode matches values and keys case-insensitively.
#[tokio::test]
async fn test_general_search() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());
    let catalog = Catalog::new(tmp.path());

    let hits = catalog
        .search(&SearchRequest::general("the hunt"))
        .await
        .unwrap();
    assert_eq!(sorted_files(&hits), vec!["seele.json"]);
    assert_eq!(hits[0].folder, "Characters");
    assert_eq!(hits[0].data["Name"], "Seele");
}

/// Key order in served records follows the file.
#[tokio::test]
async fn test_fetch_preserves_key_order() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());
    let catalog = Catalog::new(tmp.path());

    let value = catalog.fetch_path("Characters/seele.json").await.unwrap();
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"Name":"Seele","Rarity":"5","Path":"The Hunt"}"#
    );
}
