use baseline_core::model::{BaselineStatus, FeatureId, FeatureItem};
use storage::catalog::{HttpCatalog, JsonFileCatalog, source_for};
use storage::{CatalogSource, StorageError};

fn sample_features() -> Vec<FeatureItem> {
    vec![
        FeatureItem::new(
            FeatureId::new("grid"),
            "Grid",
            "Two-dimensional layout.",
            BaselineStatus::High,
        )
        .unwrap()
        .with_support_info("chrome: 57, firefox: 52"),
        FeatureItem::new(
            FeatureId::new("popover"),
            "Popover",
            "Top-layer popovers.",
            BaselineStatus::Low,
        )
        .unwrap(),
    ]
}

#[tokio::test]
async fn json_file_catalog_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game-features.json");
    let source = JsonFileCatalog::new(&path);

    source.write(&sample_features()).await.unwrap();
    let loaded = source.load().await.unwrap();

    assert_eq!(loaded, sample_features());
    assert_eq!(loaded[0].chrome_version(), Some(57));
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileCatalog::new(dir.path().join("absent.json"));

    let err = source.load().await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(path) if path.ends_with("absent.json")));
}

#[tokio::test]
async fn malformed_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"name\": ").unwrap();

    let err = source_for(path.to_str().unwrap()).load().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn unreachable_http_catalog_is_an_http_error() {
    let source = HttpCatalog::new("http://127.0.0.1:9/game-features.json");
    assert_eq!(source.describe(), "http://127.0.0.1:9/game-features.json");

    let err = source.load().await.unwrap_err();
    assert!(matches!(err, StorageError::Http(_)));
}
