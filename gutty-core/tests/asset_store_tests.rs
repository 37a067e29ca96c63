//! Upload persistence, listing and reopening.

use std::sync::Arc;

use gutty_core::{
    CatalogError, UploadRejection,
    assets::AssetStore,
};
use tokio::io::AsyncReadExt;

const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];

fn store() -> (tempfile::TempDir, AssetStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = AssetStore::new(dir.path().join("uploads"));
    (dir, store)
}

#[tokio::test]
async fn saved_upload_reads_back_identically() {
    let (_dir, store) = store();

    let stored = store.save(4, "photo.PNG", PNG).await.unwrap();
    assert!(stored.filename.ends_with(".png"));
    assert_eq!(stored.url, format!("/uploads/item_4/{}", stored.filename));

    let mut opened = store.open(4, &stored.filename).await.unwrap();
    assert_eq!(opened.len, PNG.len() as u64);
    assert_eq!(opened.content_type, "image/png");

    let mut bytes = Vec::new();
    opened.file.read_to_end(&mut bytes).await.unwrap();
    assert_eq!(bytes, PNG);
}

#[tokio::test]
async fn rejected_uploads_touch_nothing() {
    let (_dir, store) = store();

    let err = store.save(1, "notes.txt", b"hello").await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UploadRejected(UploadRejection::DisallowedExtension(ref ext)) if ext == "txt"
    ));

    let err = store.save(1, "", PNG).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UploadRejected(UploadRejection::EmptyFilename)
    ));

    let err = store.save(1, "empty.png", b"").await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UploadRejected(UploadRejection::EmptyFile)
    ));

    assert!(!store.folder_for(1).exists());
    assert!(store.list(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_uploads_to_one_record_never_collide() {
    let (_dir, store) = store();
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.save(9, "same-name.png", PNG).await
        }));
    }

    let mut names = Vec::new();
    for handle in handles {
        names.push(handle.await.unwrap().unwrap().filename);
    }
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 16);

    let listed = store.list(9).await.unwrap();
    assert_eq!(listed.len(), 16);
}

#[tokio::test]
async fn listing_is_in_upload_order() {
    let (_dir, store) = store();

    let first = store.save(2, "a.jpg", b"\xFF\xD8\xFF\xE0first").await.unwrap();
    let second = store.save(2, "b.gif", b"GIF89a-second").await.unwrap();

    let listed: Vec<_> = store
        .list(2)
        .await
        .unwrap()
        .into_iter()
        .map(|asset| asset.filename)
        .collect();
    assert_eq!(listed, vec![first.filename, second.filename]);
}

#[tokio::test]
async fn open_refuses_traversal_and_missing_files() {
    let (_dir, store) = store();
    store.save(3, "a.png", PNG).await.unwrap();
    let other = store.save(5, "b.png", PNG).await.unwrap();

    for name in [
        "../item_5/x.png".to_string(),
        format!("../item_5/{}", other.filename),
        ".hidden.png".to_string(),
        "missing.png".to_string(),
    ] {
        let err = store.open(3, &name).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)), "{name}: {err:?}");
    }

    // Right file, wrong record.
    let err = store.open(3, &other.filename).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn content_type_falls_back_to_extension() {
    let (_dir, store) = store();
    let stored = store.save(6, "odd.webp", b"not really an image").await.unwrap();

    let opened = store.open(6, &stored.filename).await.unwrap();
    assert_eq!(opened.content_type, "image/webp");
}
