use httpmock::prelude::*;
use std::path::Path;

use meme_vault::scraper::{FetchError, FetcherConfig, MetadataFetcher};
use meme_vault::service::add::{store_file, store_url, MemeOverrides};
use meme_vault::service::list::MemeSections;
use vault_local::{ImageVault, LocalStorageClient};
use vault_types::{RecordStore, StorageConfig, VaultError};

async fn open_store(dir: &Path) -> LocalStorageClient {
    let config = StorageConfig::new(dir.to_string_lossy().to_string());
    LocalStorageClient::connect(&config).await.unwrap()
}

fn fetcher() -> MetadataFetcher {
    MetadataFetcher::new(FetcherConfig::default()).unwrap()
}

#[tokio::test]
async fn stores_scraped_metadata() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/view/cat-dance");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(
                    r#"<html><head>
                    <meta property="og:title" content="Cat Dance">
                    <meta property="og:image" content="https://tenor.com/cat.gif">
                    </head></html>"#,
                );
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;
    let url = server.url("/view/cat-dance");

    let meme = store_url(&store, &fetcher(), &url, &MemeOverrides::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(meme.url, url);
    assert_eq!(meme.title.as_deref(), Some("Cat Dance"));
    assert_eq!(meme.image_url.as_deref(), Some("https://tenor.com/cat.gif"));
    assert!(meme.aspect_ratio.is_none());
    assert!(meme.description.is_none());
    assert_eq!(meme.usage_count, 0);
    assert!(!meme.is_favorite);
    assert!(meme.local_path.is_none());

    assert_eq!(store.list().await, vec![meme]);
}

#[tokio::test]
async fn duplicate_url_is_rejected_without_fetching() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/view/party");
            then.status(200)
                .body(r#"<meta property="og:title" content="Party">"#);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;
    let url = server.url("/view/party");
    let fetcher = fetcher();

    let first = store_url(&store, &fetcher, &url, &MemeOverrides::default())
        .await
        .unwrap();
    let err = store_url(&store, &fetcher, &url, &MemeOverrides::default())
        .await
        .unwrap_err();

    match err.downcast_ref::<VaultError>() {
        Some(VaultError::Duplicate { id, label }) => {
            assert_eq!(id, &first.id);
            assert_eq!(label, "Party");
        }
        other => panic!("expected duplicate error, got {:?}", other),
    }
    mock.assert_hits_async(1).await;
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn invalid_url_is_rejected_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    for url in ["ftp://example.com/cat.gif", "cat dance", ""] {
        let err = store_url(&store, &fetcher(), url, &MemeOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VaultError>(),
            Some(VaultError::InvalidUrl(_))
        ));
    }

    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn fetch_failure_creates_no_record() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/broken");
            then.status(500);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    let err = store_url(
        &store,
        &fetcher(),
        &server.url("/broken"),
        &MemeOverrides::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::Status(500))
    ));
    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn user_title_overrides_scraped_title() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gif");
            then.status(200).body(
                r#"<title>Site Title</title>
                <meta property="og:image:width" content="1200">
                <meta property="og:image:height" content="630">"#,
            );
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;
    let overrides = MemeOverrides {
        title: Some("My Title".to_string()),
        description: None,
    };

    let meme = store_url(&store, &fetcher(), &server.url("/gif"), &overrides)
        .await
        .unwrap();

    assert_eq!(meme.title.as_deref(), Some("My Title"));
    assert!((meme.aspect_ratio.unwrap() - 1200.0 / 630.0).abs() < 1e-9);
}

#[tokio::test]
async fn imported_image_is_owned_by_its_record() {
    let dir = tempfile::tempdir().unwrap();
    let vault_path = dir.path().join("vault");
    let store = open_store(&vault_path).await;
    let images = ImageVault::new(&vault_path);

    let source = dir.path().join("reaction.JPG");
    std::fs::write(&source, b"jpeg").unwrap();

    let meme = store_file(&store, &images, &source, &MemeOverrides::default())
        .await
        .unwrap();

    let local_path = meme.local_path.clone().unwrap();
    assert_eq!(
        Path::new(&local_path),
        images.dir().join(format!("{}.jpg", meme.id))
    );
    assert_eq!(meme.image_url.as_deref(), Some(local_path.as_str()));
    assert_eq!(meme.url, format!("file://{}", local_path));
    assert_eq!(meme.title.as_deref(), Some("reaction"));
    assert!(Path::new(&local_path).exists());
    assert_eq!(images.stats().image_count, 1);

    store.delete(&meme.id).await.unwrap();

    assert!(store.list().await.is_empty());
    assert!(!Path::new(&local_path).exists());
    assert!(store.delete(&meme.id).await.unwrap().is_none());
}

#[tokio::test]
async fn usage_and_favorites_drive_browse_order() {
    let server = MockServer::start_async().await;
    for name in ["one", "two", "three"] {
        let body = format!(r#"<meta property="og:title" content="{}">"#, name);
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{}", name));
                then.status(200).body(body);
            })
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;
    let fetcher = fetcher();

    let mut ids = Vec::new();
    for name in ["one", "two", "three"] {
        let url = server.url(format!("/{}", name));
        let meme = store_url(&store, &fetcher, &url, &MemeOverrides::default())
            .await
            .unwrap();
        ids.push(meme.id);
    }

    // 新建的在前
    let stored: Vec<String> = store.list().await.into_iter().map(|m| m.id).collect();
    assert_eq!(stored, vec![ids[2].clone(), ids[1].clone(), ids[0].clone()]);

    for _ in 0..3 {
        store.increment_usage(&ids[0]).await.unwrap();
    }
    store.toggle_favorite(&ids[1]).await.unwrap();

    let sections = MemeSections::build(&store.list().await, "");
    let titles: Vec<&str> = sections
        .iter()
        .map(|m| m.title.as_deref().unwrap())
        .collect();
    assert_eq!(titles, vec!["two", "one", "three"]);

    let used = store.find_by_id(&ids[0]).await.unwrap();
    assert_eq!(used.usage_count, 3);
    assert!(used.last_used_at.is_some());
}
