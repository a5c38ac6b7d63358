use ferrous_shield_application::ports::{FilterListStorage, RuleListStore};
use ferrous_shield_domain::ListDownload;
use ferrous_shield_infrastructure::content_blocking::FileRuleListStore;
use ferrous_shield_infrastructure::storage::FileFilterListStorage;
use std::sync::Arc;
use tempfile::TempDir;

fn download(body: &str) -> ListDownload {
    ListDownload {
        url: Arc::from("https://lists.test/easylist.txt"),
        status: 200,
        etag: Some("\"abc\"".to_string()),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn test_save_creates_directory_and_file() {
    let dir = TempDir::new().unwrap();
    let storage = FileFilterListStorage::new(dir.path().join("lists"));

    let path = storage
        .save("easy-list", &download("||ads.test^\n"))
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("lists").join("easy-list.txt"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "||ads.test^\n");
    assert!(!dir.path().join("lists").join("easy-list.txt.tmp").exists());
    assert_eq!(storage.read("easy-list").await, Some(path));
}

#[tokio::test]
async fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let storage = FileFilterListStorage::new(dir.path());

    assert_eq!(storage.read("easy-list").await, None);
}

#[tokio::test]
async fn test_delete_missing_is_ok() {
    let dir = TempDir::new().unwrap();
    let storage = FileFilterListStorage::new(dir.path());

    storage.delete("easy-list").await.unwrap();

    storage.save("easy-list", &download("x")).await.unwrap();
    storage.delete("easy-list").await.unwrap();
    assert_eq!(storage.read("easy-list").await, None);
}

#[tokio::test]
async fn test_last_modified_requires_every_file() {
    let dir = TempDir::new().unwrap();
    let storage = FileFilterListStorage::new(dir.path());

    assert_eq!(storage.last_modified(&[]).await, None);

    storage.save("easy-list", &download("a")).await.unwrap();
    assert!(storage.last_modified(&["easy-list"]).await.is_some());
    assert_eq!(
        storage.last_modified(&["easy-list", "easy-privacy"]).await,
        None
    );

    storage.save("easy-privacy", &download("b")).await.unwrap();
    let earliest = storage
        .last_modified(&["easy-list", "easy-privacy"])
        .await
        .unwrap();
    let list_only = storage.last_modified(&["easy-list"]).await.unwrap();
    assert!(earliest <= list_only);
}

#[tokio::test]
async fn test_rejects_path_like_names() {
    let dir = TempDir::new().unwrap();
    let storage = FileFilterListStorage::new(dir.path());

    assert!(storage.save("../escape", &download("x")).await.is_err());
    assert_eq!(storage.read("../escape").await, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_and_compiled_document_share_directory() {
    let dir = TempDir::new().unwrap();
    let storage = FileFilterListStorage::new(dir.path());
    let store = FileRuleListStore::new(dir.path());
    let json = r#"[{"trigger":{"url-filter":"ads"},"action":{"type":"block"}}]"#;

    for _ in 0..20 {
        let list = download("||ads.test^\n");
        let (saved, compiled) = tokio::join!(
            storage.save("easy-list", &list),
            store.compile("easy-list", json)
        );
        saved.unwrap();
        compiled.unwrap();
    }

    assert_eq!(
        std::fs::read_to_string(dir.path().join("easy-list.txt")).unwrap(),
        "||ads.test^\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("easy-list.json")).unwrap(),
        json
    );
    assert_eq!(store.lookup("easy-list").await.unwrap().rule_count(), 1);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
