use ferrous_shield_application::ports::RuleListStore;
use ferrous_shield_domain::DomainError;
use ferrous_shield_infrastructure::content_blocking::{translate_filter_text, FileRuleListStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[tokio::test]
async fn test_compile_then_lookup() {
    let dir = TempDir::new().unwrap();
    let store = FileRuleListStore::new(dir.path());
    let json = translate_filter_text("||ads.test^\n@@||ads.test/ok.js\n")
        .to_json()
        .unwrap();

    let compiled = store.compile("easy-list", &json).await.unwrap();
    assert_eq!(compiled.identifier(), "easy-list");
    assert_eq!(compiled.rule_count(), 2);
    assert!(dir.path().join("easy-list.json").exists());

    let found = store.lookup("easy-list").await.unwrap();
    assert_eq!(found.rules(), compiled.rules());
}

#[tokio::test]
async fn test_lookup_unknown_identifier() {
    let dir = TempDir::new().unwrap();
    let store = FileRuleListStore::new(dir.path());

    assert!(matches!(
        store.lookup("easy-list").await,
        Err(DomainError::RuleListNotFound(_))
    ));
}

#[tokio::test]
async fn test_compile_rejects_invalid_documents() {
    let dir = TempDir::new().unwrap();
    let store = FileRuleListStore::new(dir.path());

    assert!(store.compile("broken", "not json").await.is_err());
    assert!(store
        .compile(
            "bad-regex",
            r#"[{"trigger":{"url-filter":"(ads"},"action":{"type":"block"}}]"#
        )
        .await
        .is_err());
    assert!(!dir.path().join("broken.json").exists());
    assert!(!dir.path().join("bad-regex.json").exists());
}

#[tokio::test]
async fn test_remove() {
    let dir = TempDir::new().unwrap();
    let store = FileRuleListStore::new(dir.path());

    store.compile("easy-list", "[]").await.unwrap();
    store.remove("easy-list").await.unwrap();
    store.remove("easy-list").await.unwrap();

    assert!(store.lookup("easy-list").await.is_err());
}

#[tokio::test(flavor = "current_thread")]
async fn test_large_compile_keeps_runtime_responsive() {
    let dir = TempDir::new().unwrap();
    let store = FileRuleListStore::new(dir.path());
    let text: String = (0..20_000)
        .map(|i| format!("||ad{}.example.test/banner/*/img^$third-party\n", i))
        .collect();
    let json = translate_filter_text(&text).to_json().unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let ticker_done = done.clone();
    let ticker = tokio::spawn(async move {
        let mut last = Instant::now();
        let mut max_gap = Duration::ZERO;
        while !ticker_done.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let now = Instant::now();
            max_gap = max_gap.max(now - last);
            last = now;
        }
        max_gap
    });
    tokio::task::yield_now().await;

    let compiled = store.compile("easy-list", &json).await.unwrap();
    done.store(true, Ordering::SeqCst);
    let max_gap = ticker.await.unwrap();

    assert_eq!(compiled.rule_count(), 20_000);
    assert!(max_gap < Duration::from_millis(500), "runtime stalled for {:?}", max_gap);
}
