use ferrous_shield_application::ports::keys;
use ferrous_shield_application::use_cases::UpdateFilterListsUseCase;
use ferrous_shield_domain::{FilterList, ListFormat};
use ferrous_shield_jobs::{FilterListRefreshJob, JobRunner};
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{MockFilterListFetcher, MockFilterListStorage, MockPreferencesStore};

struct Fixture {
    fetcher: Arc<MockFilterListFetcher>,
    preferences: Arc<MockPreferencesStore>,
    update: Arc<UpdateFilterListsUseCase>,
}

fn fixture() -> Fixture {
    let fetcher = Arc::new(MockFilterListFetcher::new());
    let preferences = Arc::new(MockPreferencesStore::new());
    let update = Arc::new(UpdateFilterListsUseCase::new(
        vec![FilterList::new(
            "easy-list",
            Some(Arc::from("https://lists.test/easylist.txt")),
            ListFormat::EasyList,
        )],
        Arc::new(MockFilterListStorage::new()),
        fetcher.clone(),
        preferences.clone(),
    ));

    Fixture {
        fetcher,
        preferences,
        update,
    }
}

#[tokio::test]
async fn test_first_tick_downloads_missing_lists() {
    let f = fixture();
    let token = CancellationToken::new();
    let job = Arc::new(FilterListRefreshJob::new(f.update.clone()).with_cancellation(token.clone()));

    let handle = tokio::spawn(job.start());
    sleep(Duration::from_millis(100)).await;

    assert_eq!(f.fetcher.call_count(), 1);
    assert_eq!(
        f.preferences
            .bool_value(&keys::compiled_flag("easy-list"))
            .await,
        Some(false)
    );

    token.cancel();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_later_ticks_respect_refresh_interval() {
    let f = fixture();
    let token = CancellationToken::new();
    let job = Arc::new(
        FilterListRefreshJob::new(f.update.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = tokio::spawn(job.start());
    sleep(Duration::from_millis(1200)).await;

    // second tick ran, but the saved list is younger than 24h
    assert_eq!(f.fetcher.call_count(), 1);

    token.cancel();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    let handles = JobRunner::new().start().await;
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_job_runner_shutdown_token_stops_job() {
    let f = fixture();
    let token = CancellationToken::new();

    let handles = JobRunner::new()
        .with_filter_list_refresh(FilterListRefreshJob::new(f.update.clone()))
        .with_shutdown_token(token.clone())
        .start()
        .await;
    assert_eq!(handles.len(), 1);

    sleep(Duration::from_millis(50)).await;
    token.cancel();

    for handle in handles {
        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
    }
    assert_eq!(f.fetcher.call_count(), 1);
}
