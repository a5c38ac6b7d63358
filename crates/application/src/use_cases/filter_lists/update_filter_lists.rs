use crate::ports::{keys, FilterListFetcher, FilterListStorage, PreferencesStore};
use chrono::Utc;
use ferrous_shield_domain::{DomainError, FilterList};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Lists downloaded and saved; their compiled flags were cleared.
    pub refreshed: Vec<String>,
    pub failed: Vec<String>,
    /// The stalest list was younger than the refresh interval.
    pub skipped: bool,
}

/// Re-downloads the refreshable filter lists once the stalest saved copy is
/// older than the refresh interval.
pub struct UpdateFilterListsUseCase {
    lists: Vec<FilterList>,
    storage: Arc<dyn FilterListStorage>,
    fetcher: Arc<dyn FilterListFetcher>,
    preferences: Arc<dyn PreferencesStore>,
    interval: Duration,
}

impl UpdateFilterListsUseCase {
    pub fn new(
        lists: Vec<FilterList>,
        storage: Arc<dyn FilterListStorage>,
        fetcher: Arc<dyn FilterListFetcher>,
        preferences: Arc<dyn PreferencesStore>,
    ) -> Self {
        Self {
            lists: lists.into_iter().filter(|l| l.is_refreshable()).collect(),
            storage,
            fetcher,
            preferences,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn tracked_lists(&self) -> Vec<String> {
        self.lists.iter().map(|l| l.name.to_string()).collect()
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> RefreshReport {
        if self.lists.is_empty() {
            debug!("No refreshable filter lists configured");
            return RefreshReport {
                skipped: true,
                ..RefreshReport::default()
            };
        }

        let names: Vec<&str> = self.lists.iter().map(|l| l.name.as_ref()).collect();

        match self.storage.last_modified(&names).await {
            Some(last_modified) => {
                let age = Utc::now().signed_duration_since(last_modified);
                let due = age
                    .to_std()
                    .map(|age| age >= self.interval)
                    .unwrap_or(false);

                if !due {
                    debug!(
                        age_secs = age.num_seconds(),
                        interval_secs = self.interval.as_secs(),
                        "Filter lists are up to date"
                    );
                    return RefreshReport {
                        skipped: true,
                        ..RefreshReport::default()
                    };
                }

                info!(
                    age_secs = age.num_seconds(),
                    "Filter lists are stale, refreshing"
                );
            }
            None => {
                info!("No complete set of saved filter lists, downloading all");
            }
        }

        self.refresh_all().await
    }

    /// Downloads every tracked list regardless of its age.
    pub async fn force_refresh(&self) -> RefreshReport {
        self.refresh_all().await
    }

    async fn refresh_all(&self) -> RefreshReport {
        for list in &self.lists {
            if let Err(e) = self.storage.delete(&list.name).await {
                warn!(list = %list.name, error = %e, "Failed to delete saved filter list");
            }
        }

        let tasks: Vec<_> = self
            .lists
            .iter()
            .filter_map(|list| list.url.clone().map(|url| (list.name.clone(), url)))
            .map(|(name, url)| {
                let storage = Arc::clone(&self.storage);
                let fetcher = Arc::clone(&self.fetcher);
                let preferences = Arc::clone(&self.preferences);
                let task_name = name.clone();
                let handle = tokio::spawn(async move {
                    refresh_one(&task_name, &url, storage, fetcher, preferences).await
                });
                (name, handle)
            })
            .collect();

        let (names, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();

        let mut report = RefreshReport::default();
        for (name, result) in names.into_iter().zip(join_all(handles).await) {
            match result {
                Ok(Ok(())) => report.refreshed.push(name.to_string()),
                Ok(Err(e)) => {
                    warn!(list = %name, error = %e, "Filter list refresh failed");
                    report.failed.push(name.to_string());
                }
                Err(e) => {
                    warn!(list = %name, error = %e, "Filter list refresh task panicked");
                    report.failed.push(name.to_string());
                }
            }
        }

        info!(
            refreshed = report.refreshed.len(),
            failed = report.failed.len(),
            "Filter list refresh completed"
        );

        report
    }
}

async fn refresh_one(
    name: &str,
    url: &str,
    storage: Arc<dyn FilterListStorage>,
    fetcher: Arc<dyn FilterListFetcher>,
    preferences: Arc<dyn PreferencesStore>,
) -> Result<(), DomainError> {
    let download = fetcher.fetch(url).await?;
    let path = storage.save(name, &download).await?;

    info!(
        list = name,
        path = %path.display(),
        bytes = download.body.len(),
        "Filter list saved"
    );

    preferences
        .set_bool(&keys::compiled_flag(name), false)
        .await?;

    Ok(())
}
