use ferrous_shield_application::use_cases::UpdateFilterListsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const DEFAULT_CHECK_INTERVAL_SECS: u64 = 3600;

/// Periodically asks the refresh use case whether the filter lists are due.
///
/// The tick only checks; the use case applies the refresh interval itself,
/// so a short tick does not mean frequent downloads. The first tick fires
/// immediately so a stale or missing set is fetched at startup.
pub struct FilterListRefreshJob {
    update: Arc<UpdateFilterListsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl FilterListRefreshJob {
    pub fn new(update: Arc<UpdateFilterListsUseCase>) -> Self {
        Self {
            update,
            interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            lists = ?self.update.tracked_lists(),
            "Starting filter list refresh job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("FilterListRefreshJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let report = self.update.execute().await;
                    if !report.failed.is_empty() {
                        warn!(
                            failed = ?report.failed,
                            "FilterListRefreshJob: some lists could not be refreshed"
                        );
                    } else if !report.skipped {
                        info!(
                            refreshed = report.refreshed.len(),
                            "FilterListRefreshJob: filter lists refreshed"
                        );
                    }
                }
            }
        }
    }
}
