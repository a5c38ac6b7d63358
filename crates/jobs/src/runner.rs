use crate::FilterListRefreshJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(FilterListRefreshJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<JoinHandle<()>> {
    job.map(|job| {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job()
    })
}

pub struct JobRunner {
    filter_list_refresh: Option<FilterListRefreshJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            filter_list_refresh: None,
            shutdown: None,
        }
    }

    pub fn with_filter_list_refresh(mut self, job: FilterListRefreshJob) -> Self {
        self.filter_list_refresh = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns the configured jobs and returns their handles.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<JoinHandle<()>> = spawn_job(self.filter_list_refresh, &self.shutdown)
            .into_iter()
            .collect();

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
