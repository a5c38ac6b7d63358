use super::translator::translate_filter_text;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use ferrous_shield_application::ports::{
    keys, BrowsingSurface, ContentBlockingPort, FilterListStorage, PreferencesStore,
    RuleListStore, SetupReport,
};
use ferrous_shield_domain::{
    ContentBlockerDocument, DomainError, FilterList, ListFormat, NavigationRequest,
    RuleListHandle,
};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(500);

/// How a list is obtained from the rule list store. A failed lookup moves
/// to `Compile` once; a failed compile is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompileAttempt {
    Lookup,
    Compile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleOrigin {
    Cached,
    Compiled,
}

/// Owns the compiled rule lists for the process lifetime and applies them
/// to browsing surfaces.
pub struct ContentBlockingCoordinator {
    lists: Vec<FilterList>,
    storage: Arc<dyn FilterListStorage>,
    store: Arc<dyn RuleListStore>,
    preferences: Arc<dyn PreferencesStore>,
    handles: ArcSwap<Vec<RuleListHandle>>,
    setup_lock: Mutex<()>,
    surface_lock: Mutex<()>,
    reload_delay: Duration,
}

impl ContentBlockingCoordinator {
    pub fn new(
        lists: Vec<FilterList>,
        storage: Arc<dyn FilterListStorage>,
        store: Arc<dyn RuleListStore>,
        preferences: Arc<dyn PreferencesStore>,
    ) -> Self {
        Self {
            lists,
            storage,
            store,
            preferences,
            handles: ArcSwap::from_pointee(Vec::new()),
            setup_lock: Mutex::new(()),
            surface_lock: Mutex::new(()),
            reload_delay: DEFAULT_RELOAD_DELAY,
        }
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    /// Drops every compiled rule list and its flag so the next setup
    /// compiles from source again.
    #[instrument(skip(self))]
    pub async fn invalidate(&self) -> Result<(), DomainError> {
        let _setup = self.setup_lock.lock().await;

        for list in &self.lists {
            self.preferences
                .set_bool(&keys::compiled_flag(&list.name), false)
                .await?;
            self.store.remove(&list.name).await?;
        }

        self.handles.store(Arc::new(Vec::new()));
        info!(lists = self.lists.len(), "Compiled rule lists discarded");
        Ok(())
    }

    async fn obtain(&self, list: &FilterList) -> Result<(RuleListHandle, HandleOrigin), DomainError> {
        let flag_key = keys::compiled_flag(&list.name);

        let compiled = match self.preferences.get_bool(&flag_key).await {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                warn!(list = %list.name, error = %e, "Cannot read compiled flag, recompiling");
                false
            }
        };

        let mut attempt = if compiled {
            CompileAttempt::Lookup
        } else {
            CompileAttempt::Compile
        };

        loop {
            match attempt {
                CompileAttempt::Lookup => match self.store.lookup(&list.name).await {
                    Ok(handle) => {
                        debug!(list = %list.name, rules = handle.rule_count(), "Rule list found in store");
                        return Ok((handle, HandleOrigin::Cached));
                    }
                    Err(e) => {
                        warn!(
                            list = %list.name,
                            error = %e,
                            "Compiled rule list missing from store, recompiling"
                        );
                        if let Err(e) = self.preferences.set_bool(&flag_key, false).await {
                            warn!(list = %list.name, error = %e, "Failed to clear compiled flag");
                        }
                        attempt = CompileAttempt::Compile;
                    }
                },
                CompileAttempt::Compile => {
                    let handle = self.compile(list).await?;
                    if let Err(e) = self.preferences.set_bool(&flag_key, true).await {
                        warn!(list = %list.name, error = %e, "Failed to persist compiled flag");
                    }
                    return Ok((handle, HandleOrigin::Compiled));
                }
            }
        }
    }

    async fn compile(&self, list: &FilterList) -> Result<RuleListHandle, DomainError> {
        let text = self.source_text(list).await?;

        let format = list.format;
        let encoded = tokio::task::spawn_blocking(move || match format {
            ListFormat::EasyList => translate_filter_text(&text).to_json(),
            ListFormat::ContentBlockerJson => ContentBlockerDocument::from_json(&text)?.to_json(),
        })
        .await
        .map_err(|e| DomainError::RuleListCompileError(format!("translation task: {}", e)))??;

        self.store.compile(&list.name, &encoded).await
    }

    /// Downloaded copy if present and readable, else the bundled copy.
    async fn source_text(&self, list: &FilterList) -> Result<String, DomainError> {
        if let Some(path) = self.storage.read(&list.name).await {
            match read_text(&path).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(list = %list.name, error = %e, "Saved list unreadable, trying bundled copy")
                }
            }
        }

        match &list.bundled_path {
            Some(path) => read_text(path).await,
            None => Err(DomainError::FilterListNotFound(list.name.to_string())),
        }
    }

    fn append_handle(&self, handle: RuleListHandle) {
        self.handles.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(handle.clone());
            next
        });
    }
}

async fn read_text(path: &Path) -> Result<String, DomainError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::IoError(format!("cannot read {}: {}", path.display(), e)))
}

#[async_trait]
impl ContentBlockingPort for ContentBlockingCoordinator {
    #[instrument(skip(self, surface), fields(surface = %surface.surface_id()))]
    async fn setup_internal_rule_lists(&self, surface: &dyn BrowsingSurface) -> SetupReport {
        let _setup = self.setup_lock.lock().await;

        if !self.handles.load().is_empty() {
            debug!("Rule lists already set up");
            return SetupReport {
                already_initialized: true,
                ..SetupReport::default()
            };
        }

        let mut pending: FuturesUnordered<_> = self
            .lists
            .iter()
            .map(|list| async move { (list.name.clone(), self.obtain(list).await) })
            .collect();

        let mut report = SetupReport::default();

        while let Some((name, result)) = pending.next().await {
            match result {
                Ok((handle, origin)) => {
                    self.append_handle(handle.clone());

                    let _surface = self.surface_lock.lock().await;
                    surface.add_rule_list(&handle);
                    if origin == HandleOrigin::Compiled && surface.current_request().is_some() {
                        surface.reload();
                    }

                    report.attached.push(name.to_string());
                }
                Err(e) => {
                    warn!(list = %name, error = %e, "Rule list unavailable");
                    report.failed.push(name.to_string());
                }
            }
        }

        info!(
            attached = report.attached.len(),
            failed = report.failed.len(),
            "Rule list setup completed"
        );

        report
    }

    #[instrument(skip(self, surface, pending), fields(surface = %surface.surface_id()))]
    async fn should_add_block_rule_list(
        &self,
        enabled: bool,
        surface: &dyn BrowsingSurface,
        pending: Option<NavigationRequest>,
    ) {
        let _surface = self.surface_lock.lock().await;

        surface.remove_all_rule_lists();
        if enabled {
            for handle in self.handles.load().iter() {
                surface.add_rule_list(handle);
            }
        }

        if let Some(request) = pending {
            if !surface.rule_lists_applied().await {
                tokio::time::sleep(self.reload_delay).await;
            }
            debug!(url = %request.url, "Re-issuing navigation");
            surface.load(request);
        }
    }

    fn rule_lists(&self) -> Vec<RuleListHandle> {
        self.handles.load().as_ref().clone()
    }
}
