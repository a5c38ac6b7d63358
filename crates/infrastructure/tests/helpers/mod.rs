#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_shield_application::ports::{BrowsingSurface, RuleListStore};
use ferrous_shield_domain::{DomainError, NavigationRequest, RuleListHandle};
use ferrous_shield_infrastructure::content_blocking::FileRuleListStore;
use ferrous_shield_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub async fn create_test_db() -> SqlitePool {
    create_pool("sqlite::memory:", 1).await.unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Attached(String),
    DetachedAll,
    Loaded(String),
    Reloaded,
}

pub struct RecordingSurface {
    current: Mutex<Option<NavigationRequest>>,
    events: Mutex<Vec<SurfaceEvent>>,
    signals_applied: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            events: Mutex::new(Vec::new()),
            signals_applied: false,
        }
    }

    pub fn showing(url: &str) -> Self {
        let surface = Self::new();
        *surface.current.lock().unwrap() = Some(NavigationRequest::parse(url).unwrap());
        surface
    }

    pub fn with_applied_signal(mut self) -> Self {
        self.signals_applied = true;
        self
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn attached(&self) -> Vec<String> {
        let mut attached = Vec::new();
        for event in self.events() {
            match event {
                SurfaceEvent::Attached(id) => attached.push(id),
                SurfaceEvent::DetachedAll => attached.clear(),
                _ => {}
            }
        }
        attached
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl BrowsingSurface for RecordingSurface {
    fn surface_id(&self) -> String {
        "test-surface".to_string()
    }

    fn add_rule_list(&self, handle: &RuleListHandle) {
        self.record(SurfaceEvent::Attached(handle.identifier().to_string()));
    }

    fn remove_all_rule_lists(&self) {
        self.record(SurfaceEvent::DetachedAll);
    }

    fn current_request(&self) -> Option<NavigationRequest> {
        self.current.lock().unwrap().clone()
    }

    fn load(&self, request: NavigationRequest) {
        self.record(SurfaceEvent::Loaded(request.url.to_string()));
        *self.current.lock().unwrap() = Some(request);
    }

    fn reload(&self) {
        self.record(SurfaceEvent::Reloaded);
    }

    async fn rule_lists_applied(&self) -> bool {
        self.signals_applied
    }
}

/// File-backed store that counts engine calls.
pub struct CountingRuleListStore {
    inner: FileRuleListStore,
    pub compiles: AtomicUsize,
    pub lookups: AtomicUsize,
}

impl CountingRuleListStore {
    pub fn new(directory: &Path) -> Self {
        Self {
            inner: FileRuleListStore::new(directory),
            compiles: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleListStore for CountingRuleListStore {
    async fn compile(
        &self,
        identifier: &str,
        encoded_rules: &str,
    ) -> Result<RuleListHandle, DomainError> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(identifier, encoded_rules).await
    }

    async fn lookup(&self, identifier: &str) -> Result<RuleListHandle, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(identifier).await
    }

    async fn remove(&self, identifier: &str) -> Result<(), DomainError> {
        self.inner.remove(identifier).await
    }
}
