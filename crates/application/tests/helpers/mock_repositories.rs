use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use ferrous_shield_application::ports::{
    BrowsingSurface, ContentBlockingPort, EntitlementProvider, FilterListFetcher,
    FilterListStorage, PreferencesStore, SetupReport, WhitelistRepository,
};
use ferrous_shield_domain::{
    DomainError, ListDownload, NavigationRequest, RuleListHandle, SubscriptionTier,
    WhitelistInsert, WhitelistedDomain,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

// ── Whitelist ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockWhitelistRepository {
    whitelisted_domains: Arc<RwLock<Vec<WhitelistedDomain>>>,
}

impl MockWhitelistRepository {
    pub fn new() -> Self {
        Self {
            whitelisted_domains: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Domains are given newest first.
    pub fn with_whitelisted_domains(domains: Vec<&str>) -> Self {
        let whitelisted = domains
            .into_iter()
            .map(|d| WhitelistedDomain::new(d.to_string()))
            .collect();

        Self {
            whitelisted_domains: Arc::new(RwLock::new(whitelisted)),
        }
    }

    pub async fn count(&self) -> usize {
        self.whitelisted_domains.read().await.len()
    }

    pub async fn domains(&self) -> Vec<String> {
        self.whitelisted_domains
            .read()
            .await
            .iter()
            .map(|d| d.domain.clone())
            .collect()
    }
}

impl Default for MockWhitelistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WhitelistRepository for MockWhitelistRepository {
    async fn get_all(&self) -> Result<Vec<WhitelistedDomain>, DomainError> {
        Ok(self.whitelisted_domains.read().await.clone())
    }

    async fn add_domain(
        &self,
        domain: &WhitelistedDomain,
    ) -> Result<WhitelistInsert, DomainError> {
        let mut domains = self.whitelisted_domains.write().await;
        if domains.iter().any(|d| d.domain == domain.domain) {
            return Ok(WhitelistInsert::AlreadyPresent);
        }
        domains.insert(0, domain.clone());
        Ok(WhitelistInsert::Added)
    }

    async fn remove_domain(&self, domain: &str) -> Result<bool, DomainError> {
        let mut domains = self.whitelisted_domains.write().await;
        let before = domains.len();
        domains.retain(|d| d.domain != domain);
        Ok(domains.len() != before)
    }

    async fn remove_at(&self, index: usize) -> Result<Option<WhitelistedDomain>, DomainError> {
        let mut domains = self.whitelisted_domains.write().await;
        if index < domains.len() {
            Ok(Some(domains.remove(index)))
        } else {
            Ok(None)
        }
    }

    async fn is_whitelisted(&self, domain: &str) -> Result<bool, DomainError> {
        let domains = self.whitelisted_domains.read().await;
        Ok(domains.iter().any(|d| d.domain == domain))
    }
}

// ── Preferences ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

#[derive(Clone)]
pub struct MockPreferencesStore {
    values: Arc<RwLock<HashMap<String, MockValue>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockPreferencesStore {
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn value(&self, key: &str) -> Option<MockValue> {
        self.values.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: &str, value: MockValue) {
        self.values.write().await.insert(key.to_string(), value);
    }

    async fn check(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::PreferencesError("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl Default for MockPreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferencesStore for MockPreferencesStore {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError> {
        self.check().await?;
        match self.values.read().await.get(key) {
            Some(MockValue::Bool(b)) => Ok(Some(*b)),
            _ => Ok(None),
        }
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError> {
        self.check().await?;
        self.insert(key, MockValue::Bool(value)).await;
        Ok(())
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check().await?;
        match self.values.read().await.get(key) {
            Some(MockValue::Text(s)) => Ok(Some(s.clone())),
            _ => Ok(None),
        }
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.check().await?;
        self.insert(key, MockValue::Text(value.to_string())).await;
        Ok(())
    }

    async fn get_strings(&self, key: &str) -> Result<Vec<String>, DomainError> {
        self.check().await?;
        match self.values.read().await.get(key) {
            Some(MockValue::List(v)) => Ok(v.clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn set_strings(&self, key: &str, values: &[String]) -> Result<(), DomainError> {
        self.check().await?;
        self.insert(key, MockValue::List(values.to_vec())).await;
        Ok(())
    }
}

// ── Filter list storage ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockFilterListStorage {
    files: Arc<RwLock<HashMap<String, (String, DateTime<Utc>)>>>,
    deleted: Arc<RwLock<Vec<String>>>,
    failing_saves: Arc<RwLock<Vec<String>>>,
}

impl MockFilterListStorage {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            deleted: Arc::new(RwLock::new(Vec::new())),
            failing_saves: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn add_saved(&self, name: &str, body: &str, age: Duration) {
        self.files
            .write()
            .await
            .insert(name.to_string(), (body.to_string(), Utc::now() - age));
    }

    pub async fn fail_save_for(&self, name: &str) {
        self.failing_saves.write().await.push(name.to_string());
    }

    pub async fn body(&self, name: &str) -> Option<String> {
        self.files.read().await.get(name).map(|(b, _)| b.clone())
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

impl Default for MockFilterListStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilterListStorage for MockFilterListStorage {
    async fn save(
        &self,
        list_name: &str,
        download: &ListDownload,
    ) -> Result<PathBuf, DomainError> {
        if self.failing_saves.read().await.iter().any(|n| n == list_name) {
            return Err(DomainError::FilterListStorageError(format!(
                "cannot create {}.txt",
                list_name
            )));
        }
        self.files
            .write()
            .await
            .insert(list_name.to_string(), (download.body.clone(), Utc::now()));
        Ok(PathBuf::from(format!("/mock/{}.txt", list_name)))
    }

    async fn read(&self, list_name: &str) -> Option<PathBuf> {
        self.files
            .read()
            .await
            .get(list_name)
            .map(|_| PathBuf::from(format!("/mock/{}.txt", list_name)))
    }

    async fn delete(&self, list_name: &str) -> Result<(), DomainError> {
        self.files.write().await.remove(list_name);
        self.deleted.write().await.push(list_name.to_string());
        Ok(())
    }

    async fn last_modified(&self, list_names: &[&str]) -> Option<DateTime<Utc>> {
        if list_names.is_empty() {
            return None;
        }
        let files = self.files.read().await;
        let mut earliest: Option<DateTime<Utc>> = None;
        for name in list_names {
            let (_, modified) = files.get(*name)?;
            earliest = Some(match earliest {
                Some(e) if e <= *modified => e,
                _ => *modified,
            });
        }
        earliest
    }
}

// ── Fetcher ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockFilterListFetcher {
    responses: Arc<RwLock<HashMap<String, Result<String, DomainError>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockFilterListFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn set_response(&self, url: &str, body: &str) {
        self.responses
            .write()
            .await
            .insert(url.to_string(), Ok(body.to_string()));
    }

    pub async fn set_error(&self, url: &str, error: DomainError) {
        self.responses
            .write()
            .await
            .insert(url.to_string(), Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockFilterListFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilterListFetcher for MockFilterListFetcher {
    async fn fetch(&self, url: &str) -> Result<ListDownload, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.read().await.get(url) {
            Some(Ok(body)) => Ok(ListDownload {
                url: Arc::from(url),
                status: 200,
                etag: None,
                body: body.clone(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(DomainError::FilterListFetchError(format!(
                "HTTP 404 for {}",
                url
            ))),
        }
    }
}

// ── Entitlements ──────────────────────────────────────────────────────────────

pub struct MockEntitlementProvider {
    tier: Result<SubscriptionTier, DomainError>,
}

impl MockEntitlementProvider {
    pub fn premium() -> Self {
        Self {
            tier: Ok(SubscriptionTier::Premium),
        }
    }

    pub fn free() -> Self {
        Self {
            tier: Ok(SubscriptionTier::Free),
        }
    }

    pub fn failing() -> Self {
        Self {
            tier: Err(DomainError::EntitlementError("token expired".to_string())),
        }
    }
}

#[async_trait]
impl EntitlementProvider for MockEntitlementProvider {
    async fn current_tier(&self) -> Result<SubscriptionTier, DomainError> {
        self.tier.clone()
    }
}

// ── Content blocking ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BlockRuleListCall {
    pub enabled: bool,
    pub surface: String,
    pub pending: Option<NavigationRequest>,
}

#[derive(Clone)]
pub struct MockContentBlocking {
    calls: Arc<Mutex<Vec<BlockRuleListCall>>>,
}

impl MockContentBlocking {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<BlockRuleListCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockContentBlocking {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentBlockingPort for MockContentBlocking {
    async fn setup_internal_rule_lists(&self, _surface: &dyn BrowsingSurface) -> SetupReport {
        SetupReport::default()
    }

    async fn should_add_block_rule_list(
        &self,
        enabled: bool,
        surface: &dyn BrowsingSurface,
        pending: Option<NavigationRequest>,
    ) {
        self.calls.lock().unwrap().push(BlockRuleListCall {
            enabled,
            surface: surface.surface_id(),
            pending,
        });
    }

    fn rule_lists(&self) -> Vec<RuleListHandle> {
        Vec::new()
    }
}

// ── Browsing surface ──────────────────────────────────────────────────────────

pub struct MockBrowsingSurface {
    id: String,
    current: Mutex<Option<NavigationRequest>>,
}

impl MockBrowsingSurface {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            current: Mutex::new(None),
        }
    }

    pub fn showing(id: &str, url: &str) -> Self {
        let surface = Self::new(id);
        *surface.current.lock().unwrap() = Some(NavigationRequest::parse(url).unwrap());
        surface
    }
}

#[async_trait]
impl BrowsingSurface for MockBrowsingSurface {
    fn surface_id(&self) -> String {
        self.id.clone()
    }

    fn add_rule_list(&self, _handle: &RuleListHandle) {}

    fn remove_all_rule_lists(&self) {}

    fn current_request(&self) -> Option<NavigationRequest> {
        self.current.lock().unwrap().clone()
    }

    fn load(&self, request: NavigationRequest) {
        *self.current.lock().unwrap() = Some(request);
    }

    fn reload(&self) {}
}
