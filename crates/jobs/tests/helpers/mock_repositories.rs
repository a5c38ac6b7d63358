use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_shield_application::ports::{FilterListFetcher, FilterListStorage, PreferencesStore};
use ferrous_shield_domain::{DomainError, ListDownload};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockFilterListFetcher {
    calls: AtomicUsize,
}

impl MockFilterListFetcher {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilterListFetcher for MockFilterListFetcher {
    async fn fetch(&self, url: &str) -> Result<ListDownload, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ListDownload {
            url: Arc::from(url),
            status: 200,
            etag: None,
            body: "||ads.example.com^\n".to_string(),
        })
    }
}

pub struct MockFilterListStorage {
    saved: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MockFilterListStorage {
    pub fn new() -> Self {
        Self {
            saved: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl FilterListStorage for MockFilterListStorage {
    async fn save(&self, list_name: &str, _download: &ListDownload) -> Result<PathBuf, DomainError> {
        self.saved
            .write()
            .await
            .insert(list_name.to_string(), Utc::now());
        Ok(PathBuf::from(format!("/mock/{}.txt", list_name)))
    }

    async fn read(&self, list_name: &str) -> Option<PathBuf> {
        self.saved
            .read()
            .await
            .get(list_name)
            .map(|_| PathBuf::from(format!("/mock/{}.txt", list_name)))
    }

    async fn delete(&self, list_name: &str) -> Result<(), DomainError> {
        self.saved.write().await.remove(list_name);
        Ok(())
    }

    async fn last_modified(&self, list_names: &[&str]) -> Option<DateTime<Utc>> {
        let saved = self.saved.read().await;
        let mut earliest: Option<DateTime<Utc>> = None;
        for name in list_names {
            let modified = *saved.get(*name)?;
            earliest = Some(earliest.map_or(modified, |e| e.min(modified)));
        }
        earliest
    }
}

pub struct MockPreferencesStore {
    bools: RwLock<HashMap<String, bool>>,
}

impl MockPreferencesStore {
    pub fn new() -> Self {
        Self {
            bools: RwLock::new(HashMap::new()),
        }
    }

    pub async fn bool_value(&self, key: &str) -> Option<bool> {
        self.bools.read().await.get(key).copied()
    }
}

#[async_trait]
impl PreferencesStore for MockPreferencesStore {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError> {
        Ok(self.bool_value(key).await)
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError> {
        self.bools.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_string(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Ok(None)
    }

    async fn set_string(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_strings(&self, _key: &str) -> Result<Vec<String>, DomainError> {
        Ok(Vec::new())
    }

    async fn set_strings(&self, _key: &str, _values: &[String]) -> Result<(), DomainError> {
        Ok(())
    }
}
