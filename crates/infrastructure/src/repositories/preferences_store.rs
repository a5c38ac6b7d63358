use async_trait::async_trait;
use ferrous_shield_application::ports::PreferencesStore;
use ferrous_shield_domain::DomainError;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use tracing::warn;

/// Key/value preferences, each value stored as JSON text.
pub struct SqlitePreferencesStore {
    pool: SqlitePool,
}

impl SqlitePreferencesStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_value(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.get("value");
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed preference value");
                Ok(None)
            }
        }
    }

    async fn set_value(&self, key: &str, value: Value) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PreferencesStore for SqlitePreferencesStore {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError> {
        Ok(self.get_value(key).await?.and_then(|v| v.as_bool()))
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError> {
        self.set_value(key, Value::Bool(value)).await
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .get_value(key)
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.set_value(key, Value::String(value.to_string())).await
    }

    async fn get_strings(&self, key: &str) -> Result<Vec<String>, DomainError> {
        let Some(value) = self.get_value(key).await? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_value::<Vec<String>>(value).unwrap_or_else(|e| {
            warn!(key, error = %e, "Preference is not a string list");
            Vec::new()
        }))
    }

    async fn set_strings(&self, key: &str, values: &[String]) -> Result<(), DomainError> {
        let value = serde_json::to_value(values)
            .map_err(|e| DomainError::PreferencesError(e.to_string()))?;
        self.set_value(key, value).await
    }
}
