use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Filter list not found: {0}")]
    FilterListNotFound(String),

    #[error("Filter list fetch error: {0}")]
    FilterListFetchError(String),

    #[error("Filter list storage error: {0}")]
    FilterListStorageError(String),

    #[error("Invalid content blocker document: {0}")]
    InvalidRuleDocument(String),

    #[error("Rule list compile error: {0}")]
    RuleListCompileError(String),

    #[error("Rule list not found: {0}")]
    RuleListNotFound(String),

    #[error("Preferences error: {0}")]
    PreferencesError(String),

    #[error("Entitlement lookup failed: {0}")]
    EntitlementError(String),
}
