//! Ferrous Shield Domain Layer
pub mod config;
pub mod content_blocker;
pub mod entitlement;
pub mod errors;
pub mod filter_list;
pub mod navigation;
pub mod rule;
pub mod rule_list;
pub mod whitelist;

pub use config::{CliOverrides, Config, DatabaseConfig, LoggingConfig};
pub use content_blocker::{
    ActionType, ContentBlockerAction, ContentBlockerDocument, ContentBlockerRule,
    ContentBlockerTrigger, HostLoadType, HostResourceType,
};
pub use entitlement::SubscriptionTier;
pub use errors::DomainError;
pub use filter_list::{FilterList, ListDownload, ListFormat};
pub use navigation::NavigationRequest;
pub use rule::{LoadType, ParsedRule, ResourceType, RuleOptions, RulePolarity, UrlPattern};
pub use rule_list::RuleListHandle;
pub use whitelist::{WhitelistInsert, WhitelistedDomain};
