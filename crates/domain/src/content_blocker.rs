//! Host content-blocker rule format (trigger/action pairs).

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostResourceType {
    Document,
    Image,
    StyleSheet,
    Script,
    Font,
    Raw,
    SvgDocument,
    Media,
    Popup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostLoadType {
    FirstParty,
    ThirdParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Block,
    IgnorePreviousRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentBlockerTrigger {
    pub url_filter: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub url_filter_is_case_sensitive: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub if_domain: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unless_domain: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_type: Vec<HostLoadType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_type: Vec<HostResourceType>,
}

impl ContentBlockerTrigger {
    pub fn new(url_filter: impl Into<String>) -> Self {
        Self {
            url_filter: url_filter.into(),
            url_filter_is_case_sensitive: false,
            if_domain: Vec::new(),
            unless_domain: Vec::new(),
            load_type: Vec::new(),
            resource_type: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentBlockerAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentBlockerRule {
    pub trigger: ContentBlockerTrigger,
    pub action: ContentBlockerAction,
}

impl ContentBlockerRule {
    pub fn new(trigger: ContentBlockerTrigger, action_type: ActionType) -> Self {
        Self {
            trigger,
            action: ContentBlockerAction { action_type },
        }
    }

    pub fn is_ignore_previous(&self) -> bool {
        self.action.action_type == ActionType::IgnorePreviousRules
    }
}

/// An ordered rule list, evaluated by the host in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentBlockerDocument {
    pub rules: Vec<ContentBlockerRule>,
}

impl ContentBlockerDocument {
    pub fn new(rules: Vec<ContentBlockerRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.rules)
            .map_err(|e| DomainError::InvalidRuleDocument(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str::<Vec<ContentBlockerRule>>(json)
            .map(Self::new)
            .map_err(|e| DomainError::InvalidRuleDocument(e.to_string()))
    }
}
