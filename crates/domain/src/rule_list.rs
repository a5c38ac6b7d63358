use crate::content_blocker::ContentBlockerRule;
use std::fmt;
use std::sync::Arc;

/// A compiled rule list as handed back by the host engine, keyed by the
/// filter list name it was compiled from.
#[derive(Clone)]
pub struct RuleListHandle {
    identifier: Arc<str>,
    rules: Arc<[ContentBlockerRule]>,
}

impl RuleListHandle {
    pub fn new(identifier: impl Into<Arc<str>>, rules: Vec<ContentBlockerRule>) -> Self {
        Self {
            identifier: identifier.into(),
            rules: Arc::from(rules),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn rules(&self) -> &[ContentBlockerRule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl fmt::Debug for RuleListHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleListHandle")
            .field("identifier", &self.identifier)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl PartialEq for RuleListHandle {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier && Arc::ptr_eq(&self.rules, &other.rules)
    }
}
