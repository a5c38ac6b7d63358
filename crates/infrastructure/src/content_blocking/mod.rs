pub mod coordinator;
pub mod easylist;
pub mod matcher;
pub mod rule_list_store;
pub mod translator;

pub use coordinator::ContentBlockingCoordinator;
pub use easylist::{parse_filter_list, parse_rule_line};
pub use matcher::{BlockRequest, MatchOutcome, RuleListMatcher};
pub use rule_list_store::FileRuleListStore;
pub use translator::{generate, translate_filter_text};
