//! Structured form of a single EasyList network rule.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RulePolarity {
    Block,
    /// `@@` exception rule.
    Allow,
}

/// The URL part of a rule, classified by the EasyList syntax it uses.
///
/// `pattern` keeps the EasyList wildcard (`*`) and separator (`^`)
/// characters; translating them is left to the rule translator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlPattern {
    /// `||ads.example.com^`: matches the host and any of its subdomains.
    DomainAnchored { pattern: String, end_anchor: bool },
    /// `|https://example.com/`: matches from the start of the URL.
    StartAnchored { pattern: String, end_anchor: bool },
    /// `/banner/*.gif`: matches anywhere in the URL.
    Substring { pattern: String, end_anchor: bool },
    /// `/banner\d+/`: a raw regular expression, delimiters stripped.
    Regex(String),
}

impl UrlPattern {
    /// Host part of a domain-anchored pattern, up to the first separator,
    /// path or wildcard character.
    pub fn anchored_host(&self) -> Option<&str> {
        match self {
            UrlPattern::DomainAnchored { pattern, .. } => {
                let end = pattern
                    .find(['^', '/', '*', ':', '|', '?'])
                    .unwrap_or(pattern.len());
                let host = &pattern[..end];
                if host.is_empty() {
                    None
                } else {
                    Some(host)
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadType {
    FirstParty,
    ThirdParty,
}

/// EasyList resource-type option keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Document,
    Subdocument,
    Script,
    Image,
    Stylesheet,
    Font,
    Media,
    Object,
    XmlHttpRequest,
    WebSocket,
    Ping,
    Popup,
    Other,
}

impl ResourceType {
    pub const ALL: [ResourceType; 13] = [
        ResourceType::Document,
        ResourceType::Subdocument,
        ResourceType::Script,
        ResourceType::Image,
        ResourceType::Stylesheet,
        ResourceType::Font,
        ResourceType::Media,
        ResourceType::Object,
        ResourceType::XmlHttpRequest,
        ResourceType::WebSocket,
        ResourceType::Ping,
        ResourceType::Popup,
        ResourceType::Other,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "document" | "doc" => ResourceType::Document,
            "subdocument" | "frame" => ResourceType::Subdocument,
            "script" => ResourceType::Script,
            "image" => ResourceType::Image,
            "stylesheet" | "css" => ResourceType::Stylesheet,
            "font" => ResourceType::Font,
            "media" => ResourceType::Media,
            "object" | "object-subrequest" => ResourceType::Object,
            "xmlhttprequest" | "xhr" => ResourceType::XmlHttpRequest,
            "websocket" => ResourceType::WebSocket,
            "ping" | "beacon" => ResourceType::Ping,
            "popup" => ResourceType::Popup,
            "other" => ResourceType::Other,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub if_domains: Vec<String>,
    pub unless_domains: Vec<String>,
    pub load_type: Option<LoadType>,
    pub resource_types: Vec<ResourceType>,
    pub excluded_resource_types: Vec<ResourceType>,
    pub match_case: bool,
    pub important: bool,
    /// `$document` on an exception rule disables blocking for whole pages.
    pub document: bool,
}

impl RuleOptions {
    pub fn is_empty(&self) -> bool {
        *self == RuleOptions::default()
    }
}

/// One network rule derived from exactly one line of filter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub source_line: usize,
    pub polarity: RulePolarity,
    pub pattern: UrlPattern,
    pub options: RuleOptions,
}

impl ParsedRule {
    pub fn is_exception(&self) -> bool {
        self.polarity == RulePolarity::Allow
    }
}
