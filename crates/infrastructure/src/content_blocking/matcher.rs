use ferrous_shield_domain::{
    ActionType, ContentBlockerRule, DomainError, HostLoadType, HostResourceType,
};
use regex::{Regex, RegexBuilder};
use url::Url;

/// A sub-resource load to evaluate against a compiled rule list.
#[derive(Debug, Clone)]
pub struct BlockRequest {
    pub url: Url,
    /// Host of the page issuing the load.
    pub source_domain: Option<String>,
    pub resource_type: HostResourceType,
    pub load_type: HostLoadType,
}

impl BlockRequest {
    pub fn new(url: Url, source: Option<&Url>, resource_type: HostResourceType) -> Self {
        let source_domain = source.and_then(host_of);
        let load_type = match (host_of(&url), source_domain.as_deref()) {
            (Some(target), Some(page)) if !same_site(&target, page) => HostLoadType::ThirdParty,
            _ => HostLoadType::FirstParty,
        };

        Self {
            url,
            source_domain,
            resource_type,
            load_type,
        }
    }
}

fn host_of(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
}

/// Hosts sharing their last two labels count as the same site.
fn same_site(a: &str, b: &str) -> bool {
    site_of(a) == site_of(b)
}

fn site_of(host: &str) -> &str {
    if host.parse::<std::net::IpAddr>().is_ok() {
        return host;
    }
    match host.rmatch_indices('.').nth(1) {
        Some((pos, _)) => &host[pos + 1..],
        None => host,
    }
}

fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    host == domain
        || (host.len() > domain.len()
            && host.ends_with(domain)
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Blocked,
    Allowed,
}

struct CompiledRule {
    url_filter: Regex,
    if_domain: Vec<String>,
    unless_domain: Vec<String>,
    load_type: Vec<HostLoadType>,
    resource_type: Vec<HostResourceType>,
    action: ActionType,
}

impl CompiledRule {
    fn matches(&self, request: &BlockRequest) -> bool {
        if !self.resource_type.is_empty() && !self.resource_type.contains(&request.resource_type) {
            return false;
        }

        if !self.load_type.is_empty() && !self.load_type.contains(&request.load_type) {
            return false;
        }

        if !self.url_filter.is_match(request.url.as_str()) {
            return false;
        }

        let source = request.source_domain.as_deref();

        if !self.if_domain.is_empty() {
            return source.is_some_and(|d| domain_matches(&self.if_domain, d));
        }

        if !self.unless_domain.is_empty() {
            return !source.is_some_and(|d| domain_matches(&self.unless_domain, d));
        }

        true
    }
}

/// `*example.com` matches the domain and its subdomains; a bare entry
/// matches only itself.
fn domain_matches(entries: &[String], domain: &str) -> bool {
    entries.iter().any(|entry| match entry.strip_prefix('*') {
        Some(suffix) => is_same_or_subdomain(domain, suffix),
        None => domain == entry,
    })
}

/// Evaluates requests the way the host engine does: rules apply in order,
/// and `ignore-previous-rules` discards every earlier match.
pub struct RuleListMatcher {
    rules: Vec<CompiledRule>,
}

impl RuleListMatcher {
    pub fn new(rules: &[ContentBlockerRule]) -> Result<Self, DomainError> {
        let compiled = rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| {
                let url_filter = RegexBuilder::new(&rule.trigger.url_filter)
                    .case_insensitive(!rule.trigger.url_filter_is_case_sensitive)
                    .build()
                    .map_err(|e| {
                        DomainError::RuleListCompileError(format!(
                            "rule {}: invalid url-filter '{}': {}",
                            idx, rule.trigger.url_filter, e
                        ))
                    })?;

                if !rule.trigger.if_domain.is_empty() && !rule.trigger.unless_domain.is_empty() {
                    return Err(DomainError::RuleListCompileError(format!(
                        "rule {}: if-domain and unless-domain are mutually exclusive",
                        idx
                    )));
                }

                Ok(CompiledRule {
                    url_filter,
                    if_domain: lowercase_all(&rule.trigger.if_domain),
                    unless_domain: lowercase_all(&rule.trigger.unless_domain),
                    load_type: rule.trigger.load_type.clone(),
                    resource_type: rule.trigger.resource_type.clone(),
                    action: rule.action.action_type,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self { rules: compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn evaluate(&self, request: &BlockRequest) -> MatchOutcome {
        let mut blocked = false;

        for rule in &self.rules {
            if !rule.matches(request) {
                continue;
            }
            match rule.action {
                ActionType::Block => blocked = true,
                ActionType::IgnorePreviousRules => blocked = false,
            }
        }

        if blocked {
            MatchOutcome::Blocked
        } else {
            MatchOutcome::Allowed
        }
    }
}

fn lowercase_all(domains: &[String]) -> Vec<String> {
    domains.iter().map(|d| d.to_ascii_lowercase()).collect()
}
