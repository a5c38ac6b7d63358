//! Translation of parsed EasyList rules into the host's content-blocker
//! rule format.
//!
//! Output order is: scoped block pairs, plain block rules, exceptions, then
//! `important` block rules, so that exceptions can never override an
//! important rule.
//!
//! A scoped pair comes from a rule carrying both `domain=a` and `~b.a`: the
//! host rejects triggers with both lists, so it becomes a block limited to
//! `a` followed by an `ignore-previous-rules` limited to `b.a`. Pairs lead
//! the document so a carve-out can only cancel earlier pairs, never an
//! unrelated rule.

use super::easylist::parse_filter_list;
use ferrous_shield_domain::{
    ActionType, ContentBlockerDocument, ContentBlockerRule, ContentBlockerTrigger, HostLoadType,
    HostResourceType, LoadType, ParsedRule, ResourceType, RuleOptions, UrlPattern,
};
use regex::RegexBuilder;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

const SEPARATOR_CLASS: &str = "[^a-zA-Z0-9_.%-]";
const TRAILING_SEPARATOR: &str = "([^a-zA-Z0-9_.%-].*)?$";
const DOMAIN_ANCHOR_PREFIX: &str = "^[^:]+://+([^/:]+\\.)?";
const MATCH_ALL: &str = ".*";

/// Parses and translates a filter list in one step.
pub fn translate_filter_text(text: &str) -> ContentBlockerDocument {
    generate(&parse_filter_list(text))
}

enum Translation {
    Single(ContentBlockerRule),
    Scoped {
        block: ContentBlockerRule,
        carve_out: ContentBlockerRule,
    },
}

pub fn generate(rules: &[ParsedRule]) -> ContentBlockerDocument {
    let mut scoped = Vec::new();
    let mut seen_pairs = FxHashSet::default();
    let mut blocks = Vec::new();
    let mut exceptions = Vec::new();
    let mut important = Vec::new();
    let mut dropped = 0usize;

    for rule in rules {
        let Some(translated) = translate_rule(rule) else {
            dropped += 1;
            continue;
        };

        match translated {
            Translation::Scoped { block, carve_out } => {
                if seen_pairs.insert((block.clone(), carve_out.clone())) {
                    scoped.push(block);
                    scoped.push(carve_out);
                }
            }
            Translation::Single(single) if rule.is_exception() => exceptions.push(single),
            Translation::Single(single) if rule.options.important => important.push(single),
            Translation::Single(single) => blocks.push(single),
        }
    }

    let mut output = scoped;
    output.extend(collapse(blocks));
    output.extend(collapse(exceptions));
    output.extend(collapse(important));

    debug!(
        parsed = rules.len(),
        dropped,
        emitted = output.len(),
        "Filter rules translated"
    );

    ContentBlockerDocument::new(output)
}

fn translate_rule(rule: &ParsedRule) -> Option<Translation> {
    let options = &rule.options;

    if rule.is_exception() && options.document {
        return page_exception(rule);
    }

    let mut trigger = ContentBlockerTrigger::new(translate_pattern(&rule.pattern)?);
    trigger.url_filter_is_case_sensitive = options.match_case;
    trigger.load_type = match options.load_type {
        Some(LoadType::FirstParty) => vec![HostLoadType::FirstParty],
        Some(LoadType::ThirdParty) => vec![HostLoadType::ThirdParty],
        None => Vec::new(),
    };
    trigger.resource_type = host_resource_types(options)?;

    let if_domains = domain_list(&options.if_domains);
    let unless_domains = domain_list(&options.unless_domains);

    let action = if rule.is_exception() {
        ActionType::IgnorePreviousRules
    } else {
        ActionType::Block
    };

    match (if_domains.is_empty(), unless_domains.is_empty()) {
        (false, true) => trigger.if_domain = if_domains,
        (true, false) => trigger.unless_domain = unless_domains,
        (false, false) => {
            trigger.if_domain = if_domains;
            if rule.is_exception() {
                return Some(Translation::Single(ContentBlockerRule::new(trigger, action)));
            }
            let mut carve_out = trigger.clone();
            carve_out.if_domain = unless_domains;
            return Some(Translation::Scoped {
                block: ContentBlockerRule::new(trigger, ActionType::Block),
                carve_out: ContentBlockerRule::new(carve_out, ActionType::IgnorePreviousRules),
            });
        }
        (true, true) => {}
    }

    Some(Translation::Single(ContentBlockerRule::new(trigger, action)))
}

/// `@@||host^$document`: disables every earlier rule on pages of `host`.
fn page_exception(rule: &ParsedRule) -> Option<Translation> {
    let host = rule.pattern.anchored_host()?;
    let mut trigger = ContentBlockerTrigger::new(MATCH_ALL);
    trigger.if_domain = vec![format!("*{}", host.to_ascii_lowercase())];
    Some(Translation::Single(ContentBlockerRule::new(
        trigger,
        ActionType::IgnorePreviousRules,
    )))
}

/// Translates a URL pattern into the host regex dialect. Returns `None` for
/// raw regexes the host cannot evaluate.
pub fn translate_pattern(pattern: &UrlPattern) -> Option<String> {
    let url_filter = match pattern {
        UrlPattern::DomainAnchored {
            pattern,
            end_anchor,
        } => format!(
            "{}{}",
            DOMAIN_ANCHOR_PREFIX,
            translate_body(pattern, *end_anchor)
        ),
        UrlPattern::StartAnchored {
            pattern,
            end_anchor,
        } => format!("^{}", translate_body(pattern, *end_anchor)),
        UrlPattern::Substring {
            pattern,
            end_anchor,
        } => {
            let body = translate_body(pattern, *end_anchor);
            if body.is_empty() {
                MATCH_ALL.to_string()
            } else {
                body
            }
        }
        UrlPattern::Regex(regex) => {
            if !is_host_compatible_regex(regex) {
                debug!(regex = %regex, "Regex rule not supported by host dialect");
                return None;
            }
            regex.clone()
        }
    };

    Some(url_filter)
}

fn translate_body(pattern: &str, end_anchor: bool) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let last = pattern.len().saturating_sub(1);

    for (idx, c) in pattern.char_indices() {
        match c {
            '*' => out.push_str(".*"),
            '^' if idx == last && !end_anchor => out.push_str(TRAILING_SEPARATOR),
            '^' => out.push_str(SEPARATOR_CLASS),
            '.' | '+' | '?' | '$' | '{' | '}' | '(' | ')' | '[' | ']' | '\\' | '|' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    if end_anchor {
        out.push('$');
    }

    out
}

/// The host dialect is a small ASCII subset of regular expressions: no
/// alternation, counted repetition, backreferences, shorthand classes,
/// word boundaries or lookaround.
pub fn is_host_compatible_regex(regex: &str) -> bool {
    if regex.is_empty() || !regex.is_ascii() {
        return false;
    }

    let bytes = regex.as_bytes();
    let mut idx = 0;
    let mut in_class = false;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => {
                let Some(&next) = bytes.get(idx + 1) else {
                    return false;
                };
                if next.is_ascii_alphanumeric() {
                    return false;
                }
                idx += 2;
                continue;
            }
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'|' | b'{' | b'}' if !in_class => return false,
            b'(' if !in_class && bytes.get(idx + 1) == Some(&b'?') => return false,
            _ => {}
        }
        idx += 1;
    }

    !in_class
        && RegexBuilder::new(regex)
            .case_insensitive(true)
            .build()
            .is_ok()
}

fn domain_list(domains: &[String]) -> Vec<String> {
    let mut list: Vec<String> = domains
        .iter()
        .map(|d| format!("*{}", d.trim_start_matches('*')))
        .collect();
    list.sort();
    list.dedup();
    list
}

fn host_resource_type(resource_type: ResourceType) -> HostResourceType {
    match resource_type {
        ResourceType::Document | ResourceType::Subdocument => HostResourceType::Document,
        ResourceType::Script => HostResourceType::Script,
        ResourceType::Image => HostResourceType::Image,
        ResourceType::Stylesheet => HostResourceType::StyleSheet,
        ResourceType::Font => HostResourceType::Font,
        ResourceType::Media | ResourceType::Object => HostResourceType::Media,
        ResourceType::Popup => HostResourceType::Popup,
        ResourceType::XmlHttpRequest
        | ResourceType::WebSocket
        | ResourceType::Ping
        | ResourceType::Other => HostResourceType::Raw,
    }
}

/// Empty means "all types". `None` when the excluded types leave nothing to
/// match.
fn host_resource_types(options: &RuleOptions) -> Option<Vec<HostResourceType>> {
    let selected: Vec<ResourceType> = if !options.resource_types.is_empty() {
        options.resource_types.clone()
    } else if !options.excluded_resource_types.is_empty() {
        ResourceType::ALL
            .iter()
            .copied()
            .filter(|t| !options.excluded_resource_types.contains(t))
            .collect()
    } else {
        return Some(Vec::new());
    };

    let mut host: Vec<HostResourceType> = selected.into_iter().map(host_resource_type).collect();
    host.sort();
    host.dedup();

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Emits identical rules once and folds block rules that differ only in a
/// non-empty `if-domain` list into the first of them. Only used on sections
/// of a single action kind, where moving a rule within the section cannot
/// change the outcome.
fn collapse(rules: Vec<ContentBlockerRule>) -> Vec<ContentBlockerRule> {
    let mut output: Vec<ContentBlockerRule> = Vec::with_capacity(rules.len());
    let mut seen: FxHashSet<ContentBlockerRule> = FxHashSet::default();
    let mut merge_slots: FxHashMap<ContentBlockerTrigger, usize> = FxHashMap::default();

    for rule in rules {
        let mergeable = !rule.is_ignore_previous() && !rule.trigger.if_domain.is_empty();

        if mergeable {
            let mut key = rule.trigger.clone();
            key.if_domain.clear();

            if let Some(&slot) = merge_slots.get(&key) {
                let domains = &mut output[slot].trigger.if_domain;
                domains.extend(rule.trigger.if_domain);
                domains.sort();
                domains.dedup();
                continue;
            }

            merge_slots.insert(key, output.len());
            output.push(rule);
            continue;
        }

        if seen.insert(rule.clone()) {
            output.push(rule);
        }
    }

    output
}
