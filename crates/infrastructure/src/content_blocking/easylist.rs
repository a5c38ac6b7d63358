use ferrous_shield_domain::{
    LoadType, ParsedRule, ResourceType, RuleOptions, RulePolarity, UrlPattern,
};

const MAX_LINE_LEN: usize = 4096;

const COSMETIC_MARKERS: [&str; 7] = ["##", "#@#", "#?#", "#$#", "#%#", "#@?#", "#@$#"];

/// Parses a whole filter list, one rule per supported line, in line order.
pub fn parse_filter_list(text: &str) -> Vec<ParsedRule> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_rule_line(line, idx + 1))
        .collect()
}

/// Parses one line of EasyList syntax. Unsupported or malformed lines yield
/// `None`; this never fails.
pub fn parse_rule_line(line: &str, line_number: usize) -> Option<ParsedRule> {
    let line = line.trim();

    if line.is_empty() || line.len() > MAX_LINE_LEN {
        return None;
    }

    if line.starts_with('!') || line.starts_with('[') || line.starts_with('#') {
        return None;
    }

    if !line.is_ascii() || line.bytes().any(|b| b.is_ascii_whitespace()) {
        return None;
    }

    if COSMETIC_MARKERS.iter().any(|m| line.contains(m)) {
        return None;
    }

    let (polarity, body) = match line.strip_prefix("@@") {
        Some(rest) => (RulePolarity::Allow, rest),
        None => (RulePolarity::Block, line),
    };

    let (pattern_text, options_text) = split_options(body);

    let options = match options_text {
        Some(text) => parse_options(text)?,
        None => RuleOptions::default(),
    };

    let pattern = classify_pattern(pattern_text)?;

    Some(ParsedRule {
        source_line: line_number,
        polarity,
        pattern,
        options,
    })
}

fn is_regex_literal(text: &str) -> bool {
    text.len() > 2 && text.starts_with('/') && text.ends_with('/')
}

/// Splits `pattern$options` on the last `$`. A `$` inside a `/regex/`
/// pattern is part of the regex.
fn split_options(body: &str) -> (&str, Option<&str>) {
    if is_regex_literal(body) {
        return (body, None);
    }

    match body.rfind('$') {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    }
}

fn parse_options(text: &str) -> Option<RuleOptions> {
    let mut options = RuleOptions::default();

    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (negated, token) = match token.strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let (key, value) = match token.split_once('=') {
            Some((k, v)) => (k.to_ascii_lowercase(), Some(v)),
            None => (token.to_ascii_lowercase(), None),
        };

        match (key.as_str(), value) {
            ("domain", Some(domains)) if !negated => {
                parse_domains(domains, &mut options)?;
            }
            ("third-party" | "3p", None) => {
                options.load_type = Some(if negated {
                    LoadType::FirstParty
                } else {
                    LoadType::ThirdParty
                });
            }
            ("first-party" | "1p", None) => {
                options.load_type = Some(if negated {
                    LoadType::ThirdParty
                } else {
                    LoadType::FirstParty
                });
            }
            ("match-case", None) => options.match_case = !negated,
            ("important", None) if !negated => options.important = true,
            (keyword, None) => {
                let resource_type = ResourceType::from_keyword(keyword)?;
                if negated {
                    options.excluded_resource_types.push(resource_type);
                } else {
                    if resource_type == ResourceType::Document {
                        options.document = true;
                    }
                    options.resource_types.push(resource_type);
                }
            }
            _ => return None,
        }
    }

    Some(options)
}

fn parse_domains(value: &str, options: &mut RuleOptions) -> Option<()> {
    let before = options.if_domains.len() + options.unless_domains.len();

    for domain in value.split('|') {
        let domain = domain.trim();
        if domain.is_empty() {
            continue;
        }
        match domain.strip_prefix('~') {
            Some(excluded) if !excluded.is_empty() => {
                options.unless_domains.push(excluded.to_ascii_lowercase());
            }
            Some(_) => {}
            None => options.if_domains.push(domain.to_ascii_lowercase()),
        }
    }

    if options.if_domains.len() + options.unless_domains.len() == before {
        return None;
    }

    Some(())
}

fn classify_pattern(text: &str) -> Option<UrlPattern> {
    if is_regex_literal(text) {
        return Some(UrlPattern::Regex(text[1..text.len() - 1].to_string()));
    }

    if let Some(rest) = text.strip_prefix("||") {
        let (pattern, end_anchor) = strip_end_anchor(rest);
        if pattern.is_empty() {
            return None;
        }
        return Some(UrlPattern::DomainAnchored {
            pattern: pattern.to_string(),
            end_anchor,
        });
    }

    if let Some(rest) = text.strip_prefix('|') {
        let (pattern, end_anchor) = strip_end_anchor(rest);
        return Some(UrlPattern::StartAnchored {
            pattern: pattern.to_string(),
            end_anchor,
        });
    }

    let (pattern, end_anchor) = strip_end_anchor(text);
    Some(UrlPattern::Substring {
        pattern: pattern.trim_start_matches('*').to_string(),
        end_anchor,
    })
}

fn strip_end_anchor(text: &str) -> (&str, bool) {
    match text.strip_suffix('|') {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}
