#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistedDomain {
    pub domain: String,
}

/// Outcome of adding a domain to the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistInsert {
    Added,
    AlreadyPresent,
}

impl WhitelistedDomain {
    pub fn new(domain: String) -> Self {
        Self { domain }
    }

    /// Validates user input and reduces it to a bare lower-case host.
    ///
    /// Accepts a pasted URL (`https://www.example.com/page`) as well as a
    /// plain host.
    pub fn parse(input: &str) -> Result<Self, String> {
        let normalized = Self::normalize(input);
        Self::validate_domain(&normalized)?;
        Ok(Self::new(normalized))
    }

    pub fn normalize(input: &str) -> String {
        let mut s = input.trim().to_ascii_lowercase();

        if let Some(pos) = s.find("://") {
            s = s[pos + 3..].to_string();
        }

        if let Some(end) = s.find(['/', '?', '#']) {
            s.truncate(end);
        }

        if let Some(at) = s.rfind('@') {
            s = s[at + 1..].to_string();
        }

        if let Some(colon) = s.find(':') {
            s.truncate(colon);
        }

        s.trim_end_matches('.').to_string()
    }

    pub fn validate_domain(domain: &str) -> Result<(), String> {
        if domain.is_empty() {
            return Err("Domain cannot be empty".to_string());
        }

        if domain.len() > 253 {
            return Err("Domain cannot exceed 253 characters".to_string());
        }

        if !domain.contains('.') {
            return Err(format!("'{}' is not a valid domain", domain));
        }

        for label in domain.split('.') {
            if label.is_empty() || label.len() > 63 {
                return Err(format!("'{}' is not a valid domain", domain));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(format!("'{}' is not a valid domain", domain));
            }
            if !label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                return Err(format!("'{}' contains invalid characters", domain));
            }
        }

        Ok(())
    }
}
