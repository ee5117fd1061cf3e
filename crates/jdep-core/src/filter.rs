//! Package name filtering.
//!
//! A filter is an ordered list of include/exclude rules. The first rule whose
//! pattern matches a package name decides; names matching no rule are accepted.
//!
//! Pattern forms:
//! - `java.*` / `java*`: any name starting with the text before the `*`
//! - `com.acme`: `com.acme` itself and every `com.acme.` sub-package

/// One include or exclude rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub pattern: String,
    pub include: bool,
}

impl FilterRule {
    pub fn matches(&self, package: &str) -> bool {
        pattern_matches(&self.pattern, package)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    rules: Vec<FilterRule>,
}

impl PackageFilter {
    /// A filter accepting every package.
    pub fn all() -> Self {
        Self::default()
    }

    /// Append exclude rules. Patterns already present are skipped.
    pub fn excluding<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.push(pattern.into(), false);
        }
        self
    }

    /// Append include rules. Patterns already present are skipped.
    pub fn including<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.push(pattern.into(), true);
        }
        self
    }

    fn push(&mut self, pattern: String, include: bool) {
        let pattern = pattern.trim().to_string();
        if pattern.is_empty() || self.rules.iter().any(|r| r.pattern == pattern) {
            return;
        }
        self.rules.push(FilterRule { pattern, include });
    }

    pub fn accept(&self, package: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| rule.matches(package))
            .map_or(true, |rule| rule.include)
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn pattern_matches(pattern: &str, package: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => package.starts_with(prefix),
        None => {
            package == pattern
                || (package.starts_with(pattern) && package[pattern.len()..].starts_with('.'))
        }
    }
}
