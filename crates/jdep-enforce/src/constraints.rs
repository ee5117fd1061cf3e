//! Forbidden-efferent rules.
//!
//! Each [`PackageRule`] names an owner package and the package patterns it
//! must not depend upon. A pattern ending in `*` matches any name with the
//! text before the `*` as prefix; any other pattern must match exactly.

use jdep_core::graph::PackageGraph;
use jdep_core::types::PackageId;
use serde::{Deserialize, Serialize};

/// A package depends on something one of its rules forbids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("Package {package} can't depend on {efferent}")]
pub struct ForbiddenDependency {
    pub efferent: String,
    pub package: String,
}

/// Forbidden efferent patterns for one owner package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRule {
    package: String,
    #[serde(default)]
    forbidden: Vec<String>,
}

impl PackageRule {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            forbidden: Vec::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Forbidden patterns in registration order.
    pub fn forbidden(&self) -> &[String] {
        &self.forbidden
    }

    /// Forbid `pattern`. The owner's own name and repeated patterns are ignored.
    pub fn should_not_depend_upon(&mut self, pattern: &str) -> &mut Self {
        if pattern != self.package && !self.forbidden.iter().any(|p| p == pattern) {
            self.forbidden.push(pattern.to_string());
        }
        self
    }
}

/// Ordered side table of forbidden-efferent rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EfferentConstraints {
    rules: Vec<PackageRule>,
}

impl EfferentConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON rule list:
    /// `[{"package": "com.acme.ui", "forbidden": ["com.acme.db*"]}]`.
    ///
    /// Rules run through [`add_package`](Self::add_package), so repeated
    /// owners merge and self patterns are dropped.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let parsed: Vec<PackageRule> = serde_json::from_str(text)?;
        let mut constraints = Self::new();
        for rule in parsed {
            let target = constraints.add_package(&rule.package);
            for pattern in &rule.forbidden {
                target.should_not_depend_upon(pattern);
            }
        }
        Ok(constraints)
    }

    /// Rule for `package`, created on first use.
    pub fn add_package(&mut self, package: &str) -> &mut PackageRule {
        let index = match self.rules.iter().position(|r| r.package == package) {
            Some(index) => index,
            None => {
                self.rules.push(PackageRule::new(package));
                self.rules.len() - 1
            }
        };
        &mut self.rules[index]
    }

    pub fn should_not_depend_upon(&mut self, package: &str, pattern: &str) -> &mut Self {
        self.add_package(package).should_not_depend_upon(pattern);
        self
    }

    /// First rule whose owner name contains `name` as a substring.
    ///
    /// Note the direction: the rule for `com.acme.ui` is found for `acme`,
    /// while a rule for `com.acme` is *not* found for `com.acme.ui`.
    pub fn find_rule_for(&self, name: &str) -> Option<&PackageRule> {
        self.rules.iter().find(|r| r.package.contains(name))
    }

    pub fn rules(&self) -> &[PackageRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check one package's efferents against the rule found for its name.
    pub fn are_efferents_valid(
        &self,
        graph: &PackageGraph,
        id: PackageId,
    ) -> Result<(), ForbiddenDependency> {
        let owner = graph.name_of(id);
        match self.find_rule_for(owner) {
            Some(rule) => {
                is_any_forbidden_efferent_present(owner, &graph.efferent_names(id), rule.forbidden())
            }
            None => Ok(()),
        }
    }

    /// Check every package in creation order, stopping at the first violation.
    pub fn check_all(&self, graph: &PackageGraph) -> Result<(), ForbiddenDependency> {
        graph.ids().try_for_each(|id| self.are_efferents_valid(graph, id))
    }
}

/// Test `efferents` against `patterns`, pattern by pattern in order.
pub fn is_any_forbidden_efferent_present(
    owner: &str,
    efferents: &[&str],
    patterns: &[String],
) -> Result<(), ForbiddenDependency> {
    for pattern in patterns {
        if let Some(efferent) = efferents.iter().find(|e| forbidden_matches(pattern, e)) {
            return Err(ForbiddenDependency {
                efferent: efferent.to_string(),
                package: owner.to_string(),
            });
        }
    }
    Ok(())
}

/// `name*` matches by prefix, anything else by equality.
pub fn forbidden_matches(pattern: &str, efferent: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => efferent.starts_with(prefix),
        None => efferent == pattern,
    }
}

#[cfg(test)]
#[path = "constraints_tests.rs"]
mod tests;
