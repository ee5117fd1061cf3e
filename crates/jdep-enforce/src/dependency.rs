//! Whitelist of the expected package dependency shape.

use std::collections::BTreeMap;

use jdep_core::graph::PackageGraph;
use serde::{Deserialize, Serialize};

/// Expected packages and the efferents each one is allowed to have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyConstraint {
    packages: Vec<(String, Vec<String>)>,
}

/// Differences between an analyzed graph and a [`DependencyConstraint`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Declared but not found by the analysis.
    pub missing_packages: Vec<String>,
    /// Found by the analysis but not declared.
    pub unexpected_packages: Vec<String>,
    pub efferent_differences: Vec<EfferentDifference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfferentDifference {
    pub package: String,
    pub unexpected: Vec<String>,
    pub missing: Vec<String>,
}

impl MatchResult {
    pub fn matches(&self) -> bool {
        self.missing_packages.is_empty()
            && self.unexpected_packages.is_empty()
            && self.efferent_differences.is_empty()
    }
}

impl DependencyConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"package": ["efferent", ...], ...}`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(text)?;
        let mut constraint = Self::new();
        for (package, efferents) in parsed {
            constraint.add_package(&package);
            for efferent in efferents {
                constraint.depends_upon(&package, &efferent);
            }
        }
        Ok(constraint)
    }

    /// Declare a package. Idempotent.
    pub fn add_package(&mut self, name: &str) -> &mut Self {
        self.index_of(name);
        self
    }

    /// Declare `from -> to`, declaring both packages as needed.
    pub fn depends_upon(&mut self, from: &str, to: &str) -> &mut Self {
        self.index_of(to);
        let index = self.index_of(from);
        let efferents = &mut self.packages[index].1;
        if from != to && !efferents.iter().any(|e| e == to) {
            efferents.push(to.to_string());
        }
        self
    }

    fn index_of(&mut self, name: &str) -> usize {
        match self.packages.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.packages.push((name.to_string(), Vec::new()));
                self.packages.len() - 1
            }
        }
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|(name, _)| name.as_str())
    }

    pub fn efferents_of(&self, name: &str) -> Option<&[String]> {
        self.packages
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, efferents)| efferents.as_slice())
    }

    /// Compare `graph` against the declared shape.
    pub fn match_packages(&self, graph: &PackageGraph) -> MatchResult {
        let mut result = MatchResult::default();

        for (name, expected) in &self.packages {
            let Some(id) = graph.id_of(name) else {
                result.missing_packages.push(name.clone());
                continue;
            };
            let actual = graph.efferent_names(id);
            let unexpected: Vec<String> = actual
                .iter()
                .filter(|a| !expected.iter().any(|e| e == *a))
                .map(|a| a.to_string())
                .collect();
            let missing: Vec<String> = expected
                .iter()
                .filter(|e| !actual.contains(&e.as_str()))
                .cloned()
                .collect();
            if !unexpected.is_empty() || !missing.is_empty() {
                result.efferent_differences.push(EfferentDifference {
                    package: name.clone(),
                    unexpected,
                    missing,
                });
            }
        }

        for package in graph.packages() {
            if self.efferents_of(package.name()).is_none() {
                result.unexpected_packages.push(package.name().to_string());
            }
        }

        result
    }

    pub fn matches(&self, graph: &PackageGraph) -> bool {
        self.match_packages(graph).matches()
    }
}
