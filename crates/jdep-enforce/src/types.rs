use serde::{Deserialize, Serialize};

use crate::constraints::ForbiddenDependency;
use crate::dependency::MatchResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub version: String,
    pub command: String,
    pub total_classes: usize,
    pub total_packages: usize,
    pub contains_cycles: bool,
    /// Packages sorted by name.
    pub packages: Vec<PackageReport>,
    /// Groups of mutually dependent packages, each sorted by creation order.
    pub cycle_groups: Vec<Vec<String>>,
    pub failures: Vec<FailureReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageReport {
    pub name: String,
    pub total_classes: usize,
    pub concrete_classes: usize,
    pub abstract_classes: usize,
    pub afferent_coupling: usize,
    pub efferent_coupling: usize,
    pub abstractness: f64,
    pub instability: f64,
    pub distance: f64,
    pub volatility: u32,
    pub efferents: Vec<String>,
    pub afferents: Vec<String>,
    /// Cycle path from this package; empty when no cycle is reachable.
    pub cycle: Vec<String>,
}

/// A unit that could not be decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReport {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "violation"
    pub rules_checked: usize,
    pub violation: Option<ForbiddenDependency>,
    pub dependency_match: Option<MatchResult>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.violation.is_none()
            && self
                .dependency_match
                .as_ref()
                .map_or(true, MatchResult::matches)
    }
}
