//! The analysis driver.
//!
//! Decodes class units, filters and coalesces their package names, folds the
//! results into one [`PackageGraph`], and answers questions about it.

use jdep_core::config::{split_list, JdepConfig};
use jdep_core::filter::PackageFilter;
use jdep_core::graph::{Package, PackageGraph};
use jdep_core::types::{ClassRecord, PackageId};
use jdep_parsers::batch::decode_all;
use jdep_parsers::{ClassUnit, DecodeError};

use crate::constraints::{EfferentConstraints, ForbiddenDependency};
use crate::dependency::{DependencyConstraint, MatchResult};
use crate::types::{AnalysisReport, CheckReport, FailureReport, PackageReport};

/// A unit that failed to decode. Nothing from it reaches the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    pub id: String,
    pub error: DecodeError,
}

/// What one [`Analyzer::analyze`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// Classes folded into the graph.
    pub folded: usize,
    /// Classes left out by the package filter or the inner-class switch.
    pub skipped: usize,
    pub failures: Vec<DecodeFailure>,
}

pub struct Analyzer {
    graph: PackageGraph,
    filter: PackageFilter,
    components: Vec<String>,
    analyze_inner_classes: bool,
    failures: Vec<DecodeFailure>,
}

impl Analyzer {
    /// Driver configured from `config`. Volatility overrides are applied up
    /// front, so those packages exist even before any class is folded.
    pub fn new(config: &JdepConfig) -> Self {
        let mut graph = PackageGraph::with_options(config.graph_options());
        for (name, volatility) in &config.volatility {
            graph.set_volatility(name, *volatility);
        }
        Self {
            graph,
            filter: config.package_filter(),
            components: config.components.clone(),
            analyze_inner_classes: config.analyze_inner_classes,
            failures: Vec::new(),
        }
    }

    pub fn set_filter(&mut self, filter: PackageFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &PackageFilter {
        &self.filter
    }

    /// Replace the component list with a comma-separated one.
    pub fn set_components(&mut self, components: &str) {
        self.components = split_list(components);
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn analyze_inner_classes(&mut self, enabled: bool) {
        self.analyze_inner_classes = enabled;
    }

    /// Create a package up front (it shows in the results even without classes).
    pub fn add_package(&mut self, name: &str) -> PackageId {
        self.graph.add_or_get_package(name)
    }

    /// Decode `units` in parallel, then fold them in input order.
    pub fn analyze(&mut self, units: &[ClassUnit]) -> AnalysisOutcome {
        let mut outcome = AnalysisOutcome::default();

        for (unit, result) in units.iter().zip(decode_all(units)) {
            match result {
                Ok(record) => match self.fold_record(record) {
                    Some(_) => outcome.folded += 1,
                    None => outcome.skipped += 1,
                },
                Err(error) => outcome.failures.push(DecodeFailure {
                    id: unit.id.clone(),
                    error,
                }),
            }
        }

        self.failures.extend(outcome.failures.iter().cloned());
        outcome
    }

    /// Fold one decoded class. Returns `None` when the class is left out.
    pub fn fold_record(&mut self, record: ClassRecord) -> Option<PackageId> {
        if !self.analyze_inner_classes && record.is_inner_class() {
            return None;
        }
        let filter = &self.filter;
        let components = &self.components;
        self.graph.fold_mapped(record, |name| {
            filter
                .accept(name)
                .then(|| to_component(components, name).to_string())
        })
    }

    pub fn graph(&self) -> &PackageGraph {
        &self.graph
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.graph.packages()
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.graph.get(name)
    }

    pub fn count_classes(&self) -> usize {
        self.graph.class_count()
    }

    pub fn count_packages(&self) -> usize {
        self.graph.len()
    }

    pub fn contains_cycles(&self) -> bool {
        self.graph.contains_cycles()
    }

    /// Every decode failure seen so far, across `analyze` calls.
    pub fn failures(&self) -> &[DecodeFailure] {
        &self.failures
    }

    pub fn are_prohibition_rules_fulfilled(
        &self,
        rules: &EfferentConstraints,
    ) -> Result<(), ForbiddenDependency> {
        rules.check_all(&self.graph)
    }

    pub fn dependency_match(&self, constraint: &DependencyConstraint) -> bool {
        constraint.matches(&self.graph)
    }

    pub fn analyze_dependencies(&self, constraint: &DependencyConstraint) -> MatchResult {
        constraint.match_packages(&self.graph)
    }

    pub fn report(&self) -> AnalysisReport {
        let graph = &self.graph;
        let mut packages: Vec<PackageReport> = graph
            .ids()
            .map(|id| {
                let p = graph.package(id);
                let cycle = graph.collect_all_cycles(id);
                PackageReport {
                    name: p.name().to_string(),
                    total_classes: p.class_count(),
                    concrete_classes: p.concrete_class_count(),
                    abstract_classes: p.abstract_class_count(),
                    afferent_coupling: p.afferent_coupling(),
                    efferent_coupling: p.efferent_coupling(),
                    abstractness: p.abstractness(),
                    instability: p.instability(),
                    distance: p.distance(),
                    volatility: p.volatility(),
                    efferents: owned(graph.efferent_names(id)),
                    afferents: owned(graph.afferent_names(id)),
                    cycle: owned(graph.names(&cycle.path)),
                }
            })
            .collect();
        packages.sort_by(|a, b| a.name.cmp(&b.name));

        let cycle_groups: Vec<Vec<String>> = graph
            .cycle_groups()
            .iter()
            .map(|group| owned(graph.names(group)))
            .collect();

        AnalysisReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "analyze".to_string(),
            total_classes: graph.class_count(),
            total_packages: graph.len(),
            contains_cycles: !cycle_groups.is_empty(),
            packages,
            cycle_groups,
            failures: self
                .failures
                .iter()
                .map(|f| FailureReport {
                    id: f.id.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }

    /// Run forbidden-efferent rules and, if given, the dependency whitelist.
    pub fn check(
        &self,
        rules: &EfferentConstraints,
        expected: Option<&DependencyConstraint>,
    ) -> CheckReport {
        let violation = self.are_prohibition_rules_fulfilled(rules).err();
        let dependency_match = expected.map(|c| self.analyze_dependencies(c));
        let mut report = CheckReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: String::new(),
            rules_checked: rules.len(),
            violation,
            dependency_match,
        };
        report.status = if report.passed() { "ok" } else { "violation" }.to_string();
        report
    }
}

/// Coalesce `name` into the first component it belongs to.
fn to_component<'a>(components: &'a [String], name: &'a str) -> &'a str {
    components
        .iter()
        .find(|c| {
            name.strip_prefix(c.as_str())
                .map_or(false, |rest| rest.starts_with('.'))
        })
        .map_or(name, String::as_str)
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod tests;
