//! The package dependency graph.
//!
//! Packages live in an arena keyed by name; edges are stored as [`PackageId`]
//! lists on both endpoints, so cyclic dependencies never form ownership cycles.
//! For every pair of packages `A`, `B`: `B ∈ A.efferents ⇔ A ∈ B.afferents`.

use std::collections::HashMap;

use crate::types::{ClassRecord, PackageId};

/// Graph construction switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Keep `A -> A` edges instead of dropping them.
    pub allow_self_dependency: bool,
}

/// One node of the dependency graph.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    classes: Vec<ClassRecord>,
    abstract_classes: usize,
    efferents: Vec<PackageId>,
    afferents: Vec<PackageId>,
    volatility: u32,
}

impl Package {
    fn new(name: String) -> Self {
        Self {
            name,
            classes: Vec::new(),
            abstract_classes: 0,
            efferents: Vec::new(),
            afferents: Vec::new(),
            volatility: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classes in the order they were folded in.
    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn abstract_class_count(&self) -> usize {
        self.abstract_classes
    }

    pub fn concrete_class_count(&self) -> usize {
        self.classes.len() - self.abstract_classes
    }

    /// Packages this one depends upon, in edge-insertion order.
    pub fn efferents(&self) -> &[PackageId] {
        &self.efferents
    }

    /// Packages depending upon this one, in edge-insertion order.
    pub fn afferents(&self) -> &[PackageId] {
        &self.afferents
    }

    pub fn volatility(&self) -> u32 {
        self.volatility
    }

    /// Afferent coupling (Ca).
    pub fn afferent_coupling(&self) -> usize {
        self.afferents.len()
    }

    /// Efferent coupling (Ce).
    pub fn efferent_coupling(&self) -> usize {
        self.efferents.len()
    }

    /// Abstractness (A): abstract classes over all classes, 0 for an empty package.
    pub fn abstractness(&self) -> f64 {
        if self.classes.is_empty() {
            return 0.0;
        }
        self.abstract_classes as f64 / self.classes.len() as f64
    }

    /// Instability (I): `Ce / (Ce + Ca)`, 0 for an uncoupled package.
    pub fn instability(&self) -> f64 {
        let ce = self.efferent_coupling();
        let total = ce + self.afferent_coupling();
        if total == 0 {
            return 0.0;
        }
        ce as f64 / total as f64
    }

    /// Distance from the main sequence (D): `|A + I - 1| * volatility`.
    pub fn distance(&self) -> f64 {
        (self.abstractness() + self.instability() - 1.0).abs() * f64::from(self.volatility)
    }
}

/// Arena-backed directed graph of packages.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    pub(crate) packages: Vec<Package>,
    by_name: HashMap<String, PackageId>,
    options: GraphOptions,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Look up a package by name, creating it on first reference.
    pub fn add_or_get_package(&mut self, name: &str) -> PackageId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = PackageId(self.packages.len());
        self.packages.push(Package::new(name.to_string()));
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<PackageId> {
        self.by_name.get(name).copied()
    }

    /// Package for an id handed out by this graph.
    ///
    /// Panics if `id` came from a different graph.
    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.id_of(name).map(|id| self.package(id))
    }

    /// All packages in creation order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PackageId> {
        (0..self.packages.len()).map(PackageId)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Total number of classes folded into the graph.
    pub fn class_count(&self) -> usize {
        self.packages.iter().map(Package::class_count).sum()
    }

    /// Add the edge `from -> to`, updating both endpoints.
    ///
    /// Returns `false` when the edge already existed or was a self edge that
    /// the graph options reject.
    pub fn record_dependency(&mut self, from: PackageId, to: PackageId) -> bool {
        if from == to && !self.options.allow_self_dependency {
            return false;
        }
        if self.packages[from.0].efferents.contains(&to) {
            return false;
        }
        self.packages[from.0].efferents.push(to);
        self.packages[to.0].afferents.push(from);
        true
    }

    /// Name-based form of [`record_dependency`](Self::record_dependency),
    /// creating either package as needed.
    pub fn depends_upon(&mut self, from: &str, to: &str) -> bool {
        let from = self.add_or_get_package(from);
        let to = self.add_or_get_package(to);
        self.record_dependency(from, to)
    }

    pub fn add_class(&mut self, id: PackageId, record: ClassRecord) {
        let package = &mut self.packages[id.0];
        if record.is_abstract() {
            package.abstract_classes += 1;
        }
        package.classes.push(record);
    }

    /// Fold a decoded class into the graph: its package gains the class and
    /// an edge to every package the class references.
    pub fn fold(&mut self, record: ClassRecord) -> PackageId {
        let owner = record.package_name().to_string();
        let targets: Vec<String> = record.referenced_packages().iter().cloned().collect();
        self.fold_named(&owner, record, &targets)
    }

    /// Like [`fold`](Self::fold), with every package name passed through `map`
    /// first. `map` returning `None` for the owner skips the record entirely
    /// (returning `None`); returning `None` for a reference drops that edge.
    pub fn fold_mapped<F>(&mut self, record: ClassRecord, mut map: F) -> Option<PackageId>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let owner = map(record.package_name())?;
        let targets: Vec<String> = record
            .referenced_packages()
            .iter()
            .filter_map(|name| map(name.as_str()))
            .collect();
        Some(self.fold_named(&owner, record, &targets))
    }

    fn fold_named(&mut self, owner: &str, record: ClassRecord, targets: &[String]) -> PackageId {
        let owner_id = self.add_or_get_package(owner);
        self.add_class(owner_id, record);
        for target in targets {
            let target_id = self.add_or_get_package(target);
            self.record_dependency(owner_id, target_id);
        }
        owner_id
    }

    /// Override the volatility of `name`, creating the package if needed.
    pub fn set_volatility(&mut self, name: &str, volatility: u32) -> PackageId {
        let id = self.add_or_get_package(name);
        self.packages[id.0].volatility = volatility;
        id
    }

    pub fn name_of(&self, id: PackageId) -> &str {
        &self.packages[id.0].name
    }

    /// Names for a sequence of ids, preserving order.
    pub fn names<'g>(&'g self, ids: &[PackageId]) -> Vec<&'g str> {
        ids.iter().map(|&id| self.name_of(id)).collect()
    }

    pub fn efferent_names(&self, id: PackageId) -> Vec<&str> {
        self.names(&self.packages[id.0].efferents)
    }

    pub fn afferent_names(&self, id: PackageId) -> Vec<&str> {
        self.names(&self.packages[id.0].afferents)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
