//! Package dependency cycles.
//!
//! [`PackageGraph::collect_all_cycles`] walks efferents depth-first in
//! edge-insertion order and returns one linear path per start package. A node
//! that already occurs in the path closes a cycle and is appended without being
//! descended into; a node whose subtree closed no cycle is taken back out of the
//! path. Every cycle reachable from the start appears, concatenated in
//! traversal order.
//!
//! A node taken back out can reach neither a cycle nor any node still on the
//! path, so each walk remembers those nodes and never enters them again.

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::graph::PackageGraph;
use crate::types::PackageId;

/// Result of a full cycle-path enumeration from one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CyclePath {
    pub contains_cycle: bool,
    /// Visited packages, repeated exactly where a cycle closes. Empty when no
    /// cycle is reachable.
    pub path: Vec<PackageId>,
}

impl PackageGraph {
    /// True if any cycle is reachable from `start`.
    pub fn contains_cycle(&self, start: PackageId) -> bool {
        let mut path = Vec::new();
        self.find_cycle(start, &mut path, &mut HashSet::new())
    }

    /// True if any package in the graph reaches a cycle.
    pub fn contains_cycles(&self) -> bool {
        self.ids().any(|id| self.contains_cycle(id))
    }

    /// Enumerate every cycle path reachable from `start`.
    pub fn collect_all_cycles(&self, start: PackageId) -> CyclePath {
        let mut path = Vec::new();
        let contains_cycle = self.collect_cycles(start, &mut path, &mut HashSet::new());
        CyclePath {
            contains_cycle,
            path,
        }
    }

    fn find_cycle(
        &self,
        node: PackageId,
        path: &mut Vec<PackageId>,
        acyclic: &mut HashSet<PackageId>,
    ) -> bool {
        if path.contains(&node) {
            return true;
        }
        if acyclic.contains(&node) {
            return false;
        }
        path.push(node);
        for &efferent in self.package(node).efferents() {
            if self.find_cycle(efferent, path, acyclic) {
                return true;
            }
        }
        path.pop();
        acyclic.insert(node);
        false
    }

    fn collect_cycles(
        &self,
        node: PackageId,
        path: &mut Vec<PackageId>,
        acyclic: &mut HashSet<PackageId>,
    ) -> bool {
        if path.contains(&node) {
            path.push(node);
            return true;
        }
        if acyclic.contains(&node) {
            return false;
        }
        path.push(node);

        let mut found = false;
        for &efferent in self.package(node).efferents() {
            if self.collect_cycles(efferent, path, acyclic) {
                found = true;
            }
        }

        if !found {
            // Every child without a cycle has already removed itself, so
            // `node` is the tail.
            debug_assert_eq!(path.last(), Some(&node));
            path.pop();
            acyclic.insert(node);
        }
        found
    }

    /// Groups of mutually dependent packages (strongly connected components
    /// with more than one member, or a single package depending on itself).
    ///
    /// Members are sorted by id and groups by their first member.
    pub fn cycle_groups(&self) -> Vec<Vec<PackageId>> {
        let mut graph: DiGraph<PackageId, ()> = DiGraph::with_capacity(self.len(), 0);
        let nodes: Vec<NodeIndex> = self.ids().map(|id| graph.add_node(id)).collect();
        for id in self.ids() {
            for &efferent in self.package(id).efferents() {
                graph.add_edge(nodes[id.index()], nodes[efferent.index()], ());
            }
        }

        let mut groups: Vec<Vec<PackageId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => {
                    let id = graph[*single];
                    self.package(id).efferents().contains(&id)
                }
                _ => true,
            })
            .map(|component| {
                let mut ids: Vec<PackageId> = component.into_iter().map(|n| graph[n]).collect();
                ids.sort();
                ids
            })
            .collect();
        groups.sort_by_key(|group| group[0]);
        groups
    }
}

#[cfg(test)]
#[path = "cycles_tests.rs"]
mod tests;
