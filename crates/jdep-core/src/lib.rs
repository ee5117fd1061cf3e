//! Core types, the package dependency graph, and configuration for jdep.
//!
//! This crate provides the foundational data structures used across all jdep crates:
//! - [`types`]: [`ClassRecord`](types::ClassRecord) and package ids
//! - [`graph`]: The [`PackageGraph`](graph::PackageGraph) arena, edges, and design metrics
//! - [`cycles`]: Cycle detection, full cycle-path enumeration, and cycle groups
//! - [`filter`]: Include/exclude package name filtering
//! - [`config`]: Configuration loading from `jdep.json` or a properties file

pub mod config;
pub mod cycles;
pub mod filter;
pub mod graph;
pub mod types;
