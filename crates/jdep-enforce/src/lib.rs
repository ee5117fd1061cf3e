//! Dependency rules and the analysis driver for jdep.
//!
//! - [`constraints`]: forbidden-efferent rules (`Package X can't depend on Y`)
//! - [`dependency`]: whitelist of the expected package dependency shape
//! - [`analyze`]: decodes class units and folds them into a package graph

pub mod analyze;
pub mod constraints;
pub mod dependency;
pub mod types;

pub use analyze::{AnalysisOutcome, Analyzer, DecodeFailure};
pub use constraints::{EfferentConstraints, ForbiddenDependency, PackageRule};
pub use dependency::{DependencyConstraint, MatchResult};
