//! Output formatters for jdep command results.
//!
//! Two output modes:
//! - **Human** (default): aligned metric table, cycles, rule results
//! - **JSON** (`--json`): the report types serialized as-is

pub mod human;
pub mod json;

use jdep_enforce::types::{AnalysisReport, CheckReport};

pub trait OutputFormatter {
    fn format_analysis(&self, report: &AnalysisReport) -> String;
    fn format_cycles(&self, report: &AnalysisReport) -> String;
    fn format_check(&self, report: &CheckReport) -> String;
}
