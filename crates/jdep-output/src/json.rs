use crate::OutputFormatter;
use jdep_enforce::types::{AnalysisReport, CheckReport};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_analysis(&self, report: &AnalysisReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_cycles(&self, report: &AnalysisReport) -> String {
        let cycles: Vec<serde_json::Value> = report
            .packages
            .iter()
            .filter(|p| !p.cycle.is_empty())
            .map(|p| serde_json::json!({ "package": p.name, "cycle": p.cycle }))
            .collect();
        let value = serde_json::json!({
            "version": report.version,
            "command": "cycles",
            "contains_cycles": report.contains_cycles,
            "cycle_groups": report.cycle_groups,
            "cycles": cycles,
        });
        serde_json::to_string_pretty(&value).unwrap_or_default()
    }

    fn format_check(&self, report: &CheckReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
}
