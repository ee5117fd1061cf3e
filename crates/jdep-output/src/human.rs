use std::fmt::Write as _;

use crate::OutputFormatter;
use jdep_enforce::types::{AnalysisReport, CheckReport};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_analysis(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let width = report
            .packages
            .iter()
            .map(|p| display_name(&p.name).len())
            .max()
            .unwrap_or(0)
            .max("Package".len());

        if !report.packages.is_empty() {
            let _ = writeln!(
                out,
                "{:<width$}  {:>4} {:>4} {:>4} {:>4} {:>4} {:>6} {:>6} {:>6} {:>3}",
                "Package", "TC", "CC", "AC", "Ca", "Ce", "A", "I", "D", "V",
            );
            for p in &report.packages {
                let _ = writeln!(
                    out,
                    "{:<width$}  {:>4} {:>4} {:>4} {:>4} {:>4} {:>6.2} {:>6.2} {:>6.2} {:>3}{}",
                    display_name(&p.name),
                    p.total_classes,
                    p.concrete_classes,
                    p.abstract_classes,
                    p.afferent_coupling,
                    p.efferent_coupling,
                    p.abstractness,
                    p.instability,
                    p.distance,
                    p.volatility,
                    if p.cycle.is_empty() { "" } else { "  cyclic" },
                );
            }
        }

        if !report.cycle_groups.is_empty() {
            let _ = writeln!(out, "\nCycles ({}):", report.cycle_groups.len());
            for group in &report.cycle_groups {
                let names: Vec<&str> = group.iter().map(|n| display_name(n)).collect();
                let _ = writeln!(out, "  {}", names.join(", "));
            }
        }

        if !report.failures.is_empty() {
            let _ = writeln!(out, "\nUnreadable class files ({}):", report.failures.len());
            for f in &report.failures {
                let _ = writeln!(out, "  {}: {}", f.id, f.error);
            }
        }

        let _ = writeln!(
            out,
            "\n{} class(es) in {} package(s){}",
            report.total_classes,
            report.total_packages,
            if report.contains_cycles {
                ", cycles present"
            } else {
                ""
            },
        );
        out
    }

    fn format_cycles(&self, report: &AnalysisReport) -> String {
        let cyclic: Vec<_> = report
            .packages
            .iter()
            .filter(|p| !p.cycle.is_empty())
            .collect();
        if cyclic.is_empty() {
            return "No package dependency cycles.\n".to_string();
        }

        let mut out = String::new();
        for p in cyclic {
            let path: Vec<&str> = p.cycle.iter().map(|n| display_name(n)).collect();
            let _ = writeln!(out, "{}:", display_name(&p.name));
            let _ = writeln!(out, "  {}", path.join(" -> "));
        }
        out
    }

    fn format_check(&self, report: &CheckReport) -> String {
        let mut out = String::new();

        if let Some(v) = &report.violation {
            let _ = writeln!(out, "FORBIDDEN: {v}");
        }

        if let Some(m) = &report.dependency_match {
            for name in &m.missing_packages {
                let _ = writeln!(out, "MISSING PACKAGE: {}", display_name(name));
            }
            for name in &m.unexpected_packages {
                let _ = writeln!(out, "UNEXPECTED PACKAGE: {}", display_name(name));
            }
            for d in &m.efferent_differences {
                for e in &d.unexpected {
                    let _ = writeln!(
                        out,
                        "UNEXPECTED DEPENDENCY: {} -> {}",
                        display_name(&d.package),
                        display_name(e)
                    );
                }
                for e in &d.missing {
                    let _ = writeln!(
                        out,
                        "MISSING DEPENDENCY: {} -> {}",
                        display_name(&d.package),
                        display_name(e)
                    );
                }
            }
        }

        if report.passed() {
            let _ = writeln!(out, "ok: {} rule(s) satisfied", report.rules_checked);
        }
        out
    }
}

/// The default package has an empty name; show it readably.
fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(default)"
    } else {
        name
    }
}

#[cfg(test)]
#[path = "human_tests.rs"]
mod tests;
