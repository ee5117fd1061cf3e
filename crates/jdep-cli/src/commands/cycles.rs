use jdep_output::OutputFormatter;

use super::{emit, input};
use crate::cli_args::InputArgs;

/// Run `jdep cycles <paths>`: the cycle path reachable from each package.
pub fn run(formatter: &dyn OutputFormatter, input: InputArgs, fail_on_cycles: bool) -> i32 {
    let analyzer = match input::analyze("cycles", &input) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let mut report = analyzer.report();
    report.command = "cycles".to_string();
    emit(&formatter.format_cycles(&report));

    if fail_on_cycles && report.contains_cycles {
        1
    } else {
        0
    }
}
