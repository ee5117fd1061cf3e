// Cycle detection and cycle paths for graphs built from class files.

use jdep_enforce::Analyzer;

use crate::common::{analyze, LAYERED_APP};

fn cycle_of(analyzer: &Analyzer, package: &str) -> Vec<String> {
    let graph = analyzer.graph();
    let id = graph.id_of(package).unwrap();
    let cycle = graph.collect_all_cycles(id);
    assert_eq!(cycle.contains_cycle, !cycle.path.is_empty());
    graph.names(&cycle.path).into_iter().map(String::from).collect()
}

#[test]
fn test_no_cycles() {
    let analyzer = analyze(&[("a/A", &["b/B"]), ("b/B", &["c/C"]), ("c/C", &[])]);
    assert!(!analyzer.contains_cycles());
    for name in ["a", "b", "c"] {
        assert!(cycle_of(&analyzer, name).is_empty());
    }
}

#[test]
fn test_two_package_cycle() {
    let analyzer = analyze(&[("a/A", &["b/B"]), ("b/B", &["a/A"])]);
    assert!(analyzer.contains_cycles());
    assert_eq!(cycle_of(&analyzer, "a"), ["a", "b", "a"]);
    assert_eq!(cycle_of(&analyzer, "b"), ["b", "a", "b"]);
}

#[test]
fn test_three_package_cycle() {
    let analyzer = analyze(&[("a/A", &["b/B"]), ("b/B", &["c/C"]), ("c/C", &["a/A"])]);
    assert_eq!(cycle_of(&analyzer, "a"), ["a", "b", "c", "a"]);
    assert_eq!(cycle_of(&analyzer, "b"), ["b", "c", "a", "b"]);
    assert_eq!(cycle_of(&analyzer, "c"), ["c", "a", "b", "c"]);
}

#[test]
fn test_package_feeding_a_cycle() {
    // a -> b -> c -> b: a is not in the cycle but reaches it.
    let analyzer = analyze(&[("a/A", &["b/B"]), ("b/B", &["c/C"]), ("c/C", &["b/B"])]);
    assert_eq!(cycle_of(&analyzer, "a"), ["a", "b", "c", "b"]);
    assert_eq!(cycle_of(&analyzer, "b"), ["b", "c", "b"]);

    let graph = analyzer.graph();
    let groups: Vec<Vec<&str>> = graph
        .cycle_groups()
        .iter()
        .map(|g| graph.names(g))
        .collect();
    assert_eq!(groups, vec![vec!["b", "c"]]);
}

#[test]
fn test_layered_app_cycle() {
    let analyzer = analyze(LAYERED_APP);
    assert!(analyzer.contains_cycles());

    let web = cycle_of(&analyzer, "com.acme.web");
    assert_eq!(web.first().map(String::as_str), Some("com.acme.web"));
    assert!(web.iter().filter(|n| *n == "com.acme.web").count() >= 2);
    assert!(web.contains(&"com.acme.model".to_string()));

    let report = analyzer.report();
    assert_eq!(report.cycle_groups.len(), 1);
    assert_eq!(report.cycle_groups[0].len(), 3);
}

#[test]
fn test_ignored_packages_break_cycles() {
    // The only edge back into `a` goes through java.*, which is ignored.
    let analyzer = analyze(&[("a/A", &["java/util/Util"]), ("java/util/Util", &["a/A"])]);
    assert!(!analyzer.contains_cycles());
    assert_eq!(analyzer.count_packages(), 1);
}
