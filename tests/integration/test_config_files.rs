// Configuration files driving a full analysis.

use std::fs;

use jdep_core::config::{ConfigError, JdepConfig};
use jdep_enforce::Analyzer;
use jdep_parsers::ClassFileWalker;

use crate::common::{class_tree, LAYERED_APP};

fn run(config: &JdepConfig, root: &std::path::Path) -> Analyzer {
    let units = ClassFileWalker::new([root])
        .analyze_inner_classes(config.analyze_inner_classes)
        .walk()
        .unwrap();
    let mut analyzer = Analyzer::new(config);
    analyzer.analyze(&units);
    analyzer
}

#[test]
fn test_properties_file() {
    let (dir, root) = class_tree(LAYERED_APP);
    let path = dir.path().join("jdep.properties");
    fs::write(
        &path,
        "# classic layout\n\
         ignore.java=java.*,javax.*\n\
         ignore.web=com.acme.web\n\
         com.acme.model=0\n",
    )
    .unwrap();

    let config = JdepConfig::load_file(&path).unwrap();
    let analyzer = run(&config, &root);

    assert!(analyzer.package("com.acme.web").is_none());
    assert!(analyzer.package("java.util").is_none());
    assert!(!analyzer.contains_cycles());
    assert_eq!(analyzer.count_classes(), 3);
    assert_eq!(analyzer.package("com.acme.model").unwrap().volatility(), 0);
}

#[test]
fn test_json_file_in_config_dir() {
    let (dir, root) = class_tree(LAYERED_APP);
    fs::write(
        dir.path().join("jdep.json"),
        r#"{
            "ignore": ["java.*"],
            "components": ["com.acme"],
            "volatility": {"com.acme": 2}
        }"#,
    )
    .unwrap();

    let config = JdepConfig::load(dir.path()).unwrap();
    let analyzer = run(&config, &root);

    assert_eq!(analyzer.count_packages(), 1);
    let acme = analyzer.package("com.acme").unwrap();
    assert_eq!(acme.class_count(), 5);
    assert_eq!(acme.volatility(), 2);
    assert!(!analyzer.contains_cycles());
}

#[test]
fn test_self_dependency_switch() {
    let (dir, root) = class_tree(LAYERED_APP);
    let path = dir.path().join("jdep.properties");
    fs::write(&path, "ignore.java=java.*\ncomponents=com.acme\nallowSelfDependency=true\n").unwrap();

    let analyzer = run(&JdepConfig::load_file(&path).unwrap(), &root);
    let acme = analyzer.graph().id_of("com.acme").unwrap();
    assert!(analyzer.graph().contains_cycle(acme));
    assert_eq!(analyzer.report().cycle_groups, vec![vec!["com.acme".to_string()]]);
}

#[test]
fn test_malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("jdep.json"), "{\"ignore\": [").unwrap();
    assert!(matches!(
        JdepConfig::load(dir.path()),
        Err(ConfigError::Json { .. })
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = JdepConfig::load_file(&dir.path().join("jdep.properties")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("jdep.properties"));
}
