// `jdep analyze` and `jdep cycles` against class trees on disk.

use std::process::Command;

use crate::common::{class_tree, jdep_bin, LAYERED_APP};

#[test]
fn test_analyze_human_table() {
    let (dir, root) = class_tree(LAYERED_APP);
    let out = Command::new(jdep_bin())
        .args(["analyze", "-x", "java.*"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Package"));
    assert!(stdout.contains("com.acme.model"));
    assert!(stdout.contains("5 class(es) in 3 package(s), cycles present"));
}

#[test]
fn test_analyze_json() {
    let (dir, root) = class_tree(LAYERED_APP);
    let out = Command::new(jdep_bin())
        .args(["analyze", "--json", "--exclude", "java.*", "--components", "com.acme"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["command"], "analyze");
    assert_eq!(json["total_classes"], 5);
    assert_eq!(json["total_packages"], 1);
    assert_eq!(json["packages"][0]["name"], "com.acme");
    assert_eq!(json["contains_cycles"], false);
}

#[test]
fn test_cycles_lists_paths() {
    let (dir, root) = class_tree(&[("a/A", &["b/B"]), ("b/B", &["a/A"])]);
    let out = Command::new(jdep_bin())
        .args(["cycles", "-x", "java.*"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("a:\n  a -> b -> a\n"));
    assert!(stdout.contains("b:\n  b -> a -> b\n"));
}

#[test]
fn test_cycles_json() {
    let (dir, root) = class_tree(&[("a/A", &["b/B"]), ("b/B", &["a/A"])]);
    let out = Command::new(jdep_bin())
        .args(["cycles", "--json", "-x", "java.*"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["command"], "cycles");
    assert_eq!(json["contains_cycles"], true);
    assert_eq!(json["cycle_groups"][0], serde_json::json!(["a", "b"]));
}

#[test]
fn test_config_file_in_working_directory() {
    let (dir, root) = class_tree(LAYERED_APP);
    std::fs::write(dir.path().join("jdep.json"), r#"{"ignore": ["java.*", "com.acme.web"]}"#)
        .unwrap();
    let out = Command::new(jdep_bin())
        .args(["analyze", "--json"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["total_packages"], 2);
    assert_eq!(json["contains_cycles"], false);
}
