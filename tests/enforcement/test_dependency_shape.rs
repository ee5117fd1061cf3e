// Whole-graph comparison against an expected dependency shape.

use jdep_enforce::DependencyConstraint;

use crate::common::{analyze, LAYERED_APP};

fn expected_shape() -> DependencyConstraint {
    let mut shape = DependencyConstraint::new();
    shape
        .depends_upon("com.acme.web", "com.acme.service")
        .depends_upon("com.acme.web", "com.acme.model")
        .depends_upon("com.acme.service", "com.acme.model")
        .depends_upon("com.acme.model", "com.acme.web");
    shape
}

#[test]
fn test_layered_app_matches_its_shape() {
    let analyzer = analyze(LAYERED_APP);
    assert!(analyzer.dependency_match(&expected_shape()));
    assert!(analyzer.analyze_dependencies(&expected_shape()).matches());
}

#[test]
fn test_shape_from_json_order_does_not_matter() {
    let analyzer = analyze(LAYERED_APP);
    let shape = DependencyConstraint::from_json(
        r#"{
            "com.acme.model": ["com.acme.web"],
            "com.acme.service": ["com.acme.model"],
            "com.acme.web": ["com.acme.model", "com.acme.service"]
        }"#,
    )
    .unwrap();
    assert!(analyzer.dependency_match(&shape));
}

#[test]
fn test_shape_reports_every_difference() {
    let analyzer = analyze(LAYERED_APP);
    let mut shape = DependencyConstraint::new();
    shape
        .depends_upon("com.acme.web", "com.acme.service")
        .depends_upon("com.acme.service", "com.acme.model")
        .depends_upon("com.acme.service", "com.acme.jms")
        .add_package("com.acme.model");

    let result = analyzer.analyze_dependencies(&shape);
    assert!(!result.matches());
    assert_eq!(result.missing_packages, vec!["com.acme.jms"]);
    assert!(result.unexpected_packages.is_empty());

    let web = result
        .efferent_differences
        .iter()
        .find(|d| d.package == "com.acme.web")
        .unwrap();
    assert_eq!(web.unexpected, vec!["com.acme.model"]);
    assert!(web.missing.is_empty());

    let report = analyzer.check(&Default::default(), Some(&shape));
    assert!(!report.passed());
    assert!(report.violation.is_none());
}
