// Component coalescing: sub-packages collapse into one named package.

use jdep_core::config::JdepConfig;
use jdep_enforce::{Analyzer, EfferentConstraints};

use crate::common::unit;

fn modules() -> Vec<jdep_parsers::ClassUnit> {
    vec![
        unit("com/acme/billing/api/Invoices", &["com/acme/billing/model/Invoice"]),
        unit("com/acme/billing/model/Invoice", &["com/acme/shared/Money"]),
        unit("com/acme/shipping/Carrier", &["com/acme/billing/api/Invoices", "com/acme/shared/Money"]),
        unit("com/acme/shared/Money", &["java/math/BigDecimal"]),
    ]
}

fn analyzer(components: &str) -> Analyzer {
    let mut analyzer = Analyzer::new(&JdepConfig {
        ignore: vec!["java.*".into()],
        ..JdepConfig::default()
    });
    analyzer.set_components(components);
    analyzer.analyze(&modules());
    analyzer
}

#[test]
fn test_without_components() {
    let analyzer = analyzer("");
    assert_eq!(analyzer.count_packages(), 4);
}

#[test]
fn test_components_collapse_sub_packages() {
    let analyzer = analyzer("com.acme.billing, com.acme.shipping");
    let names: Vec<&str> = analyzer.packages().map(|p| p.name()).collect();
    assert_eq!(names, vec!["com.acme.billing", "com.acme.shared", "com.acme.shipping"]);

    let billing = analyzer.package("com.acme.billing").unwrap();
    assert_eq!(billing.class_count(), 2);
    assert_eq!(billing.efferent_coupling(), 1);
    assert_eq!(billing.afferent_coupling(), 1);

    let graph = analyzer.graph();
    let shipping = graph.id_of("com.acme.shipping").unwrap();
    assert_eq!(
        graph.efferent_names(shipping),
        vec!["com.acme.billing", "com.acme.shared"]
    );
}

#[test]
fn test_component_names_only_match_whole_segments() {
    // `com.acme.ship` is not a prefix component of `com.acme.shipping`.
    let analyzer = analyzer("com.acme.ship");
    assert!(analyzer.package("com.acme.ship").is_none());
    assert!(analyzer.package("com.acme.shipping").is_some());
}

#[test]
fn test_rules_apply_to_components() {
    let analyzer = analyzer("com.acme.billing,com.acme.shipping");
    let mut rules = EfferentConstraints::new();
    rules.should_not_depend_upon("com.acme.billing", "com.acme.shipping");
    assert!(analyzer.are_prohibition_rules_fulfilled(&rules).is_ok());

    rules.should_not_depend_upon("com.acme.shipping", "com.acme.billing*");
    let err = analyzer.are_prohibition_rules_fulfilled(&rules).unwrap_err();
    assert_eq!(err.package, "com.acme.shipping");
}
