// Decoding a class shaped like typical compiler output, with references
// spread across every place the decoder looks.

use jdep_parsers::decode;
use jdep_parsers::testing::{Annotation, ClassFileBuilder, ElementValue};

fn order_service() -> Vec<u8> {
    let mut b = ClassFileBuilder::new("com/shop/service/OrderService");
    b.extends("com/shop/base/AbstractService");
    b.implements("com/shop/api/Orders");

    let source = b.source_file_attr("OrderService.java");
    let signature = b.signature_attr(
        "Lcom/shop/base/AbstractService<Lcom/shop/model/Order;>;Lcom/shop/api/Orders;",
    );
    let annotations = b.annotations_attr(
        true,
        &[Annotation::new("Lorg/springframework/stereotype/Service;")
            .with("value", ElementValue::String("orders".into()))],
    );
    let inner = b.inner_classes_attr(&[("com/shop/service/OrderService$Cache", Some("com/shop/service/OrderService"))]);
    b.attribute(source).attribute(signature).attribute(annotations).attribute(inner);

    let inject = b.annotations_attr(true, &[Annotation::new("Ljavax/inject/Inject;")]);
    b.field_with("repository", "Lcom/shop/data/OrderRepository;", vec![inject]);
    b.field("log", "Lorg/slf4j/Logger;");

    let throws = b.exceptions_attr(&["com/shop/error/NotFound"]);
    let locals = b.local_variable_type_table_attr(&[("orders", "Ljava/util/List<Lcom/shop/model/Line;>;")]);
    let code = b.code_attr(&[Some("java/io/IOException"), None], vec![locals]);
    b.method_with(
        "find",
        "(Ljava/lang/String;)Lcom/shop/model/Order;",
        vec![throws, code],
    );

    let params = b.parameter_annotations_attr(&[vec![Annotation::new(
        "Lcom/shop/validation/Valid;",
    )
    .with("groups", ElementValue::Array(vec![ElementValue::Class("Lcom/shop/validation/Strict;".into())]))]]);
    b.method_with("save", "(Lcom/shop/model/Order;)V", vec![params]);

    b.method_ref("com/shop/audit/Audit", "record", "(Ljava/time/Instant;)V");
    b.build()
}

#[test]
fn test_service_class_record() {
    let record = decode(&order_service()).unwrap();

    assert_eq!(record.qualified_name(), "com.shop.service.OrderService");
    assert_eq!(record.package_name(), "com.shop.service");
    assert_eq!(record.simple_name(), "OrderService");
    assert_eq!(record.source_file(), Some("OrderService.java"));
    assert!(!record.is_abstract());
    assert!(!record.is_inner_class());

    let packages: Vec<&str> = record.referenced_packages().iter().map(String::as_str).collect();
    assert_eq!(
        packages,
        vec![
            "com.shop.api",
            "com.shop.audit",
            "com.shop.base",
            "com.shop.data",
            "com.shop.error",
            "com.shop.model",
            "com.shop.validation",
            "java.io",
            "java.lang",
            "java.time",
            "java.util",
            "javax.inject",
            "org.slf4j",
            "org.springframework.stereotype",
        ]
    );
}

#[test]
fn test_nested_class_record() {
    let mut b = ClassFileBuilder::new("com/shop/service/OrderService$Cache");
    let enclosing = b.enclosing_method_attr("com/shop/service/OrderService", None);
    b.attribute(enclosing).field("entries", "Ljava/util/Map;");
    let record = decode(&b.build()).unwrap();

    assert_eq!(record.simple_name(), "OrderService$Cache");
    assert!(record.is_inner_class());
    assert!(!record.referenced_packages().contains("com.shop.service"));
    assert!(record.referenced_packages().contains("java.util"));
}

#[test]
fn test_interface_record_is_abstract() {
    let mut b = ClassFileBuilder::new("com/shop/api/Orders");
    b.interface()
        .method("find", "(Ljava/lang/String;)Lcom/shop/model/Order;");
    let record = decode(&b.build()).unwrap();
    assert!(record.is_abstract());
    assert!(record.referenced_packages().contains("com.shop.model"));
}
