// Parallel decoding keeps input order and isolates failures.

use jdep_parsers::batch::decode_all;
use jdep_parsers::testing::ClassFileBuilder;
use jdep_parsers::{ClassUnit, DecodeError};

use crate::common::unit;

#[test]
fn test_large_batch_keeps_order() {
    let units: Vec<ClassUnit> = (0..200)
        .map(|i| unit(&format!("com/acme/p{}/C{i}", i % 7), &["java/util/List"]))
        .collect();
    let results = decode_all(&units);

    assert_eq!(results.len(), 200);
    for (i, result) in results.iter().enumerate() {
        let record = result.as_ref().unwrap();
        assert_eq!(record.qualified_name(), format!("com.acme.p{}.C{i}", i % 7));
    }
}

#[test]
fn test_bad_units_fail_in_place() {
    let units = vec![
        unit("a/A", &[]),
        ClassUnit::new("notes.class", b"just some text".to_vec()),
        ClassUnit::new("empty.class", Vec::new()),
        unit("b/B", &["a/A"]),
    ];
    let results = decode_all(&units);

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(DecodeError::BadMagic { .. })));
    assert!(matches!(results[2], Err(DecodeError::Truncated { .. })));
    assert!(results[3].as_ref().unwrap().referenced_packages().contains("a"));
}

#[test]
fn test_deeply_nested_unit_fails_alone() {
    let mut b = ClassFileBuilder::new("com/acme/Hostile");
    let int = b.integer(0);
    let mut payload = [b'[', 0, 1].repeat(500_000);
    payload.push(b'I');
    payload.extend_from_slice(&int.to_be_bytes());
    let default = b.raw_attr("AnnotationDefault", &payload);
    b.method_with("value", "()[I", vec![default]);
    let mut generic = ClassFileBuilder::new("com/acme/Generic");
    let signature = nested_signature(&mut generic, 3_000);
    generic.attribute(signature);

    let units = vec![
        unit("a/A", &[]),
        ClassUnit::new("Hostile.class", b.build()),
        ClassUnit::new("Generic.class", generic.build()),
        unit("b/B", &["a/A"]),
    ];
    let results = decode_all(&units);

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(DecodeError::NestingTooDeep { .. })));
    let generic = results[2].as_ref().unwrap();
    assert!(generic.referenced_packages().contains("java.util"));
    assert!(results[3].as_ref().unwrap().referenced_packages().contains("a"));
}

/// A class signature whose type arguments nest `depth` levels deep.
fn nested_signature(b: &mut ClassFileBuilder, depth: usize) -> Vec<u8> {
    let signature = format!(
        "Ljava/lang/Object;{}Lorg/leaf/Leaf;{}",
        "Ljava/util/List<".repeat(depth),
        ">;".repeat(depth)
    );
    b.signature_attr(&signature)
}
