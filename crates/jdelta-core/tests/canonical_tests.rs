use jdelta_core::{canonical_key, canonicalize, ArrayOrder, Value};

fn obj(fields: &[(&str, Value)]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

// ============================================================================
// Canonical key
// ============================================================================

#[test]
fn key_order_never_affects_equality() {
    let ab = obj(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))]);
    let ba = obj(&[("b", Value::Number(2.0)), ("a", Value::Number(1.0))]);
    assert_eq!(canonical_key(&ab), canonical_key(&ba));
}

#[test]
fn sentinels_are_pairwise_distinct() {
    let sentinels = [
        Value::Null,
        Value::Undefined,
        Value::NaN,
        Value::PosInfinity,
        Value::NegInfinity,
    ];
    for (i, x) in sentinels.iter().enumerate() {
        for (j, y) in sentinels.iter().enumerate() {
            if i != j {
                assert_ne!(canonical_key(x), canonical_key(y), "{:?} vs {:?}", x, y);
            }
        }
    }
}

#[test]
fn sentinels_never_equal_their_string_spellings() {
    for (sentinel, spelling) in [
        (Value::Undefined, "undefined"),
        (Value::NaN, "NaN"),
        (Value::PosInfinity, "Infinity"),
        (Value::Null, "null"),
    ] {
        assert_ne!(
            canonical_key(&sentinel),
            canonical_key(&Value::String(spelling.to_string()))
        );
    }
}

#[test]
fn numbers_use_canonical_decimal_form() {
    assert_eq!(
        canonical_key(&Value::Number(2.0)),
        canonical_key(&Value::Number(2.0_f32 as f64))
    );
    // -0 folds to 0
    assert_eq!(
        canonical_key(&Value::Number(-0.0)),
        canonical_key(&Value::Number(0.0))
    );
    // A number is never equal to its string spelling.
    assert_ne!(
        canonical_key(&Value::Number(2.0)),
        canonical_key(&Value::String("2".to_string()))
    );
}

#[test]
fn array_order_is_part_of_identity() {
    let ab = Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]);
    let ba = Value::Array(vec![Value::Number(2.0), Value::Number(1.0)]);
    assert_ne!(canonical_key(&ab), canonical_key(&ba));
}

#[test]
fn nested_objects_fold_order_insensitively() {
    let a = obj(&[("outer", obj(&[("x", Value::Number(1.0)), ("y", Value::Number(2.0))]))]);
    let b = obj(&[("outer", obj(&[("y", Value::Number(2.0)), ("x", Value::Number(1.0))]))]);
    assert_eq!(canonical_key(&a), canonical_key(&b));
}

// ============================================================================
// Canonicalizer
// ============================================================================

#[test]
fn object_keys_sort_recursively() {
    let v = obj(&[
        ("b", obj(&[("z", Value::Number(1.0)), ("a", Value::Number(2.0))])),
        ("a", Value::Null),
    ]);
    let (sorted, changed) = canonicalize(&v, ArrayOrder::Preserve);
    assert!(changed);
    assert_eq!(
        sorted,
        obj(&[
            ("a", Value::Null),
            ("b", obj(&[("a", Value::Number(2.0)), ("z", Value::Number(1.0))])),
        ])
    );
}

#[test]
fn preserve_mode_leaves_array_order_alone() {
    let v = Value::Array(vec![Value::Number(3.0), Value::Number(1.0)]);
    let (out, changed) = canonicalize(&v, ArrayOrder::Preserve);
    assert!(!changed);
    assert_eq!(out, v);
}

#[test]
fn sort_mode_orders_array_elements_by_key() {
    let v = Value::Array(vec![
        Value::String("b".to_string()),
        Value::String("a".to_string()),
    ]);
    let (out, changed) = canonicalize(&v, ArrayOrder::Sort);
    assert!(changed);
    assert_eq!(
        out,
        Value::Array(vec![
            Value::String("a".to_string()),
            Value::String("b".to_string()),
        ])
    );
}

#[test]
fn already_normalized_input_reports_no_change() {
    let v = obj(&[
        ("a", Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])),
        ("b", Value::Null),
    ]);
    let (_, changed) = canonicalize(&v, ArrayOrder::Preserve);
    assert!(!changed);
}
