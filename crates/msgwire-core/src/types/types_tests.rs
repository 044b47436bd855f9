#![allow(non_snake_case)]

use super::*;
use serde_json::json;

#[allow(dead_code)]
struct Invoice {
    amount: Decimal,
    tag: Option<String>,
    lines: Vec<String>,
}

impl Describe for Invoice {
    fn describe() -> RuntimeType {
        RuntimeType::record::<Self>(vec![
            Field::of::<Decimal>("amount"),
            Field::of::<Option<String>>("tag"),
            Field::of::<Vec<String>>("lines"),
        ])
    }
}

// RuntimeType tests

#[test]
fn RuntimeType___eq___same_rust_type_is_equal() {
    assert_eq!(Invoice::describe(), Invoice::describe());
    assert_eq!(Vec::<u32>::describe(), Vec::<u32>::describe());
}

#[test]
fn RuntimeType___eq___different_rust_types_differ() {
    assert_ne!(Vec::<u32>::describe(), Vec::<String>::describe());
    assert_ne!(String::describe(), Option::<String>::describe());
}

#[test]
fn RuntimeType___hash___matches_for_equal_types() {
    let mut set = std::collections::HashSet::new();

    set.insert(Invoice::describe());
    set.insert(Invoice::describe());

    assert_eq!(set.len(), 1);
}

#[test]
fn RuntimeType___field___finds_member_by_wire_name() {
    let ty = Invoice::describe();

    let field = ty.field("tag").unwrap();

    assert!(matches!(field.ty.kind(), TypeKind::Optional(_)));
    assert!(ty.field("missing").is_none());
}

#[test]
fn RuntimeType___kind___describes_std_types() {
    assert!(matches!(bool::describe().kind(), TypeKind::Bool));
    assert!(matches!(u64::describe().kind(), TypeKind::Integer));
    assert!(matches!(f64::describe().kind(), TypeKind::Float));
    assert!(matches!(ByteArray::describe().kind(), TypeKind::Bytes));
    assert!(matches!(
        std::collections::HashMap::<String, i32>::describe().kind(),
        TypeKind::Map(_)
    ));
}

#[test]
fn RuntimeType___default_value___record_fills_each_member() {
    let value = Invoice::describe().default_value();

    assert_eq!(value, json!({"amount": 0, "tag": null, "lines": []}));
}

#[test]
fn RuntimeType___is_default_value___scalars_and_text() {
    assert!(bool::describe().is_default_value(&json!(false)));
    assert!(i32::describe().is_default_value(&json!(0)));
    assert!(f64::describe().is_default_value(&json!(0.0)));
    assert!(String::describe().is_default_value(&json!("")));
    assert!(!String::describe().is_default_value(&json!("x")));
    assert!(!Decimal::describe().is_default_value(&json!(12.5)));
}

#[test]
fn RuntimeType___is_default_value___collections_are_never_default() {
    assert!(!Vec::<String>::describe().is_default_value(&json!([])));
    assert!(!Invoice::describe().is_default_value(&json!({})));
}

#[test]
fn RuntimeType___interface___wraps_implementation() {
    let ty = RuntimeType::interface::<Invoice>("IInvoice");

    match ty.kind() {
        TypeKind::Interface {
            contract,
            implementation,
        } => {
            assert_eq!(*contract, "IInvoice");
            assert_eq!(*implementation, Invoice::describe());
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_ne!(ty, Invoice::describe());
}

#[test]
fn RuntimeType___interface___contract_is_part_of_identity() {
    let invoice = RuntimeType::interface::<Invoice>("IInvoice");
    let bill = RuntimeType::interface::<Invoice>("IBill");

    assert_ne!(invoice, bill);
    assert_ne!(invoice.key(), bill.key());
    assert_eq!(invoice.id(), bill.id());
    assert_eq!(invoice, RuntimeType::interface::<Invoice>("IInvoice"));
}

// Decimal tests

#[test]
fn Decimal___from_str___parses_and_displays() {
    let amount: Decimal = "12.50".parse().unwrap();

    assert_eq!(amount.as_f64(), Some(12.5));
    assert_eq!(amount.to_string(), "12.50");
}

#[test]
fn Decimal___from_str___keeps_digits_beyond_f64() {
    let amount: Decimal = "12345678901234567.89".parse().unwrap();

    assert_eq!(amount.to_string(), "12345678901234567.89");
}

#[test]
fn Decimal___from_str___rejects_non_numbers() {
    assert!("twelve".parse::<Decimal>().is_err());
}

#[test]
fn Decimal___serialize___is_a_json_number() {
    let value = serde_json::to_value(Decimal::from(7)).unwrap();

    assert_eq!(value, json!(7));
}

// ByteArray tests

#[test]
fn ByteArray___serialize___is_a_number_array() {
    let value = serde_json::to_value(ByteArray::from(vec![1u8, 2, 3])).unwrap();

    assert_eq!(value, json!([1, 2, 3]));
}
