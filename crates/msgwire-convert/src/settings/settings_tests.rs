#![allow(non_snake_case)]

use super::*;
use msgwire_core::{ByteArray, Decimal, Describe};

#[test]
fn SerializerSettings___base___holds_encode_converters_in_order() {
    let settings = SerializerSettings::base(&SerializerOptions::default());

    assert_eq!(
        settings.converter_names(),
        vec!["byte-array", "message-data", "string-decimal"]
    );
}

#[test]
fn SerializerSettings___base___applies_shared_structural_rules() {
    let settings = SerializerSettings::base(&SerializerOptions::default());

    assert_eq!(settings.null_value_handling, NullValueHandling::Ignore);
    assert_eq!(settings.default_value_handling, DefaultValueHandling::Ignore);
    assert_eq!(settings.missing_member_handling, MissingMemberHandling::Ignore);
    assert_eq!(settings.constructor_handling, ConstructorHandling::FillDefaults);
    assert_eq!(settings.formatting, Formatting::Indented);
}

#[test]
fn SerializerSettings___base___compact_when_not_indented() {
    let options = SerializerOptions::default().with_indented(false);

    let settings = SerializerSettings::base(&options);

    assert_eq!(settings.formatting, Formatting::Compact);
}

#[test]
fn CodecConfiguration___new___decode_is_superset_of_encode() {
    let config = CodecConfiguration::new(&SerializerOptions::default());

    let encode = config.encode.converter_names();
    let decode = config.decode.converter_names();

    assert!(encode.iter().all(|name| decode.contains(name)));
    assert_eq!(
        decode,
        vec![
            "byte-array",
            "message-data",
            "string-decimal",
            "list",
            "interface-proxy"
        ]
    );
}

#[test]
fn CodecConfiguration___new___shares_structural_rules() {
    let config = CodecConfiguration::new(&SerializerOptions::default());

    assert_eq!(
        config.encode.null_value_handling,
        config.decode.null_value_handling
    );
    assert_eq!(
        config.encode.missing_member_handling,
        config.decode.missing_member_handling
    );
    assert_eq!(config.encode.formatting, config.decode.formatting);
}

#[test]
fn CodecConfiguration___global___returns_same_instance() {
    let first = CodecConfiguration::global();
    let second = CodecConfiguration::global();

    assert!(std::ptr::eq(first, second));
    assert!(Arc::ptr_eq(&first.encode, &second.encode));
}

#[test]
fn SerializerSettings___with_additional_converters___leaves_original_unchanged() {
    let base = SerializerSettings::base(&SerializerOptions::default());

    let extended = base.with_additional_converters(decode_only_converters());

    assert_eq!(base.converters.len(), 3);
    assert_eq!(extended.converters.len(), 5);
}

#[test]
fn SerializerSettings___encode_converters___claim_only_their_kinds() {
    let settings = SerializerSettings::base(&SerializerOptions::default());
    let bytes = ByteArray::describe();
    let decimal = Decimal::describe();

    let claims: Vec<(bool, bool)> = settings
        .converters
        .iter()
        .map(|c| (c.can_convert(&bytes), c.can_convert(&decimal)))
        .collect();

    assert_eq!(claims, vec![(true, false), (false, false), (false, true)]);
}

#[test]
fn SerializerSettings___debug___lists_converter_names() {
    let settings = SerializerSettings::base(&SerializerOptions::default());

    let debug = format!("{:?}", settings);

    assert!(debug.contains("string-decimal"));
}
