//! Canonical type text and selector tests

use abikit::{
    compute_selector, format_canonical, function_selector, parse_canonical, signature_text,
    AbiError, ParamType, Tag,
};
use proptest::prelude::*;

// ==================== Selectors ====================

#[test]
fn test_baz_without_params() {
    let signature = compute_selector(Some("baz"), Some(&[][..]));
    assert_eq!(signature.text(), "baz()");
    assert_eq!(
        signature.event_signature_hex(),
        "a7916fac4f538170f7cd12c148552e2cba9fcd72329a2dd5b07a6fa906488ddf"
    );
    assert_eq!(signature.method_signature_hex(), "a7916fac");
    assert_eq!(signature.method_signature(), [0xa7, 0x91, 0x6f, 0xac]);
}

#[test]
fn test_missing_name_and_params() {
    let signature = compute_selector(None, None);
    assert_eq!(signature.text(), "()");
    assert_eq!(signature.event_signature_hex().len(), 64);
}

#[test]
fn test_erc20_selectors() {
    let params = [ParamType::Address, ParamType::Uint(256)];
    let transfer = compute_selector(Some("transfer"), Some(&params[..]));
    assert_eq!(transfer.method_signature_hex(), "a9059cbb");
    assert_eq!(function_selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);

    let event = compute_selector(
        Some("Transfer"),
        Some(&[ParamType::Address, ParamType::Address, ParamType::Uint(256)][..]),
    );
    assert_eq!(
        event.event_signature_hex(),
        "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
    );
}

#[test]
fn test_bare_uint_hashes_as_uint256() {
    let bare = parse_canonical("uint").unwrap();
    let signature = compute_selector(Some("Drained"), Some(&[bare][..]));
    assert_eq!(signature.text(), "Drained(uint256)");
    assert_eq!(signature.method_signature_hex(), "def93129");
}

#[test]
fn test_signature_is_deterministic() {
    let params = [ParamType::Uint(32), ParamType::Bool];
    let a = compute_selector(Some("baz"), Some(&params[..]));
    let b = compute_selector(Some("baz"), Some(&params[..]));
    assert_eq!(a, b);
    assert_eq!(a.method_signature_hex(), "cdcd77c0");
    assert_eq!(a.to_string(), signature_text("baz", &params));
}

// ==================== Tag construction ====================

#[test]
fn test_tag_construction_matches_parsing() {
    let cases = [
        (ParamType::new("uint", None, Some(32)).unwrap(), "uint32"),
        (ParamType::new("fixedBytes", None, Some(32)).unwrap(), "bytes32"),
        (
            ParamType::new("fixedArray", Some(ParamType::new("string", None, None).unwrap()), Some(2))
                .unwrap(),
            "string[2]",
        ),
        (ParamType::new("array", Some(ParamType::Bool), None).unwrap(), "bool[]"),
    ];
    for (kind, text) in cases {
        assert_eq!(format_canonical(&kind), text);
        assert_eq!(parse_canonical(text).unwrap(), kind);
    }
}

#[test]
fn test_unknown_tag_is_invalid_type() {
    let err = ParamType::new("noMatch", None, None).unwrap_err();
    assert!(err.to_string().contains("noMatch"));
    assert!(matches!(err, AbiError::InvalidType(_)));
    assert_eq!(Tag::ALL.len(), 9);
}

// ==================== Canonical round trip ====================

fn param_type() -> impl Strategy<Value = ParamType> {
    let leaf = prop_oneof![
        Just(ParamType::Address),
        Just(ParamType::Bool),
        Just(ParamType::Bytes),
        Just(ParamType::String),
        (1usize..=32).prop_map(|n| ParamType::Int(n * 8)),
        (1usize..=32).prop_map(|n| ParamType::Uint(n * 8)),
        (1usize..=32).prop_map(ParamType::FixedBytes),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| ParamType::Array(Box::new(t))),
            (inner, 0usize..8).prop_map(|(t, n)| ParamType::FixedArray(Box::new(t), n)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_canonical_round_trip(kind in param_type()) {
        let text = format_canonical(&kind);
        prop_assert_eq!(parse_canonical(&text).unwrap(), kind);
    }

    #[test]
    fn prop_selector_is_prefix_of_event_signature(
        name in "[a-zA-Z_][a-zA-Z0-9_]{0,16}",
        kind in param_type(),
    ) {
        let signature = compute_selector(Some(name.as_str()), Some(&[kind][..]));
        prop_assert!(signature.event_signature_hex().starts_with(&signature.method_signature_hex()));
    }
}
