// tests/version_code_test.rs
use gradle_version_bump::version_code::{encode, encode_value, VersionCode, UNENCODABLE};
use serde_json::json;

#[test]
fn test_patch_number() {
    assert_eq!(encode("0.0.0"), 0);
    assert_eq!(encode("0.0.1"), 1);
    assert_eq!(encode("0.0.10"), 10);
    assert_eq!(encode("0.0.11"), 11);
    assert_eq!(encode("0.0.99"), 99);
}

#[test]
fn test_minor_number() {
    assert_eq!(encode("0.1.0"), 100);
    assert_eq!(encode("0.10.0"), 1000);
    assert_eq!(encode("0.11.0"), 1100);
    assert_eq!(encode("0.99.0"), 9900);
}

#[test]
fn test_major_number() {
    assert_eq!(encode("1.0.0"), 10000);
    assert_eq!(encode("10.0.0"), 100000);
    assert_eq!(encode("11.0.0"), 110000);
    assert_eq!(encode("99.0.0"), 990000);
}

#[test]
fn test_each_component_is_padded_to_two_digits() {
    assert_eq!(encode("0.2.2"), 202);
    assert_eq!(encode("2.2.2"), 20202);
    assert_eq!(encode("12.12.12"), 121212);
    assert_eq!(encode("99.99.99"), 999999);
}

#[test]
fn test_single_digit_components_match_arithmetic() {
    for x in 0..10i64 {
        for y in 0..10i64 {
            for z in 0..10i64 {
                let version = format!("{}.{}.{}", x, y, z);
                assert_eq!(encode(&version), x * 10000 + y * 100 + z, "{}", version);
            }
        }
    }
}

#[test]
fn test_leading_v_is_ignored() {
    assert_eq!(encode("v0.0.1"), 1);
    assert_eq!(encode("v1.0.1"), 10001);
    assert_eq!(encode("V1.0.1"), 10001);
    assert_eq!(encode("1.0.1"), 10001);
}

#[test]
fn test_prerelease_is_ignored() {
    assert_eq!(encode("0.0.1-beta.1"), 1);
    assert_eq!(encode("0.0.1-alpha.1"), 1);
    assert_eq!(encode("0.0.1-rc.1"), 1);
}

#[test]
fn test_build_metadata_is_ignored() {
    assert_eq!(encode("0.0.1+20130313144700"), 1);
    assert_eq!(encode("0.0.1+exp.sha.5114f85"), 1);
    assert_eq!(encode("1.0.0-alpha+001"), 10000);
}

#[test]
fn test_component_over_99_is_rejected() {
    assert_eq!(encode("0.0.100"), UNENCODABLE);
    assert_eq!(encode("0.100.0"), UNENCODABLE);
    assert_eq!(encode("100.10.10"), UNENCODABLE);
    assert_eq!(encode("100.100.100"), UNENCODABLE);
    assert_eq!(encode("0.0.100-rc.1"), UNENCODABLE);
}

#[test]
fn test_fourth_component_is_rejected() {
    assert_eq!(encode("1.0.1.1"), UNENCODABLE);
    assert_eq!(encode("v1.0.1.1"), UNENCODABLE);
    assert_eq!(encode("1.0.1."), UNENCODABLE);
}

#[test]
fn test_malformed_strings_are_rejected() {
    assert_eq!(encode("0.1"), UNENCODABLE);
    assert_eq!(encode("1.0"), UNENCODABLE);
    assert_eq!(encode("1.0-beta"), UNENCODABLE);
    assert_eq!(encode("1.0+789"), UNENCODABLE);
    assert_eq!(encode("not semver"), UNENCODABLE);
    assert_eq!(encode(""), UNENCODABLE);
    assert_eq!(encode("1.a.0"), UNENCODABLE);
}

#[test]
fn test_non_string_values_are_rejected() {
    assert_eq!(encode_value(Some(&json!(1.23))), UNENCODABLE);
    assert_eq!(encode_value(Some(&json!(10001))), UNENCODABLE);
    assert_eq!(encode_value(Some(&json!({}))), UNENCODABLE);
    assert_eq!(encode_value(Some(&json!([]))), UNENCODABLE);
    assert_eq!(encode_value(Some(&json!(["1.0.0"]))), UNENCODABLE);
    assert_eq!(encode_value(Some(&json!(null))), UNENCODABLE);
    assert_eq!(encode_value(None), UNENCODABLE);
    assert_eq!(encode_value(Some(&json!("1.0.0"))), 10000);
}

#[test]
fn test_encoding_preserves_tuple_order() {
    let mut previous: Option<(VersionCode, (u32, u32, u32))> = None;

    for major in 0..100 {
        for minor in 0..100 {
            for patch in 0..100 {
                let code = VersionCode::from_parts(major, minor, patch).unwrap();
                let tuple = (major as u32, minor as u32, patch as u32);
                assert_eq!(code.parts(), tuple);

                if let Some((prev_code, prev_tuple)) = previous {
                    assert!(prev_tuple < tuple);
                    assert!(prev_code < code, "{:?} !< {:?}", prev_tuple, tuple);
                }
                previous = Some((code, tuple));
            }
        }
    }
}

#[test]
fn test_parsed_codes_agree_with_from_parts() {
    // Stride through the space so every digit-count combination is covered.
    for major in (0..100).step_by(7) {
        for minor in (0..100).step_by(9) {
            for patch in (0..100).step_by(11) {
                let version = format!("{}.{}.{}", major, minor, patch);
                assert_eq!(
                    VersionCode::parse(&version),
                    VersionCode::from_parts(major, minor, patch),
                    "{}",
                    version
                );
            }
        }
    }
}

#[test]
fn test_equal_tuples_encode_equal() {
    assert_eq!(encode("v1.2.3"), encode("1.2.3-rc.1+build"));
    assert_ne!(encode("1.2.3"), encode("1.2.4"));
    assert!(encode("0.1.0") > encode("0.0.11"));
    assert!(encode("1.0.0") > encode("0.99.99"));
}
