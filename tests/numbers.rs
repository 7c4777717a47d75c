//! Numeric materialization through the public API: native paths, the big
//! escalation paths, and the lenient non-finite forms.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use jsox::{BigDecLoad, Options, Value, from_str, from_str_with_options};
use num_bigint::BigInt;

#[test]
fn integers_and_floats() {
    assert_eq!(from_str("0").unwrap(), Value::Int(0));
    assert_eq!(from_str("-17").unwrap(), Value::Int(-17));
    assert_eq!(from_str("3.5").unwrap(), Value::Float(3.5));
    assert_eq!(from_str("2e3").unwrap(), Value::Float(2000.0));
    assert_eq!(from_str("-1.5e2").unwrap(), Value::Float(-150.0));
}

#[test]
fn plus_prefixed_numbers_are_accepted() {
    assert_eq!(from_str("+3").unwrap(), Value::Int(3));
    assert_eq!(from_str("[+2.5]").unwrap(), Value::Array(vec![Value::Float(2.5)]));
}

#[test]
fn plus_without_digits_is_rejected() {
    let err = from_str("+").unwrap_err();
    assert!(err.to_string().contains("not a number"), "{err}");
}

#[test]
fn huge_integer_preserves_all_digits() {
    let v = from_str("99999999999999999999").unwrap();
    assert_eq!(
        v,
        Value::BigInt(BigInt::from_str("99999999999999999999").unwrap())
    );
}

#[test]
fn negative_huge_integer() {
    let v = from_str("-123456789012345678901234567890").unwrap();
    assert_eq!(
        v,
        Value::BigInt(BigInt::from_str("-123456789012345678901234567890").unwrap())
    );
}

#[test]
fn precise_decimal_escalates_under_auto() {
    let v = from_str("1.2345678901234567890").unwrap();
    assert_eq!(
        v,
        Value::BigDecimal(BigDecimal::from_str("1.2345678901234567890").unwrap())
    );
}

#[test]
fn precise_decimal_coerces_under_float_dec() {
    let options = Options {
        bigdec_load: BigDecLoad::FloatDec,
        ..Options::default()
    };
    match from_str_with_options("1.2345678901234567890", &options).unwrap() {
        Value::Float(f) => assert!((f - 1.234_567_890_123_456_8).abs() < 1e-15),
        other => panic!("expected a float, got {other:?}"),
    }
}

#[test]
fn big_dec_option_forces_escalation() {
    let options = Options {
        bigdec_load: BigDecLoad::BigDec,
        ..Options::default()
    };
    let v = from_str_with_options("0.5", &options).unwrap();
    assert_eq!(v, Value::BigDecimal(BigDecimal::from_str("0.5").unwrap()));
}

#[test]
fn non_finite_literals() {
    let v = from_str("[Infinity, -Infinity, NaN]").unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items[0], Value::Float(f64::INFINITY));
    assert_eq!(items[1], Value::Float(f64::NEG_INFINITY));
    match items[2] {
        Value::Float(f) => assert!(f.is_nan()),
        ref other => panic!("expected NaN, got {other:?}"),
    }
}

#[test]
fn nan_final_letter_is_case_insensitive() {
    for input in ["NaN", "Nan", "-NaN", "-nan", "+nan"] {
        match from_str(input).unwrap() {
            Value::Float(f) => assert!(f.is_nan(), "{input}"),
            other => panic!("{input}: expected NaN, got {other:?}"),
        }
    }
}

#[test]
fn broken_non_finite_literals_are_rejected() {
    assert!(from_str("Infinit").is_err());
    assert!(from_str("[Nax]").is_err());
    assert!(from_str("-Infinityy").is_err());
}

#[test]
fn number_terminates_cleanly_before_structural_bytes() {
    let v = from_str("[1,2]").unwrap();
    assert_eq!(v, Value::Array(vec![Value::Int(1), Value::Int(2)]));
    let v = from_str(r#"{"a":5}"#).unwrap();
    assert_eq!(v.get("a").and_then(Value::as_i64), Some(5));
}

#[test]
fn trailing_zeros_keep_numbers_native() {
    assert_eq!(from_str("1.2300000000000000000").unwrap(), Value::Float(1.23));
}
