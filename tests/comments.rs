//! Lenient comment extension: block and line comments between tokens.

use jsox::{Value, from_str};

#[test]
fn comments_around_a_document() {
    let v = from_str("/* hi */ // line\n [1]").unwrap();
    assert_eq!(v, Value::Array(vec![Value::Int(1)]));
}

#[test]
fn comments_inside_containers() {
    let v = from_str("[1, /* two */ 2, // three\n 3]").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    let v = from_str("{ /* a */ \"a\" /* colon */ : // value\n 1 }").unwrap();
    assert_eq!(v.get("a").and_then(Value::as_i64), Some(1));
}

#[test]
fn line_comment_ends_at_end_of_input() {
    let v = from_str("[1] // trailing").unwrap();
    assert_eq!(v, Value::Array(vec![Value::Int(1)]));
}

#[test]
fn block_comment_with_stars_inside() {
    let v = from_str("/* ** star * party ***/ 1").unwrap();
    assert_eq!(v, Value::Int(1));
}

#[test]
fn unterminated_block_comment() {
    let err = from_str("[1] /* oops").unwrap_err();
    assert!(err.to_string().contains("comment not terminated"), "{err}");
    let err = from_str("/*/").unwrap_err();
    assert!(err.to_string().contains("comment not terminated"), "{err}");
}

#[test]
fn invalid_comment_format() {
    let err = from_str("/x 1").unwrap_err();
    assert!(err.to_string().contains("invalid comment format"), "{err}");
}

#[test]
fn slash_inside_a_string_is_not_a_comment() {
    let v = from_str("\"// not a comment\"").unwrap();
    assert_eq!(v, Value::String("// not a comment".to_string()));
}
