//! Stream-of-documents input: one source, many top-level values.

use indoc::indoc;
use jsox::{Error, Value, from_multiple, from_slice_multiple, from_str};

#[test]
fn concatenated_documents() {
    let docs = from_multiple("[1] [2]\n[3]").unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[2], Value::Array(vec![Value::Int(3)]));
}

#[test]
fn newline_delimited_records() {
    let input = indoc! {r#"
        {"event": "open", "id": 1}
        {"event": "close", "id": 2}
        {"event": "open", "id": 3}
    "#};
    let docs = from_multiple(input).unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0].get("event").and_then(Value::as_str), Some("open"));
    assert_eq!(docs[1].get("id").and_then(Value::as_i64), Some(2));
}

#[test]
fn scalar_documents_stream_too() {
    let docs = from_multiple("1 2.5 \"x\" null true").unwrap();
    assert_eq!(
        docs,
        vec![
            Value::Int(1),
            Value::Float(2.5),
            Value::String("x".to_string()),
            Value::Null,
            Value::Bool(true),
        ]
    );
}

#[test]
fn comments_between_documents() {
    let docs = from_multiple("[1] /* gap */ [2] // end").unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn empty_input_yields_no_documents() {
    assert!(from_multiple("").unwrap().is_empty());
    assert!(from_multiple(" \n\t").unwrap().is_empty());
}

#[test]
fn byte_input_variant() {
    let docs = from_slice_multiple(b"{} []").unwrap();
    assert_eq!(docs, vec![Value::Object(vec![]), Value::Array(vec![])]);
}

#[test]
fn single_document_api_rejects_a_second_value() {
    let err = from_str("[1] [2]").unwrap_err();
    assert!(matches!(err, Error::MultipleDocuments { .. }), "{err:?}");
    assert!(err.to_string().contains("from_multiple"), "{err}");
}

#[test]
fn error_in_a_later_document_aborts_the_stream() {
    let err = from_multiple("[1] [2").unwrap_err();
    assert!(matches!(err, Error::ArrayNotTerminated { .. }), "{err:?}");
}
