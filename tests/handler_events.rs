//! The handler seam: event ordering, key delivery, and the host hooks.

use jsox::{Handler, NumInfo, Number, Options, parse_with_handler};

/// Records every callback as a readable tag.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Handler for Recorder {
    type Value = &'static str;

    fn parse_start(&mut self) {
        self.events.push("parse_start".to_string());
    }

    fn parse_done(&mut self) {
        self.events.push("parse_done".to_string());
    }

    fn null_value(&mut self) -> &'static str {
        "null"
    }

    fn bool_value(&mut self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn start_array(&mut self) -> &'static str {
        self.events.push("start_array".to_string());
        "array"
    }

    fn end_array(&mut self, _array: &mut &'static str) {
        self.events.push("end_array".to_string());
    }

    fn start_hash(&mut self) -> &'static str {
        self.events.push("start_hash".to_string());
        "hash"
    }

    fn end_hash(&mut self, _hash: &mut &'static str) {
        self.events.push("end_hash".to_string());
    }

    fn add_value(&mut self, value: &'static str) {
        self.events.push(format!("root {value}"));
    }

    fn add_cstr(&mut self, s: &[u8]) {
        self.events
            .push(format!("root str {}", String::from_utf8_lossy(s)));
    }

    fn add_num(&mut self, num: &NumInfo<'_>) {
        self.events
            .push(format!("root num {}", String::from_utf8_lossy(num.text())));
    }

    fn array_append_value(&mut self, array: &mut &'static str, value: &'static str) {
        self.events.push(format!("append {value} to {array}"));
    }

    fn array_append_cstr(&mut self, array: &mut &'static str, s: &[u8]) {
        self.events
            .push(format!("append str {} to {array}", String::from_utf8_lossy(s)));
    }

    fn array_append_num(&mut self, array: &mut &'static str, num: &NumInfo<'_>) {
        self.events.push(format!(
            "append num {} to {array}",
            String::from_utf8_lossy(num.text())
        ));
    }

    fn hash_set_value(&mut self, hash: &mut &'static str, key: &[u8], value: &'static str) {
        self.events.push(format!(
            "set {}={value} on {hash}",
            String::from_utf8_lossy(key)
        ));
    }

    fn hash_set_cstr(&mut self, hash: &mut &'static str, key: &[u8], s: &[u8]) {
        self.events.push(format!(
            "set {}=str {} on {hash}",
            String::from_utf8_lossy(key),
            String::from_utf8_lossy(s)
        ));
    }

    fn hash_set_num(&mut self, hash: &mut &'static str, key: &[u8], num: &NumInfo<'_>) {
        self.events.push(format!(
            "set {}=num {} on {hash}",
            String::from_utf8_lossy(key),
            String::from_utf8_lossy(num.text())
        ));
    }
}

#[test]
fn events_arrive_in_document_order() {
    let mut recorder = Recorder::default();
    parse_with_handler(
        br#"{"a": [1, "x"], "b": null}"#,
        &Options::default(),
        &mut recorder,
    )
    .unwrap();
    assert_eq!(
        recorder.events,
        vec![
            "parse_start",
            "start_hash",
            "start_array",
            "append num 1 to array",
            "append str x to array",
            "end_array",
            "set a=array on hash",
            "set b=null on hash",
            "end_hash",
            "root hash",
            "parse_done",
        ]
    );
}

#[test]
fn escaped_keys_are_delivered_decoded() {
    let mut recorder = Recorder::default();
    parse_with_handler(br#"{"k\ney": 1}"#, &Options::default(), &mut recorder).unwrap();
    assert!(
        recorder
            .events
            .contains(&"set k\ney=num 1 on hash".to_string()),
        "{:?}",
        recorder.events
    );
}

#[test]
fn parse_done_runs_even_when_the_parse_fails() {
    let mut recorder = Recorder::default();
    let result = parse_with_handler(b"[1,", &Options::default(), &mut recorder);
    assert!(result.is_err());
    assert_eq!(recorder.events.first().map(String::as_str), Some("parse_start"));
    assert_eq!(recorder.events.last().map(String::as_str), Some("parse_done"));
    // The array never legally closed, so no end_array was delivered.
    assert!(!recorder.events.iter().any(|e| e == "end_array"));
}

#[test]
fn each_top_level_document_is_delivered_once() {
    let mut recorder = Recorder::default();
    parse_with_handler(b"1 \"two\" [3]", &Options::default(), &mut recorder).unwrap();
    let roots: Vec<&String> = recorder
        .events
        .iter()
        .filter(|e| e.starts_with("root "))
        .collect();
    assert_eq!(roots, ["root num 1", "root str two", "root array"]);
}

#[test]
fn numbers_reach_the_handler_unmaterialized() {
    struct BigProbe {
        saw_big: bool,
    }

    impl Handler for BigProbe {
        type Value = ();

        fn null_value(&mut self) {}
        fn bool_value(&mut self, _value: bool) {}
        fn start_array(&mut self) {}
        fn end_array(&mut self, _array: &mut ()) {}
        fn start_hash(&mut self) {}
        fn end_hash(&mut self, _hash: &mut ()) {}
        fn add_value(&mut self, _value: ()) {}
        fn add_cstr(&mut self, _s: &[u8]) {}

        fn add_num(&mut self, num: &NumInfo<'_>) {
            self.saw_big = num.is_big();
            // The original text survives for lossless escalation.
            assert_eq!(num.text(), b"99999999999999999999");
            assert!(matches!(num.materialize(), Number::BigInt(_)));
        }

        fn array_append_value(&mut self, _array: &mut (), _value: ()) {}
        fn array_append_cstr(&mut self, _array: &mut (), _s: &[u8]) {}
        fn array_append_num(&mut self, _array: &mut (), _num: &NumInfo<'_>) {}
        fn hash_set_value(&mut self, _hash: &mut (), _key: &[u8], _value: ()) {}
        fn hash_set_cstr(&mut self, _hash: &mut (), _key: &[u8], _s: &[u8]) {}
        fn hash_set_num(&mut self, _hash: &mut (), _key: &[u8], _num: &NumInfo<'_>) {}
    }

    let mut probe = BigProbe { saw_big: false };
    parse_with_handler(b"99999999999999999999", &Options::default(), &mut probe).unwrap();
    assert!(probe.saw_big);
}
