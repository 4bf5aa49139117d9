//! Serialization laws: round-trips on clean input, canonicalization
//! idempotence, and escaping.

use minml::{
    canonicalize_to_string, parse, parse_with_recovery, serialize_to_string, ParseOptions,
};

fn recover_root(input: &str) -> minml::Element {
    parse_with_recovery(input, &ParseOptions::default()).root
}

#[test]
fn serialize_round_trips_clean_documents() {
    let inputs = [
        "<a/>",
        "<a x=\"1\"><b/>hi</a>",
        "<doc><p>one</p><p>two</p></doc>",
        "<a>&lt;&amp;</a>",
        "<a x=\"a&quot;b\"/>",
        "<r>pre<c>in</c>post</r>",
        "<a x=\"1\" y=\"2\" z=\"3\"/>",
    ];
    for input in inputs {
        let root = parse(input).expect("clean input");
        assert_eq!(serialize_to_string(&root), input, "round trip of {input:?}");
    }
}

#[test]
fn round_trip_folds_references_and_line_endings() {
    let root = parse("<a>&#x41;\r\nx</a>").expect("clean input");
    assert_eq!(serialize_to_string(&root), "<a>A\nx</a>");
}

#[test]
fn canonical_form_sorts_attributes_and_expands_empty_elements() {
    let root = parse("<a z=\"1\" b=\"2\"><c/></a>").expect("clean input");
    assert_eq!(
        canonicalize_to_string(&root),
        "<a b=\"2\" z=\"1\"><c></c></a>"
    );
}

#[test]
fn canonicalization_is_idempotent() {
    let inputs = [
        "<a/>",
        "<a z=\"1\" b=\"2\"><c x=\"&lt;\"/>text</a>",
        "<a><b><c></a>",
        "<a>1<2</a>",
        "<a x=\"1\" x=\"2\"/>",
        "<a>&#x110000;</a>",
        "<a>x<!--gone-->y</a>",
    ];
    for input in inputs {
        let first = canonicalize_to_string(&recover_root(input));
        let second = canonicalize_to_string(&recover_root(&first));
        assert_eq!(first, second, "canonicalization of {input:?} not stable");
    }
}

#[test]
fn recovered_trees_reparse_cleanly() {
    // Whatever recovery produced, its serialization is well-formed.
    let inputs = ["<a><b><c></a>", "<a>1<2</a>", "<a x=\"un", "<a>&bogus;</a>"];
    for input in inputs {
        let repaired = serialize_to_string(&recover_root(input));
        let report = parse_with_recovery(&repaired, &ParseOptions::default());
        assert!(
            report.diagnostics.is_empty(),
            "reparse of {repaired:?} produced {:?}",
            report.diagnostics
        );
    }
}

#[test]
fn escaping_survives_a_round_trip() {
    let mut root = minml::Element::new("e");
    root.attributes_mut()
        .add(minml::Attribute::new("v", "<>&\"'"));
    root.append_text("a<b>c&d\"e'f");
    let text = serialize_to_string(&root);
    let reparsed = parse(&text).expect("escaped output is clean");
    assert_eq!(reparsed, root);
}
