//! End-to-end parsing scenarios through the public entry points.

use minml::{
    parse, parse_with_handler, parse_with_recovery, ErrorKind, ErrorKindSet, ParseOptions,
    ParseReport, Span, StrictErrors,
};

fn recover(input: &str) -> ParseReport {
    parse_with_recovery(input, &ParseOptions::default())
}

fn kinds(report: &ParseReport) -> Vec<ErrorKind> {
    report.diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn happy_path() {
    let report = recover("<a x=\"1\"><b/>hi</a>");
    assert!(report.diagnostics.is_empty());
    let root = &report.root;
    assert_eq!(root.name(), "a");
    assert_eq!(root.attributes().len(), 1);
    assert_eq!(root.attributes().value("x"), Some("1"));
    assert_eq!(root.child_count(), 1);
    assert_eq!(root.children()[0].name(), "b");
    assert!(!root.children()[0].has_content());
    assert_eq!(root.text(0), "");
    assert_eq!(root.text(1), "hi");
}

#[test]
fn implicit_close() {
    let report = recover("<a><b><c></a>");
    assert_eq!(
        kinds(&report),
        [ErrorKind::MissingEndTag, ErrorKind::MissingEndTag]
    );
    let root = &report.root;
    assert_eq!(root.name(), "a");
    assert_eq!(root.child_count(), 1);
    let b = &root.children()[0];
    assert_eq!(b.name(), "b");
    assert_eq!(b.child_count(), 1);
    let c = &b.children()[0];
    assert_eq!(c.name(), "c");
    assert!(!c.has_content());
}

#[test]
fn stray_end_tag() {
    let report = recover("<a></b></a>");
    assert_eq!(kinds(&report), [ErrorKind::MismatchedEndTag]);
    assert_eq!(report.root.name(), "a");
    assert!(!report.root.has_content());
}

#[test]
fn bare_lt_as_text() {
    let report = recover("<a>1<2</a>");
    assert_eq!(kinds(&report), [ErrorKind::UnescapedLt]);
    assert_eq!(report.root.text(0), "1<2");
}

#[test]
fn duplicate_attribute() {
    let report = recover("<a x=\"1\" x=\"2\"/>");
    assert_eq!(kinds(&report), [ErrorKind::DuplicateAttribute]);
    assert_eq!(report.root.attributes().len(), 1);
    assert_eq!(report.root.attributes().value("x"), Some("1"));
}

#[test]
fn numeric_references() {
    let report = recover("<a>&#x41;&#x110000;</a>");
    assert_eq!(kinds(&report), [ErrorKind::RefCodePointTooBig]);
    assert_eq!(report.root.text(0), "A\u{FFFD}");
}

#[test]
fn empty_input_reports_empty_document() {
    let report = recover("");
    assert_eq!(kinds(&report), [ErrorKind::EmptyDocument]);
    assert_eq!(report.root.name(), "");
    assert!(!report.root.has_content());
}

#[test]
fn single_empty_element_is_clean() {
    let report = recover("<a/>");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.root.name(), "a");
    assert!(!report.root.has_content());
}

#[test]
fn plain_text_is_one_chunk() {
    let report = recover("<a>plain text\r\nok</a>");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.root.text_chunk_count(), 1);
    assert_eq!(report.root.text(0), "plain text\nok");
}

#[test]
fn comment_is_dropped_but_located() {
    let report = recover("<a>x<!-- note -->y</a>");
    assert!(report.diagnostics.is_empty());
    let root = &report.root;
    assert_eq!(root.text(0), "xy");
    // 'y' sits after the 13-byte comment.
    assert_eq!(root.text_location(0, 1, 2), Some(Span::new(17, 18)));
}

#[test]
fn reference_text_location_covers_the_source_range() {
    let report = recover("<a>&lt;b</a>");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.root.text(0), "<b");
    assert_eq!(report.root.text_location(0, 0, 1), Some(Span::new(3, 7)));
    assert_eq!(report.root.text_location(0, 1, 2), Some(Span::new(7, 8)));
}

#[test]
fn leading_whitespace_and_bom_are_fine() {
    let report = recover("\u{FEFF}\n <a/>\n");
    // Whitespace before the root is silent; after the root it is content.
    assert_eq!(kinds(&report), [ErrorKind::ContentAfterRoot]);
    assert_eq!(report.root.name(), "a");
}

#[test]
fn text_before_root_is_reported() {
    let report = recover("oops<a/>");
    assert_eq!(kinds(&report), [ErrorKind::TextBeforeRoot]);
    assert_eq!(report.root.name(), "a");
}

#[test]
fn second_root_is_dropped() {
    let report = recover("<a/><b/>");
    assert_eq!(kinds(&report), [ErrorKind::ContentAfterRoot]);
    assert_eq!(report.root.name(), "a");
}

#[test]
fn disjoint_runs_after_root_each_report() {
    let report = recover("<a/>text1<!--c-->text2");
    assert_eq!(
        kinds(&report),
        [ErrorKind::ContentAfterRoot, ErrorKind::ContentAfterRoot]
    );
    // One report per run, anchored at each run's first character.
    assert_eq!(report.diagnostics[0].span, Span::new(4, 5));
    assert_eq!(report.diagnostics[1].span, Span::new(17, 18));
    assert_eq!(report.root.name(), "a");
    assert!(!report.root.has_content());
}

#[test]
fn unterminated_constructs_still_build_a_tree() {
    let report = recover("<a x=\"1");
    assert_eq!(
        kinds(&report),
        [ErrorKind::MissingQuote, ErrorKind::MissingEndTag]
    );
    assert_eq!(report.root.name(), "a");
    assert_eq!(report.root.attributes().value("x"), Some("1"));
}

#[test]
fn diagnostics_resolve_to_lines_and_columns() {
    let report = recover("<a>\n</b>\n</a>");
    assert_eq!(kinds(&report), [ErrorKind::MismatchedEndTag]);
    let span = report.diagnostics[0].span;
    assert_eq!(span, Span::new(4, 8));
    let position = report.line_map.locate(span.start);
    assert_eq!((position.line, position.column), (2, 1));
}

#[test]
fn strict_parse_aborts_with_position() {
    let err = parse("<a>\n</b></a>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MismatchedEndTag);
    let position = err.position.expect("position resolved");
    assert_eq!((position.line, position.column), (2, 1));
}

#[test]
fn strict_parse_accepts_clean_input() {
    let root = parse("<a x=\"1\"><b/>hi</a>").unwrap();
    assert_eq!(root.name(), "a");
}

#[test]
fn source_url_lands_on_fatal_errors() {
    let options = ParseOptions {
        source_url: Some("memory:doc".to_string()),
        ..Default::default()
    };
    let mut handler = StrictErrors;
    let err = parse_with_handler("<a></b></a>", &options, &mut handler).unwrap_err();
    assert_eq!(err.url.as_deref(), Some("memory:doc"));
    assert!(err.to_string().contains("memory:doc"));
    assert!(err.to_string().contains("end-tag"));
}

#[test]
fn suppressed_kinds_never_reach_the_report() {
    let options = ParseOptions {
        suppressed: ErrorKindSet::of(&[ErrorKind::MissingEndTag]),
        ..Default::default()
    };
    let report = parse_with_recovery("<a><b>", &options);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.root.name(), "a");
    assert_eq!(report.root.children()[0].name(), "b");
}

#[test]
fn attribute_values_normalize_line_endings() {
    let report = recover("<a x=\"l1\r\nl2\"/>");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.root.attributes().value("x"), Some("l1\nl2"));
}

#[test]
fn recovery_is_total_on_hostile_inputs() {
    let inputs = [
        "",
        "<",
        "&",
        ">",
        "<a",
        "<a x=",
        "<a x='1",
        "<!--",
        "<!-- never closed",
        "</nope>",
        "<a><b></c></a>",
        "a<b>c</d>e",
        "<<<<",
        "&&&&",
        "<a x=\"1\" x=\"2\" x=\"3\"/>",
        "<a \u{1}\u{2}>",
        "text only",
        "\u{FEFF}",
        "<a>&#xFFFF;</a>",
        "<a>x<!--y",
    ];
    for input in inputs {
        let report = recover(input);
        assert_attribute_uniqueness(&report.root);
        // The repaired tree is always serializable.
        let _ = minml::canonicalize_to_string(&report.root);
    }
}

fn assert_attribute_uniqueness(element: &minml::Element) {
    let mut seen = std::collections::HashSet::new();
    for attr in element.attributes() {
        assert!(seen.insert(attr.name()), "duplicate attribute {}", attr.name());
    }
    for child in element.children() {
        assert_attribute_uniqueness(child);
    }
}
