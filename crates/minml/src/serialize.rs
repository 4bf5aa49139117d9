//! Writing a tree back out as markup.
//!
//! The plain form is minimal: text escapes `& < >`, attribute values
//! (always double-quoted) also escape `"`, and an element with no content
//! is written `<n/>`. The canonical form additionally sorts attributes by
//! name and never uses the empty-element form, so two equivalent trees
//! canonicalize to identical strings.

use std::fmt::{self, Write};

use memchr::{memchr, memchr3};

use crate::tree::{Attribute, Element};

/// Write `element` in minimal form.
pub fn serialize<W: Write>(element: &Element, out: &mut W) -> fmt::Result {
    write_element(element, out, false)
}

/// Write `element` in canonical form: attributes sorted by name, every
/// element written with an explicit end-tag.
pub fn canonicalize<W: Write>(element: &Element, out: &mut W) -> fmt::Result {
    write_element(element, out, true)
}

pub fn serialize_to_string(element: &Element) -> String {
    let mut out = String::new();
    serialize(element, &mut out).expect("writing to a String cannot fail");
    out
}

pub fn canonicalize_to_string(element: &Element) -> String {
    let mut out = String::new();
    canonicalize(element, &mut out).expect("writing to a String cannot fail");
    out
}

fn write_element<W: Write>(element: &Element, out: &mut W, canonical: bool) -> fmt::Result {
    out.write_char('<')?;
    out.write_str(element.name())?;
    if canonical {
        let mut attrs: Vec<&Attribute> = element.attributes().iter().collect();
        attrs.sort_by(|a, b| a.name().cmp(b.name()));
        for attr in attrs {
            write_attribute(attr, out)?;
        }
    } else {
        for attr in element.attributes() {
            write_attribute(attr, out)?;
        }
    }
    if !canonical && !element.has_content() {
        return out.write_str("/>");
    }
    out.write_char('>')?;
    escape_text(element.text(0), out)?;
    for (i, child) in element.children().iter().enumerate() {
        write_element(child, out, canonical)?;
        escape_text(element.text(i + 1), out)?;
    }
    write!(out, "</{}>", element.name())
}

fn write_attribute<W: Write>(attr: &Attribute, out: &mut W) -> fmt::Result {
    write!(out, " {}=\"", attr.name())?;
    escape_attribute_value(attr.value(), out)?;
    out.write_char('"')
}

fn escape_text<W: Write>(text: &str, out: &mut W) -> fmt::Result {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(rel) = memchr3(b'&', b'<', b'>', &bytes[start..]) {
        let at = start + rel;
        out.write_str(&text[start..at])?;
        out.write_str(match bytes[at] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            _ => "&gt;",
        })?;
        start = at + 1;
    }
    out.write_str(&text[start..])
}

fn escape_attribute_value<W: Write>(value: &str, out: &mut W) -> fmt::Result {
    let bytes = value.as_bytes();
    let mut start = 0;
    loop {
        let amp = memchr3(b'&', b'<', b'>', &bytes[start..]);
        let quote = memchr(b'"', &bytes[start..]);
        let rel = match (amp, quote) {
            (Some(a), Some(q)) => a.min(q),
            (Some(a), None) => a,
            (None, Some(q)) => q,
            (None, None) => break,
        };
        let at = start + rel;
        out.write_str(&value[start..at])?;
        out.write_str(match bytes[at] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => "&quot;",
        })?;
        start = at + 1;
    }
    out.write_str(&value[start..])
}
