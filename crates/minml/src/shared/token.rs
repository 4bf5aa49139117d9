//! The abstract-token boundary between the tokenizer and the tree builder.

use super::{ErrorKind, Span};

/// Consumer of the tokenizer's abstract-token stream.
///
/// Every open has a matching close: a `start_tag_open` is always followed,
/// after any number of `attribute_name`/`data_char` calls, by either
/// `start_tag_close` or `empty_element_tag_close` (synthesized during
/// recovery if the input lacks one). The full stream matches
///
/// ```text
/// ( start_tag_open (attribute_name data_char*)* (start_tag_close | empty_element_tag_close)
/// | data_char
/// | end_tag
/// )* end
/// ```
///
/// for every input, so implementations may rely on this shape without
/// defensive checks. `error` and `markup_skipped` are side channels and can
/// occur anywhere; error reports for a token arrive before the next token.
///
/// The associated `Error` type lets a sink abort the parse from any call;
/// the tokenizer propagates it without attempting further work.
pub trait TokenSink {
    type Error;

    /// `pos` is the offset of the `<`.
    fn start_tag_open(&mut self, pos: usize, name: &str) -> Result<(), Self::Error>;

    fn attribute_name(&mut self, name_pos: usize, name: &str) -> Result<(), Self::Error>;

    /// One character of data. `src_len` is the number of source bytes
    /// consumed: it differs from `ch.len_utf8()` when the character came
    /// from a reference, a collapsed CRLF, or a U+FFFD replacement.
    fn data_char(&mut self, pos: usize, src_len: usize, ch: char) -> Result<(), Self::Error>;

    /// `pos` is the offset of the `>` (or of the last consumed byte when the
    /// close is synthesized during recovery).
    fn start_tag_close(&mut self, pos: usize) -> Result<(), Self::Error>;

    /// `pos` is the offset of the `/>`.
    fn empty_element_tag_close(&mut self, pos: usize) -> Result<(), Self::Error>;

    /// `span` covers `</` through `>`.
    fn end_tag(&mut self, span: Span, name: &str) -> Result<(), Self::Error>;

    /// End of stream; no further calls follow.
    fn end(&mut self, pos: usize) -> Result<(), Self::Error>;

    fn error(&mut self, span: Span, kind: ErrorKind) -> Result<(), Self::Error>;

    /// A source range that produced no output (a skipped comment), reported
    /// so position back-channels can stay accurate.
    fn markup_skipped(&mut self, span: Span) -> Result<(), Self::Error> {
        let _ = span;
        Ok(())
    }
}
