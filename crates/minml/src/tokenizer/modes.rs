//! Tokenization mode definitions.
//!
//! The mode selects which lexical grammar applies to the bytes at the
//! cursor. `Main` covers everything outside tags; the remaining modes are
//! only reachable after a start-tag has committed (or, for `Comment`, after
//! `<!--` was recognized).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Main,
    Comment,
    StartAttributeValue,
    UnquotedAttributeValue,
    SingleQuoteAttributeValue,
    DoubleQuoteAttributeValue,
    Tag,
}
