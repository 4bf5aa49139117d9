//! Parse diagnostics: the error taxonomy, the error-handler contract, and
//! the fatal error type.

use std::fmt;

use super::{LinePosition, Span};

/// Every lexical or structural violation the parser can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A high or low surrogate not paired with its counterpart.
    IsolatedSurrogate,
    /// A forbidden code point in the input (controls, non-characters).
    InvalidCodePoint,
    /// A `<` that does not begin a recognized construct.
    UnescapedLt,
    /// A `>` outside a tag.
    UnescapedGt,
    /// A `&` that does not begin a recognized reference.
    UnescapedAmp,
    /// `&#x...;` value beyond U+10FFFF.
    RefCodePointTooBig,
    /// Reference resolving to a forbidden code point.
    ForbiddenCodePointRef,
    /// Named reference other than `lt amp gt quot apos`.
    UnknownCharName,
    /// Attribute value missing its closing quote before tag close or EOF.
    MissingQuote,
    /// Comment never sees `-->` before EOF.
    UnterminatedComment,
    /// `--` inside a comment body.
    DoubleMinusInComment,
    /// Non-whitespace data before the first start-tag.
    TextBeforeRoot,
    /// Content after the root element has closed.
    ContentAfterRoot,
    /// Open element forced closed by recovery or EOF.
    MissingEndTag,
    /// End-tag name matching no open element.
    MismatchedEndTag,
    /// Second attribute of the same name within one tag.
    DuplicateAttribute,
    /// Attribute literally named `xmlns`.
    XmlnsAttribute,
    /// Attribute name not preceded by whitespace.
    SpaceRequiredBeforeAttributeName,
    /// EOF within an unclosed start-tag.
    EofInStartTag,
    /// Input produced no root element.
    EmptyDocument,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::IsolatedSurrogate => "isolated surrogate",
            ErrorKind::InvalidCodePoint => "invalid code point",
            ErrorKind::UnescapedLt => "unescaped \"<\"",
            ErrorKind::UnescapedGt => "unescaped \">\"",
            ErrorKind::UnescapedAmp => "unescaped \"&\"",
            ErrorKind::RefCodePointTooBig => "character number must not exceed #x10FFFF",
            ErrorKind::ForbiddenCodePointRef => "character reference to forbidden code point",
            ErrorKind::UnknownCharName => "reference to unknown character name",
            ErrorKind::MissingQuote => "missing quote",
            ErrorKind::UnterminatedComment => "unterminated comment",
            ErrorKind::DoubleMinusInComment => "comment must not contain \"--\"",
            ErrorKind::TextBeforeRoot => "text before root element",
            ErrorKind::ContentAfterRoot => "text or elements after root element",
            ErrorKind::MissingEndTag => "missing end-tag",
            ErrorKind::MismatchedEndTag => "end-tag does not match any open element",
            ErrorKind::DuplicateAttribute => "duplicate attribute",
            ErrorKind::XmlnsAttribute => "attribute must not be named \"xmlns\"",
            ErrorKind::SpaceRequiredBeforeAttributeName => {
                "whitespace required before attribute name"
            }
            ErrorKind::EofInStartTag => "end of input in start-tag",
            ErrorKind::EmptyDocument => "empty document",
        }
    }

    fn bit(self) -> u32 {
        1 << self as u32
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A set of [`ErrorKind`]s, used to suppress selected diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ErrorKindSet(u32);

impl ErrorKindSet {
    pub const EMPTY: ErrorKindSet = ErrorKindSet(0);

    pub fn of(kinds: &[ErrorKind]) -> Self {
        let mut set = Self::EMPTY;
        for &kind in kinds {
            set.insert(kind);
        }
        set
    }

    pub fn insert(&mut self, kind: ErrorKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(self, kind: ErrorKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One reported violation: what went wrong and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub span: Span,
}

/// A diagnostic promoted to a fatal error by the [`ErrorHandler`].
///
/// Line/column and URL are attached by the parse entry point once the line
/// map is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub span: Span,
    pub position: Option<LinePosition>,
    pub url: Option<String>,
}

impl ParseError {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self {
            kind: diagnostic.kind,
            span: diagnostic.span,
            position: None,
            url: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(url) = &self.url {
            write!(f, "{url}:")?;
        }
        match self.position {
            Some(lp) => write!(f, "{}:{}: {}", lp.line, lp.column, self.kind),
            None => write!(f, "{}..{}: {}", self.span.start, self.span.end, self.kind),
        }
    }
}

impl std::error::Error for ParseError {}

/// Receives every non-suppressed diagnostic as it is produced.
///
/// Returning `Err` promotes the diagnostic to a fatal error: the parser stops
/// immediately and whatever partial tree exists must be discarded.
pub trait ErrorHandler {
    fn error(&mut self, diagnostic: Diagnostic) -> Result<(), ParseError>;
}

/// The default handler: the first diagnostic aborts the parse.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrictErrors;

impl ErrorHandler for StrictErrors {
    fn error(&mut self, diagnostic: Diagnostic) -> Result<(), ParseError> {
        Err(ParseError::new(diagnostic))
    }
}

/// Collects every diagnostic and lets the parse run to completion.
#[derive(Clone, Debug, Default)]
pub struct CollectErrors {
    pub diagnostics: Vec<Diagnostic>,
}

impl ErrorHandler for CollectErrors {
    fn error(&mut self, diagnostic: Diagnostic) -> Result<(), ParseError> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ErrorKindSet};

    #[test]
    fn kind_set_insert_and_contains() {
        let mut set = ErrorKindSet::EMPTY;
        assert!(set.is_empty());
        set.insert(ErrorKind::MissingEndTag);
        set.insert(ErrorKind::UnescapedGt);
        assert!(set.contains(ErrorKind::MissingEndTag));
        assert!(set.contains(ErrorKind::UnescapedGt));
        assert!(!set.contains(ErrorKind::UnescapedLt));
    }

    #[test]
    fn unescaped_messages_name_their_own_delimiter() {
        assert!(ErrorKind::UnescapedLt.message().contains('<'));
        assert!(ErrorKind::UnescapedGt.message().contains('>'));
    }
}
