//! A recovering parser for a minimal XML-like markup language: a single
//! element tree with attributes and character content, without namespaces,
//! processing instructions, doctypes, or CDATA.
//!
//! The parser consumes any string and always produces a well-formed tree;
//! when the input violates the grammar it synthesizes a repair that keeps as
//! much of the author's intent as possible, reporting every violation on the
//! way. Internally it is a two-stage pipeline: the [`Tokenizer`] classifies
//! bytes and emits abstract tokens into a [`TokenSink`], and the
//! [`TreeBuilder`] turns that stream into an [`Element`] tree. Source
//! positions survive character-reference expansion, line-ending
//! normalization, and skipped comments via per-element text maps.
//!
//! ```
//! let report = minml::parse_with_recovery("<a x=\"1\"><b/>hi", &Default::default());
//! assert_eq!(report.root.name(), "a");
//! assert_eq!(report.root.attributes().value("x"), Some("1"));
//! assert_eq!(report.root.text(1), "hi");
//! // The missing `</a>` was repaired and reported.
//! assert_eq!(report.diagnostics.len(), 1);
//! ```
//!
//! Strict parsing treats the first violation as fatal:
//!
//! ```
//! assert_eq!(
//!     minml::parse("<a></a>").unwrap().name(),
//!     "a"
//! );
//! assert!(minml::parse("<a></b>").is_err());
//! ```

mod parse;
mod serialize;
mod shared;
pub mod tokenizer;
pub mod tree;
pub mod tree_builder;

pub use parse::{parse, parse_with_handler, parse_with_recovery, ParseOptions, ParseReport};
pub use serialize::{canonicalize, canonicalize_to_string, serialize, serialize_to_string};
pub use shared::{
    CollectErrors, Diagnostic, ErrorHandler, ErrorKind, ErrorKindSet, LineMap, LinePosition,
    ParseError, Span, StrictErrors, TokenSink,
};
pub use tokenizer::{Tokenizer, TokenizerStats};
pub use tree::{Attribute, AttributeSet, ContentItem, Element, TextMap};
pub use tree_builder::TreeBuilder;
