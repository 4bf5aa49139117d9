//! Types shared by the tokenizer and the tree builder.
//!
//! This module is `pub(crate)`; consumers import these types from the crate
//! root to keep the public surface flexible.

mod error;
mod line_map;
mod span;
mod token;

pub use error::{
    CollectErrors, Diagnostic, ErrorHandler, ErrorKind, ErrorKindSet, ParseError, StrictErrors,
};
pub use line_map::{LineMap, LinePosition};
pub use span::Span;
pub use token::TokenSink;
