//! Parse entry points.

use crate::shared::{
    CollectErrors, Diagnostic, ErrorHandler, ErrorKindSet, LineMap, ParseError, StrictErrors,
};
use crate::tokenizer::Tokenizer;
use crate::tree::Element;
use crate::tree_builder::TreeBuilder;

/// Options controlling a parse.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Attached to diagnostics and fatal errors.
    pub source_url: Option<String>,
    /// Diagnostic kinds to silence.
    pub suppressed: ErrorKindSet,
}

/// The result of a recovering parse: a tree is always produced.
#[derive(Clone, Debug)]
pub struct ParseReport {
    pub root: Element,
    pub diagnostics: Vec<Diagnostic>,
    pub line_map: LineMap,
}

/// Parse with the default strict handler: the first violation aborts with a
/// [`ParseError`] carrying its resolved line and column.
pub fn parse(text: &str) -> Result<Element, ParseError> {
    let mut handler = StrictErrors;
    parse_with_handler(text, &ParseOptions::default(), &mut handler).map(|(root, _)| root)
}

/// Parse, recovering from every violation. The returned report carries the
/// repaired tree, all diagnostics, and the line map for resolving their
/// spans.
pub fn parse_with_recovery(text: &str, options: &ParseOptions) -> ParseReport {
    let mut handler = CollectErrors::default();
    match parse_with_handler(text, options, &mut handler) {
        Ok((root, line_map)) => ParseReport {
            root,
            diagnostics: handler.diagnostics,
            line_map,
        },
        Err(_) => unreachable!("the collecting handler never aborts"),
    }
}

/// Parse with a caller-supplied [`ErrorHandler`]. On success, returns the
/// tree plus the line map; when the handler aborts, the fatal error comes
/// back decorated with line/column and the source URL.
pub fn parse_with_handler<H: ErrorHandler>(
    text: &str,
    options: &ParseOptions,
    handler: &mut H,
) -> Result<(Element, LineMap), ParseError> {
    let mut line_map = LineMap::new(options.source_url.clone());
    let mut builder = TreeBuilder::new(options.suppressed, handler);
    let result = {
        let mut tokenizer = Tokenizer::new(text, &mut line_map, &mut builder);
        tokenizer.run()
    };
    match result {
        Ok(()) => Ok((builder.into_root(), line_map)),
        Err(mut fatal) => {
            fatal.position = Some(line_map.locate(fatal.span.start));
            fatal.url = line_map.url().map(str::to_string);
            Err(fatal)
        }
    }
}
