//! The structural stage: consumes abstract tokens and produces the tree.
//!
//! The builder trusts the token-stream shape guaranteed by the tokenizer
//! (see [`TokenSink`]) and so carries no defensive state machine of its own;
//! what it does enforce is element nesting, end-tag matching, attribute
//! uniqueness, and the before/after-root content rules.

use crate::shared::{
    Diagnostic, ErrorHandler, ErrorKind, ErrorKindSet, ParseError, Span, TokenSink,
};
use crate::tokenizer::chars::is_markup_whitespace;
use crate::tree::{Attribute, Element};

use stack::{OpenStack, PendingElement};

mod stack;


enum AttrState {
    None,
    Collect(Attribute),
    /// A rejected attribute (duplicate or `xmlns`); its value bytes are
    /// swallowed.
    Discard,
}

/// Builds an [`Element`] tree from the abstract-token stream.
///
/// Diagnostics flow through the [`ErrorHandler`]; a handler returning `Err`
/// aborts the parse and the partial tree must be discarded.
pub struct TreeBuilder<'h, H: ErrorHandler> {
    handler: &'h mut H,
    suppressed: ErrorKindSet,
    stack: OpenStack,
    root: Option<Element>,
    attr: AttrState,
    text_before_root_reported: bool,
    content_after_root_reported: bool,
}

impl<'h, H: ErrorHandler> TreeBuilder<'h, H> {
    pub fn new(suppressed: ErrorKindSet, handler: &'h mut H) -> Self {
        Self {
            handler,
            suppressed,
            stack: OpenStack::default(),
            root: None,
            attr: AttrState::None,
            text_before_root_reported: false,
            content_after_root_reported: false,
        }
    }

    /// The finished tree. With no root element in the input the document
    /// gets an empty-named placeholder (`EMPTY_DOCUMENT` was reported).
    pub fn into_root(self) -> Element {
        self.root.unwrap_or_else(|| Element::new(""))
    }

    /// Number of currently open elements.
    pub fn open_depth(&self) -> usize {
        self.stack.len()
    }

    fn report(&mut self, span: Span, kind: ErrorKind) -> Result<(), ParseError> {
        if self.suppressed.contains(kind) {
            return Ok(());
        }
        #[cfg(any(test, feature = "trace"))]
        log::trace!(
            target: "minml.tree_builder",
            "error {kind:?} at {}..{}",
            span.start,
            span.end
        );
        self.handler.error(Diagnostic { kind, span })
    }

    /// Commit the pending attribute, if any. There is no attribute-close
    /// token; the sequence ends when the next attribute name or tag close
    /// arrives.
    fn commit_attr(&mut self) {
        if let AttrState::Collect(attr) = std::mem::replace(&mut self.attr, AttrState::None) {
            if let Some(top) = self.stack.top_mut() {
                let added = top.element.attributes_mut().add(attr);
                debug_assert!(added, "duplicate attribute slipped past the name check");
            }
        }
    }

    fn pop_and_attach(&mut self) {
        let Some(pending) = self.stack.pop() else {
            debug_assert!(false, "pop on empty open-element stack");
            return;
        };
        if pending.detached {
            return;
        }
        match self.stack.top_mut() {
            Some(parent) => parent.element.append_child(pending.element),
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(pending.element);
            }
        }
    }

    fn top_start_tag_span(&self) -> Option<Span> {
        self.stack.top().and_then(|p| p.element.start_tag_span())
    }

    /// Any non-data token ends the current run of stray characters outside
    /// the root; the next run gets its own report.
    fn end_stray_text_run(&mut self) {
        self.text_before_root_reported = false;
        self.content_after_root_reported = false;
    }
}

impl<H: ErrorHandler> TokenSink for TreeBuilder<'_, H> {
    type Error = ParseError;

    fn start_tag_open(&mut self, pos: usize, name: &str) -> Result<(), ParseError> {
        debug_assert!(matches!(self.attr, AttrState::None));
        self.end_stray_text_run();
        let mut element = Element::new(name);
        element.set_start_tag_open(pos);
        let detached = self.stack.is_empty() && self.root.is_some();
        if detached {
            self.report(
                Span::new(pos, pos + 1 + name.len()),
                ErrorKind::ContentAfterRoot,
            )?;
        }
        self.stack.push(PendingElement { element, detached });
        Ok(())
    }

    fn attribute_name(&mut self, name_pos: usize, name: &str) -> Result<(), ParseError> {
        self.commit_attr();
        let span = Span::new(name_pos, name_pos + name.len());
        if name == "xmlns" {
            self.report(span, ErrorKind::XmlnsAttribute)?;
            self.attr = AttrState::Discard;
            return Ok(());
        }
        let duplicate = self
            .stack
            .top()
            .map_or(false, |top| top.element.attributes().contains(name));
        if duplicate {
            self.report(span, ErrorKind::DuplicateAttribute)?;
            self.attr = AttrState::Discard;
        } else {
            let mut attr = Attribute::new(name, "");
            attr.name_pos = Some(name_pos);
            self.attr = AttrState::Collect(attr);
        }
        Ok(())
    }

    fn data_char(&mut self, pos: usize, src_len: usize, ch: char) -> Result<(), ParseError> {
        match &mut self.attr {
            AttrState::Collect(attr) => {
                attr.push_data(ch, pos, src_len);
                Ok(())
            }
            AttrState::Discard => Ok(()),
            AttrState::None => {
                if let Some(top) = self.stack.top_mut() {
                    top.element.push_data(ch, pos, src_len);
                    return Ok(());
                }
                if self.root.is_none() {
                    // Whitespace before the root is the document's own
                    // leading layout; anything else is a violation,
                    // reported once per run.
                    if !is_markup_whitespace(ch) && !self.text_before_root_reported {
                        self.text_before_root_reported = true;
                        self.report(Span::new(pos, pos + src_len), ErrorKind::TextBeforeRoot)?;
                    }
                } else if !self.content_after_root_reported {
                    self.content_after_root_reported = true;
                    self.report(Span::new(pos, pos + src_len), ErrorKind::ContentAfterRoot)?;
                }
                Ok(())
            }
        }
    }

    fn start_tag_close(&mut self, pos: usize) -> Result<(), ParseError> {
        self.commit_attr();
        if let Some(top) = self.stack.top_mut() {
            top.element.set_start_tag_close(pos + 1);
        }
        Ok(())
    }

    fn empty_element_tag_close(&mut self, pos: usize) -> Result<(), ParseError> {
        self.commit_attr();
        if let Some(top) = self.stack.top_mut() {
            top.element.set_start_tag_close(pos + 2);
        }
        self.pop_and_attach();
        Ok(())
    }

    fn end_tag(&mut self, span: Span, name: &str) -> Result<(), ParseError> {
        self.end_stray_text_run();
        match self.stack.find_from_top(name) {
            None => self.report(span, ErrorKind::MismatchedEndTag),
            Some(depth) => {
                // Most-recent-match recovery: everything above the match is
                // implicitly closed.
                for _ in 0..depth {
                    let tag_span = self.top_start_tag_span().unwrap_or(span);
                    self.report(tag_span, ErrorKind::MissingEndTag)?;
                    self.pop_and_attach();
                }
                if let Some(top) = self.stack.top_mut() {
                    top.element.set_end_tag(span);
                }
                self.pop_and_attach();
                Ok(())
            }
        }
    }

    fn end(&mut self, pos: usize) -> Result<(), ParseError> {
        debug_assert!(matches!(self.attr, AttrState::None));
        while !self.stack.is_empty() {
            let tag_span = self.top_start_tag_span().unwrap_or(Span::empty_at(pos));
            self.report(tag_span, ErrorKind::MissingEndTag)?;
            self.pop_and_attach();
        }
        if self.root.is_none() {
            self.report(Span::empty_at(pos), ErrorKind::EmptyDocument)?;
        }
        Ok(())
    }

    fn error(&mut self, span: Span, kind: ErrorKind) -> Result<(), ParseError> {
        self.report(span, kind)
    }

    fn markup_skipped(&mut self, span: Span) -> Result<(), ParseError> {
        self.end_stray_text_run();
        if let Some(top) = self.stack.top_mut() {
            top.element.note_markup_skip(span);
        }
        Ok(())
    }
}
