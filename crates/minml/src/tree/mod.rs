//! The element tree.
//!
//! An element's content is an ordered list of child elements interleaved
//! with characters. The characters are accessed as *text chunks* based on
//! their position relative to children: for `n` children there are exactly
//! `n + 1` chunks, any of which may be empty. Chunk `i` precedes child `i`;
//! chunk `n` follows the last child. Internally the characters live in one
//! buffer, with each child recording the buffer index where it sits.
//!
//! Children are owned by their parent, so an element can never acquire two
//! parents or become its own ancestor; attachment takes the child by value.

mod attrs;
mod text_map;

pub use attrs::{Attribute, AttributeSet};
pub use text_map::TextMap;

use crate::shared::Span;

/// A named tree node with attributes and interleaved content.
#[derive(Clone, Debug, Default)]
pub struct Element {
    name: String,
    attributes: AttributeSet,
    text: String,
    children: Vec<Element>,
    /// Byte index into `text` where each child sits; same length as
    /// `children`.
    anchors: Vec<usize>,
    start_tag: Option<Span>,
    end_tag: Option<Span>,
    text_map: TextMap,
}

/// One item of an element's interleaved content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentItem<'a> {
    Text(&'a str),
    Child(&'a Element),
}

impl Element {
    /// Create an element with empty attributes and content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn has_content(&self) -> bool {
        self.has_text() || self.has_children()
    }

    /// Number of text chunks; always `child_count() + 1`.
    pub fn text_chunk_count(&self) -> usize {
        self.children.len() + 1
    }

    /// The text chunk at `chunk`; may be empty, never absent.
    ///
    /// # Panics
    ///
    /// Panics if `chunk > child_count()`.
    pub fn text(&self, chunk: usize) -> &str {
        let (start, end) = self.chunk_bounds(chunk);
        &self.text[start..end]
    }

    /// True if every content character is space, tab, FF, or LF (the
    /// language's whitespace set; line normalization leaves no CRs in
    /// parsed text). Trivially true for empty text.
    pub fn is_text_all_whitespace(&self) -> bool {
        self.text
            .bytes()
            .all(|b| matches!(b, b' ' | b'\t' | b'\x0C' | b'\n'))
    }

    /// Replace the text chunk at `chunk`. Editing content drops the
    /// parser's source mapping for this element.
    ///
    /// # Panics
    ///
    /// Panics if `chunk > child_count()`.
    pub fn set_text(&mut self, chunk: usize, new: &str) {
        let (start, end) = self.chunk_bounds(chunk);
        self.text.replace_range(start..end, new);
        let delta = new.len() as isize - (end - start) as isize;
        if delta != 0 {
            for anchor in &mut self.anchors[chunk..] {
                *anchor = (*anchor as isize + delta) as usize;
            }
        }
        self.text_map.clear();
    }

    /// Append characters to the trailing text chunk.
    pub fn append_text(&mut self, s: &str) {
        self.text.push_str(s);
        self.text_map.clear();
    }

    /// Append a child after all existing content.
    pub fn append_child(&mut self, child: Element) {
        self.anchors.push(self.text.len());
        self.children.push(child);
    }

    /// Insert a child at `index`, splitting no text: the new child is
    /// preceded by what was text chunk `index`, with an empty chunk between
    /// it and the child that follows.
    ///
    /// # Panics
    ///
    /// Panics if `index > child_count()`.
    pub fn insert_child(&mut self, index: usize, child: Element) {
        let anchor = if index == self.children.len() {
            self.text.len()
        } else {
            self.anchors[index]
        };
        self.anchors.insert(index, anchor);
        self.children.insert(index, child);
    }

    /// Remove and return the child at `index`. No characters are removed,
    /// so the text chunks on either side of the child are joined.
    ///
    /// # Panics
    ///
    /// Panics if `index >= child_count()`.
    pub fn remove_child(&mut self, index: usize) -> Element {
        self.anchors.remove(index);
        self.children.remove(index)
    }

    /// Remove all content (text and children).
    pub fn clear_content(&mut self) {
        self.text.clear();
        self.children.clear();
        self.anchors.clear();
        self.text_map.clear();
    }

    /// Remove all text; children remain, their chunks all empty.
    pub fn clear_text(&mut self) {
        self.text.clear();
        for anchor in &mut self.anchors {
            *anchor = 0;
        }
        self.text_map.clear();
    }

    /// Iterate the interleaved content: chunk 0, child 0, chunk 1, ...
    /// Always yields `2 * child_count() + 1` items.
    pub fn content(&self) -> Content<'_> {
        Content {
            element: self,
            next: 0,
        }
    }

    /// Source span of the start-tag (or empty-element tag), when parsed.
    pub fn start_tag_span(&self) -> Option<Span> {
        self.start_tag
    }

    /// Source span of the end-tag, when parsed. Absent for elements written
    /// with an empty-element tag or closed by recovery.
    pub fn end_tag_span(&self) -> Option<Span> {
        self.end_tag
    }

    /// Source span that produced bytes `[start, end)` of text chunk
    /// `chunk`, accurate through character references, collapsed line
    /// endings, and skipped comments. `None` when this element carries no
    /// source information.
    ///
    /// # Panics
    ///
    /// Panics if `chunk` or the byte range is out of bounds.
    pub fn text_location(&self, chunk: usize, start: usize, end: usize) -> Option<Span> {
        let (chunk_start, chunk_end) = self.chunk_bounds(chunk);
        assert!(
            start <= end && end <= chunk_end - chunk_start,
            "text range {start}..{end} out of bounds for chunk {chunk}"
        );
        let base_offset = if chunk == 0 {
            self.start_tag?.end
        } else {
            self.children[chunk - 1].source_close_end()?
        };
        Some(self.text_map.locate(
            chunk_start + start,
            chunk_start + end,
            chunk_start,
            base_offset,
        ))
    }

    /// Source offset just past this element's closing tag, whichever form
    /// it took.
    fn source_close_end(&self) -> Option<usize> {
        match self.end_tag {
            Some(span) => Some(span.end),
            None => self.start_tag.map(|span| span.end),
        }
    }

    fn chunk_bounds(&self, chunk: usize) -> (usize, usize) {
        assert!(
            chunk <= self.children.len(),
            "chunk index {chunk} out of bounds"
        );
        let start = if chunk == 0 { 0 } else { self.anchors[chunk - 1] };
        let end = if chunk == self.children.len() {
            self.text.len()
        } else {
            self.anchors[chunk]
        };
        (start, end)
    }

    // Parser hooks. These maintain the text map; the public mutation API
    // above drops it instead.

    pub(crate) fn push_data(&mut self, ch: char, src_pos: usize, src_len: usize) {
        if src_len != ch.len_utf8() {
            self.text_map
                .push_ref(self.text.len(), ch.len_utf8(), src_pos, src_len);
        }
        self.text.push(ch);
    }

    pub(crate) fn note_markup_skip(&mut self, span: Span) {
        self.text_map
            .push_skip(self.text.len(), span.start, span.len());
    }

    pub(crate) fn set_start_tag_open(&mut self, pos: usize) {
        self.start_tag = Some(Span::empty_at(pos));
    }

    pub(crate) fn set_start_tag_close(&mut self, end: usize) {
        if let Some(span) = &mut self.start_tag {
            span.end = end.max(span.start);
        }
    }

    pub(crate) fn set_end_tag(&mut self, span: Span) {
        self.end_tag = Some(span);
    }
}

impl PartialEq for Element {
    /// Structural equivalence: name, attributes (as a set), and interleaved
    /// content. Source metadata is ignored.
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name
            || self.attributes != other.attributes
            || self.children.len() != other.children.len()
        {
            return false;
        }
        for chunk in 0..self.text_chunk_count() {
            if self.text(chunk) != other.text(chunk) {
                return false;
            }
        }
        self.children == other.children
    }
}

impl Eq for Element {}

/// Iterator over an element's interleaved content.
#[derive(Clone, Debug)]
pub struct Content<'a> {
    element: &'a Element,
    next: usize,
}

impl<'a> Iterator for Content<'a> {
    type Item = ContentItem<'a>;

    fn next(&mut self) -> Option<ContentItem<'a>> {
        let step = self.next;
        if step > 2 * self.element.children.len() {
            return None;
        }
        self.next += 1;
        if step % 2 == 0 {
            Some(ContentItem::Text(self.element.text(step / 2)))
        } else {
            Some(ContentItem::Child(&self.element.children[step / 2]))
        }
    }
}
