//! The lexical stage: classifies input bytes and drives a [`TokenSink`].
//!
//! The tokenizer is an explicit mode machine (see [`modes`]) with one extra
//! ingredient: a speculative markup cursor. A `<` or `&` starts a scan past
//! `markup_cursor` that either *commits* (tokens are emitted and the main
//! cursor jumps forward) or *gives up*, in which case the scanned bytes are
//! re-emitted as literal data and a diagnostic is reported. Tokens are never
//! retracted, so the sink can rely on the abstract-token stream shape
//! documented on [`TokenSink`].
//!
//! Invariants:
//! - Any byte sequence is consumed to completion; every pass through a mode
//!   either consumes input or switches to a mode that does.
//! - Source positions handed to the sink are non-decreasing.
//! - Each line break is recorded in the line map exactly once, no matter how
//!   often recovery re-scans the surrounding bytes.
//! - No diagnostic is reported twice for the same byte: speculative scans
//!   stay silent, and forbidden code points are reported wherever the bytes
//!   are finally consumed as data.

use crate::shared::{ErrorKind, LineMap, Span, TokenSink};

use chars::{classify, is_forbidden, MarkupClass};
use modes::Mode;

pub(crate) mod chars;
mod modes;


/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub tags_opened: u64,
    pub errors_reported: u64,
    pub give_ups: u64,
}

/// One classified code point consumed by the speculative scanner.
struct Markup {
    class: MarkupClass,
    ch: char,
    pos: usize,
}

/// Outcome of a speculative markup scan.
enum Scan {
    Committed,
    GaveUp,
}

/// The tokenizer. Bound to one input string, one line map, and one sink for
/// its lifetime; [`Tokenizer::run`] drives the whole input through the sink.
pub struct Tokenizer<'a, S: TokenSink> {
    text: &'a str,
    /// Next byte to consume in data context.
    cursor: usize,
    /// Speculative scan cursor; meaningful only inside a markup attempt.
    markup_cursor: usize,
    mode: Mode,
    /// Source start of the comment being skipped (includes `<!--`).
    comment_start: usize,
    /// Source start of the committed start-tag, for EOF diagnostics.
    tag_open: usize,
    /// Set when `Tag` mode was entered directly after a closing quote.
    space_before_attr_required: bool,
    line_map: &'a mut LineMap,
    sink: &'a mut S,
    stats: TokenizerStats,
}

impl<'a, S: TokenSink> Tokenizer<'a, S> {
    pub fn new(text: &'a str, line_map: &'a mut LineMap, sink: &'a mut S) -> Self {
        Self {
            text,
            cursor: 0,
            markup_cursor: 0,
            mode: Mode::Main,
            comment_start: 0,
            tag_open: 0,
            space_before_attr_required: false,
            line_map,
            sink,
            stats: TokenizerStats::default(),
        }
    }

    /// Consume the whole input, ending with `sink.end()`.
    pub fn run(&mut self) -> Result<(), S::Error> {
        if self.text.starts_with('\u{FEFF}') {
            self.cursor = '\u{FEFF}'.len_utf8();
        }
        loop {
            match self.mode {
                Mode::Main => {
                    if !self.step_main()? {
                        break;
                    }
                }
                Mode::Tag => self.step_tag()?,
                Mode::StartAttributeValue => self.step_start_attribute_value()?,
                Mode::SingleQuoteAttributeValue => self.step_attribute_value_quoted('\'')?,
                Mode::DoubleQuoteAttributeValue => self.step_attribute_value_quoted('"')?,
                Mode::UnquotedAttributeValue => self.step_attribute_value_unquoted()?,
                Mode::Comment => self.step_comment()?,
            }
        }
        self.sink.end(self.text.len())
    }

    /// Instrumentation counters accumulated so far.
    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    fn step_main(&mut self) -> Result<bool, S::Error> {
        match self.peek() {
            None => Ok(false),
            Some('<') => {
                self.parse_lt()?;
                Ok(true)
            }
            Some('&') => {
                self.parse_char_ref()?;
                Ok(true)
            }
            Some(_) => {
                self.parse_text()?;
                Ok(true)
            }
        }
    }

    /// A run of ordinary data, up to the next `<`, `&`, or end of input.
    fn parse_text(&mut self) -> Result<(), S::Error> {
        loop {
            let Some(ch) = self.peek() else {
                return Ok(());
            };
            match ch {
                '<' | '&' => return Ok(()),
                '>' => {
                    let pos = self.cursor;
                    self.report(Span::new(pos, pos + 1), ErrorKind::UnescapedGt)?;
                    self.consume_data_char(true)?;
                }
                _ => self.consume_data_char(true)?,
            }
        }
    }

    fn parse_lt(&mut self) -> Result<(), S::Error> {
        debug_assert_eq!(self.peek(), Some('<'));
        let lt = self.cursor;
        self.markup_cursor = lt + 1;
        let scan = match self.markup() {
            Some(m) if m.class.is_name_start() => self.scan_start_tag()?,
            Some(m) if m.class == MarkupClass::Slash => self.scan_end_tag()?,
            Some(m) if m.class == MarkupClass::Bang => self.scan_comment_open()?,
            _ => Scan::GaveUp,
        };
        if let Scan::GaveUp = scan {
            self.give_up(lt, ErrorKind::UnescapedLt)?;
        }
        Ok(())
    }

    /// Speculative start-tag scan. The first name character has already been
    /// consumed. Commits at `>`, `/>`, or the `=` of the first attribute;
    /// any earlier trouble re-interprets the whole range as data.
    fn scan_start_tag(&mut self) -> Result<Scan, S::Error> {
        let text = self.text;
        let lt = self.cursor;
        let name_start = lt + 1;
        let mut m = loop {
            let Some(m) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            if !m.class.is_name_char() {
                break m;
            }
        };
        let name_end = m.pos;
        while m.class.is_whitespace() {
            let Some(next) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            m = next;
        }
        match m.class {
            MarkupClass::Gt => {
                self.open_start_tag(lt, name_start, name_end)?;
                self.sink.start_tag_close(m.pos)?;
                self.cursor = self.markup_cursor;
                Ok(Scan::Committed)
            }
            MarkupClass::Slash => {
                let Some(gt) = self.markup() else {
                    return Ok(Scan::GaveUp);
                };
                if gt.class != MarkupClass::Gt {
                    return Ok(Scan::GaveUp);
                }
                self.open_start_tag(lt, name_start, name_end)?;
                self.sink.empty_element_tag_close(m.pos)?;
                self.cursor = self.markup_cursor;
                Ok(Scan::Committed)
            }
            c if c.is_name_start() => {
                let attr_start = m.pos;
                let mut after = loop {
                    let Some(next) = self.markup() else {
                        return Ok(Scan::GaveUp);
                    };
                    if !next.class.is_name_char() {
                        break next;
                    }
                };
                let attr_end = after.pos;
                while after.class.is_whitespace() {
                    let Some(next) = self.markup() else {
                        return Ok(Scan::GaveUp);
                    };
                    after = next;
                }
                if after.class != MarkupClass::Equals {
                    return Ok(Scan::GaveUp);
                }
                self.open_start_tag(lt, name_start, name_end)?;
                self.sink
                    .attribute_name(attr_start, &text[attr_start..attr_end])?;
                self.cursor = self.markup_cursor;
                self.set_mode(Mode::StartAttributeValue);
                Ok(Scan::Committed)
            }
            _ => Ok(Scan::GaveUp),
        }
    }

    fn open_start_tag(
        &mut self,
        lt: usize,
        name_start: usize,
        name_end: usize,
    ) -> Result<(), S::Error> {
        self.stats.tags_opened += 1;
        self.tag_open = lt;
        let text = self.text;
        self.sink.start_tag_open(lt, &text[name_start..name_end])
    }

    fn scan_end_tag(&mut self) -> Result<Scan, S::Error> {
        let text = self.text;
        let lt = self.cursor;
        let Some(first) = self.markup() else {
            return Ok(Scan::GaveUp);
        };
        if !first.class.is_name_start() {
            return Ok(Scan::GaveUp);
        }
        let name_start = first.pos;
        let mut m = loop {
            let Some(m) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            if !m.class.is_name_char() {
                break m;
            }
        };
        let name_end = m.pos;
        while m.class.is_whitespace() {
            let Some(next) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            m = next;
        }
        if m.class != MarkupClass::Gt {
            return Ok(Scan::GaveUp);
        }
        self.sink
            .end_tag(Span::new(lt, self.markup_cursor), &text[name_start..name_end])?;
        self.cursor = self.markup_cursor;
        Ok(Scan::Committed)
    }

    fn scan_comment_open(&mut self) -> Result<Scan, S::Error> {
        for _ in 0..2 {
            let Some(m) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            if m.class != MarkupClass::Minus {
                return Ok(Scan::GaveUp);
            }
        }
        self.comment_start = self.cursor;
        self.cursor = self.markup_cursor;
        self.set_mode(Mode::Comment);
        Ok(Scan::Committed)
    }

    fn step_comment(&mut self) -> Result<(), S::Error> {
        let mut dashes = 0usize;
        loop {
            let Some(ch) = self.peek() else {
                let span = Span::new(self.comment_start, self.text.len());
                self.report(span, ErrorKind::UnterminatedComment)?;
                self.sink.markup_skipped(span)?;
                self.set_mode(Mode::Main);
                return Ok(());
            };
            match ch {
                '-' => {
                    dashes += 1;
                    self.cursor += 1;
                }
                '>' if dashes >= 2 => {
                    self.cursor += 1;
                    if dashes > 2 {
                        let run_start = self.cursor - 1 - dashes;
                        self.report(
                            Span::new(run_start, run_start + 2),
                            ErrorKind::DoubleMinusInComment,
                        )?;
                    }
                    let span = Span::new(self.comment_start, self.cursor);
                    self.sink.markup_skipped(span)?;
                    self.set_mode(Mode::Main);
                    return Ok(());
                }
                _ => {
                    if dashes >= 2 {
                        let run_start = self.cursor - dashes;
                        self.report(
                            Span::new(run_start, run_start + 2),
                            ErrorKind::DoubleMinusInComment,
                        )?;
                    }
                    dashes = 0;
                    if is_forbidden(ch) {
                        let len = ch.len_utf8();
                        self.report(
                            Span::new(self.cursor, self.cursor + len),
                            ErrorKind::InvalidCodePoint,
                        )?;
                        self.cursor += len;
                    } else {
                        // Discarded, but line breaks still count.
                        match ch {
                            '\n' => {
                                self.cursor += 1;
                                self.line_map.note_line_start(self.cursor);
                            }
                            '\r' => {
                                if self.peek_at(self.cursor + 1) == Some('\n') {
                                    self.cursor += 2;
                                } else {
                                    self.cursor += 1;
                                }
                                self.line_map.note_line_start(self.cursor);
                            }
                            _ => self.cursor += ch.len_utf8(),
                        }
                    }
                }
            }
        }
    }

    fn step_start_attribute_value(&mut self) -> Result<(), S::Error> {
        loop {
            let Some(ch) = self.peek() else {
                return self.eof_in_tag();
            };
            match ch {
                c if classify(c).is_whitespace() => self.consume_markup_ws_char(),
                '"' => {
                    self.cursor += 1;
                    self.set_mode(Mode::DoubleQuoteAttributeValue);
                    return Ok(());
                }
                '\'' => {
                    self.cursor += 1;
                    self.set_mode(Mode::SingleQuoteAttributeValue);
                    return Ok(());
                }
                _ => {
                    self.set_mode(Mode::UnquotedAttributeValue);
                    return Ok(());
                }
            }
        }
    }

    fn step_attribute_value_quoted(&mut self, quote: char) -> Result<(), S::Error> {
        loop {
            let Some(ch) = self.peek() else {
                self.report(Span::empty_at(self.text.len()), ErrorKind::MissingQuote)?;
                self.synth_start_tag_close()?;
                self.set_mode(Mode::Main);
                return Ok(());
            };
            if ch == quote {
                self.cursor += 1;
                self.space_before_attr_required = true;
                self.set_mode(Mode::Tag);
                return Ok(());
            }
            match ch {
                '&' => self.parse_char_ref()?,
                '<' => {
                    let pos = self.cursor;
                    self.report(Span::new(pos, pos + 1), ErrorKind::UnescapedLt)?;
                    self.consume_data_char(true)?;
                }
                '>' => {
                    let pos = self.cursor;
                    self.report(Span::new(pos, pos + 1), ErrorKind::UnescapedGt)?;
                    self.consume_data_char(true)?;
                }
                _ => self.consume_data_char(true)?,
            }
        }
    }

    fn step_attribute_value_unquoted(&mut self) -> Result<(), S::Error> {
        loop {
            let Some(ch) = self.peek() else {
                return self.eof_in_tag();
            };
            match ch {
                c if classify(c).is_whitespace() => {
                    self.space_before_attr_required = false;
                    self.set_mode(Mode::Tag);
                    return Ok(());
                }
                '>' => {
                    let pos = self.cursor;
                    self.cursor += 1;
                    self.sink.start_tag_close(pos)?;
                    self.set_mode(Mode::Main);
                    return Ok(());
                }
                '/' if self.peek_at(self.cursor + 1) == Some('>') => {
                    let pos = self.cursor;
                    self.cursor += 2;
                    self.sink.empty_element_tag_close(pos)?;
                    self.set_mode(Mode::Main);
                    return Ok(());
                }
                '&' => self.parse_char_ref()?,
                '<' => {
                    let pos = self.cursor;
                    self.report(Span::new(pos, pos + 1), ErrorKind::UnescapedLt)?;
                    self.consume_data_char(true)?;
                }
                _ => self.consume_data_char(true)?,
            }
        }
    }

    fn step_tag(&mut self) -> Result<(), S::Error> {
        let mut had_space = false;
        let ch = loop {
            match self.peek() {
                None => return self.eof_in_tag(),
                Some(c) if classify(c).is_whitespace() => {
                    self.consume_markup_ws_char();
                    had_space = true;
                }
                Some(c) => break c,
            }
        };
        match classify(ch) {
            MarkupClass::Gt => {
                let pos = self.cursor;
                self.cursor += 1;
                self.sink.start_tag_close(pos)?;
                self.set_mode(Mode::Main);
                Ok(())
            }
            MarkupClass::Slash if self.peek_at(self.cursor + 1) == Some('>') => {
                let pos = self.cursor;
                self.cursor += 2;
                self.sink.empty_element_tag_close(pos)?;
                self.set_mode(Mode::Main);
                Ok(())
            }
            c if c.is_name_start() => {
                if !had_space && self.space_before_attr_required {
                    self.report(
                        Span::new(self.cursor, self.cursor + ch.len_utf8()),
                        ErrorKind::SpaceRequiredBeforeAttributeName,
                    )?;
                }
                self.space_before_attr_required = false;
                self.scan_next_attribute()
            }
            _ => {
                // Stray byte in tag context; classified consumption keeps
                // the line map straight, then the tag is closed and the
                // byte becomes content.
                self.markup_cursor = self.cursor;
                let break_span = match self.markup() {
                    Some(m) => Span::new(m.pos, self.markup_cursor),
                    None => Span::empty_at(self.cursor),
                };
                self.tag_failure(break_span)
            }
        }
    }

    /// Scan `name ws* =` after the first attribute. The tag is already
    /// committed, so failure closes it instead of giving the `<` back.
    fn scan_next_attribute(&mut self) -> Result<(), S::Error> {
        let text = self.text;
        self.markup_cursor = self.cursor;
        let Some(first) = self.markup() else {
            debug_assert!(false, "attribute scan entered at end of input");
            return Ok(());
        };
        debug_assert!(first.class.is_name_start());
        let name_start = first.pos;
        let mut m = loop {
            let Some(m) = self.markup() else {
                return self.tag_failure_eof();
            };
            if !m.class.is_name_char() {
                break m;
            }
        };
        let name_end = m.pos;
        while m.class.is_whitespace() {
            let Some(next) = self.markup() else {
                return self.tag_failure_eof();
            };
            m = next;
        }
        if m.class != MarkupClass::Equals {
            return self.tag_failure(Span::new(m.pos, self.markup_cursor));
        }
        self.sink
            .attribute_name(name_start, &text[name_start..name_end])?;
        self.cursor = self.markup_cursor;
        self.set_mode(Mode::StartAttributeValue);
        Ok(())
    }

    /// Post-commit recovery: report, close the tag, and re-emit the scanned
    /// bytes as element content.
    fn tag_failure(&mut self, break_span: Span) -> Result<(), S::Error> {
        self.stats.give_ups += 1;
        self.back_up_markup(self.cursor);
        #[cfg(any(test, feature = "trace"))]
        log::trace!(
            target: "minml.tokenizer",
            "tag failure: closing tag, reparsing {}..{} as data",
            self.cursor,
            self.markup_cursor
        );
        self.report(break_span, ErrorKind::MissingQuote)?;
        self.synth_start_tag_close()?;
        self.set_mode(Mode::Main);
        self.reparse_as_text()
    }

    fn tag_failure_eof(&mut self) -> Result<(), S::Error> {
        self.report(
            Span::new(self.tag_open, self.text.len()),
            ErrorKind::EofInStartTag,
        )?;
        self.synth_start_tag_close()?;
        self.set_mode(Mode::Main);
        self.reparse_as_text()
    }

    fn eof_in_tag(&mut self) -> Result<(), S::Error> {
        self.report(
            Span::new(self.tag_open, self.text.len()),
            ErrorKind::EofInStartTag,
        )?;
        self.synth_start_tag_close()?;
        self.set_mode(Mode::Main);
        Ok(())
    }

    /// Synthesize the close of a committed start-tag that has no `>`. The
    /// position of the last consumed byte keeps the builder's content
    /// boundary at the cursor.
    fn synth_start_tag_close(&mut self) -> Result<(), S::Error> {
        self.sink.start_tag_close(self.cursor.saturating_sub(1))
    }

    fn parse_char_ref(&mut self) -> Result<(), S::Error> {
        debug_assert_eq!(self.peek(), Some('&'));
        let amp = self.cursor;
        self.markup_cursor = amp + 1;
        if let Scan::GaveUp = self.scan_char_ref(amp)? {
            // Only the `&` becomes data; the bytes after it are rescanned.
            self.stats.give_ups += 1;
            self.report(Span::new(amp, amp + 1), ErrorKind::UnescapedAmp)?;
            self.sink.data_char(amp, 1, '&')?;
            self.cursor = amp + 1;
        }
        Ok(())
    }

    fn scan_char_ref(&mut self, amp: usize) -> Result<Scan, S::Error> {
        let text = self.text;
        let Some(first) = self.markup() else {
            return Ok(Scan::GaveUp);
        };
        if first.class == MarkupClass::Hash {
            return self.scan_numeric_char_ref(amp);
        }
        if !first.class.is_name_start() {
            return Ok(Scan::GaveUp);
        }
        let name_start = first.pos;
        let m = loop {
            let Some(m) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            if !m.class.is_name_char() {
                break m;
            }
        };
        if m.class != MarkupClass::Semi {
            return Ok(Scan::GaveUp);
        }
        let name_end = m.pos;
        let ch = match lookup_char_name(&text[name_start..name_end]) {
            Some(ch) => ch,
            None => {
                self.report(Span::new(name_start, name_end), ErrorKind::UnknownCharName)?;
                '\u{FFFD}'
            }
        };
        self.sink.data_char(amp, self.markup_cursor - amp, ch)?;
        self.cursor = self.markup_cursor;
        Ok(Scan::Committed)
    }

    fn scan_numeric_char_ref(&mut self, amp: usize) -> Result<Scan, S::Error> {
        let Some(x) = self.markup() else {
            return Ok(Scan::GaveUp);
        };
        if x.ch != 'x' {
            return Ok(Scan::GaveUp);
        }
        let mut value: u32 = 0;
        let mut digits = 0usize;
        let semi = loop {
            let Some(m) = self.markup() else {
                return Ok(Scan::GaveUp);
            };
            if m.ch == ';' {
                if digits == 0 {
                    return Ok(Scan::GaveUp);
                }
                break m.pos;
            }
            let Some(weight) = m.ch.to_digit(16) else {
                return Ok(Scan::GaveUp);
            };
            digits += 1;
            // Once past the maximum code point the exact value no longer
            // matters, only that it is too big.
            if value <= char::MAX as u32 {
                value = value * 16 + weight;
            }
        };
        let digits_span = Span::new(amp + 3, semi);
        let ch = if value > char::MAX as u32 {
            self.report(digits_span, ErrorKind::RefCodePointTooBig)?;
            '\u{FFFD}'
        } else {
            match char::from_u32(value) {
                None => {
                    self.report(digits_span, ErrorKind::IsolatedSurrogate)?;
                    '\u{FFFD}'
                }
                Some(c) if is_forbidden(c) => {
                    self.report(digits_span, ErrorKind::ForbiddenCodePointRef)?;
                    '\u{FFFD}'
                }
                Some(c) => c,
            }
        };
        self.sink.data_char(amp, self.markup_cursor - amp, ch)?;
        self.cursor = self.markup_cursor;
        Ok(Scan::Committed)
    }

    fn give_up(&mut self, at: usize, kind: ErrorKind) -> Result<(), S::Error> {
        self.stats.give_ups += 1;
        self.back_up_markup(at + 1);
        #[cfg(any(test, feature = "trace"))]
        log::trace!(
            target: "minml.tokenizer",
            "give up: reparsing {}..{} as data",
            at,
            self.markup_cursor
        );
        self.report(Span::new(at, at + 1), kind)?;
        self.reparse_as_text()
    }

    /// Re-emit `[cursor, markup_cursor)` as literal data. Line starts in the
    /// range were recorded during the markup scan; forbidden code points
    /// were not yet reported and are handled here.
    fn reparse_as_text(&mut self) -> Result<(), S::Error> {
        while self.cursor < self.markup_cursor {
            self.consume_data_char(false)?;
        }
        debug_assert_eq!(self.cursor, self.markup_cursor);
        Ok(())
    }

    /// Never back up past arbitrary bytes (that could produce a double
    /// diagnostic); only the delimiters that must be re-examined.
    fn back_up_markup(&mut self, floor: usize) {
        if self.markup_cursor > floor {
            if let Some(b'<' | b'>' | b'&') = self.text.as_bytes().get(self.markup_cursor - 1) {
                self.markup_cursor -= 1;
            }
        }
    }

    /// Consume one classified code point at the speculative cursor,
    /// recording line starts as they are discovered.
    fn markup(&mut self) -> Option<Markup> {
        let rest = self.text.get(self.markup_cursor..)?;
        let ch = rest.chars().next()?;
        let pos = self.markup_cursor;
        self.markup_cursor = pos + ch.len_utf8();
        match ch {
            '\n' => self.line_map.note_line_start(self.markup_cursor),
            '\r' => {
                if self.peek_at(self.markup_cursor) != Some('\n') {
                    self.line_map.note_line_start(self.markup_cursor);
                }
            }
            _ => {}
        }
        Some(Markup {
            class: classify(ch),
            ch,
            pos,
        })
    }

    /// Emit one data character with line normalization, forbidden-code-point
    /// replacement, and line-start bookkeeping.
    fn consume_data_char(&mut self, note_lines: bool) -> Result<(), S::Error> {
        let pos = self.cursor;
        let Some(ch) = self.peek() else {
            debug_assert!(false, "consume_data_char at end of input");
            return Ok(());
        };
        match ch {
            '\n' => {
                self.cursor += 1;
                if note_lines {
                    self.line_map.note_line_start(self.cursor);
                }
                self.sink.data_char(pos, 1, '\n')
            }
            '\r' => {
                let src_len = if self.peek_at(pos + 1) == Some('\n') { 2 } else { 1 };
                self.cursor += src_len;
                if note_lines {
                    self.line_map.note_line_start(self.cursor);
                }
                self.sink.data_char(pos, src_len, '\n')
            }
            c if is_forbidden(c) => {
                let len = c.len_utf8();
                self.report(Span::new(pos, pos + len), ErrorKind::InvalidCodePoint)?;
                self.cursor += len;
                self.sink.data_char(pos, len, '\u{FFFD}')
            }
            c => {
                let len = c.len_utf8();
                self.cursor += len;
                self.sink.data_char(pos, len, c)
            }
        }
    }

    /// Consume one whitespace code point in markup context (no data is
    /// emitted, but line breaks still count).
    fn consume_markup_ws_char(&mut self) {
        match self.peek() {
            Some('\n') => {
                self.cursor += 1;
                self.line_map.note_line_start(self.cursor);
            }
            Some('\r') => {
                if self.peek_at(self.cursor + 1) == Some('\n') {
                    self.cursor += 2;
                } else {
                    self.cursor += 1;
                }
                self.line_map.note_line_start(self.cursor);
            }
            Some(c) => self.cursor += c.len_utf8(),
            None => {}
        }
    }

    fn report(&mut self, span: Span, kind: ErrorKind) -> Result<(), S::Error> {
        self.stats.errors_reported += 1;
        #[cfg(any(test, feature = "trace"))]
        log::trace!(
            target: "minml.tokenizer",
            "error {kind:?} at {}..{}",
            span.start,
            span.end
        );
        self.sink.error(span, kind)
    }

    fn set_mode(&mut self, mode: Mode) {
        #[cfg(any(test, feature = "trace"))]
        {
            if self.mode != mode {
                log::trace!(
                    target: "minml.tokenizer",
                    "mode {:?} -> {:?} @{}",
                    self.mode,
                    mode,
                    self.cursor
                );
            }
        }
        self.mode = mode;
    }

    fn peek(&self) -> Option<char> {
        self.text.get(self.cursor..)?.chars().next()
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }
}

fn lookup_char_name(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}
