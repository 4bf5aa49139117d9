//! Mapping from source offsets to line and column numbers.

/// A line and column number. The first line is 1; the first column of a line
/// is 1. Lines are delimited by `\n`, `\r`, or `\r\n` only. The column number
/// of a position is one plus the number of bytes preceding it on its line,
/// which will not always match the column shown by a text editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePosition {
    pub line: usize,
    pub column: usize,
}

/// Records line starts as the tokenizer discovers them and answers
/// offset-to-(line, column) queries.
///
/// Invariant: recorded offsets are strictly increasing; each is the offset of
/// the first byte following a line terminator.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    url: Option<String>,
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            line_starts: Vec::new(),
        }
    }

    /// The source URL diagnostics should name, if one was provided.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Record the start of a new line.
    ///
    /// Called once per recognized line break, in monotonic order. A repeat of
    /// the most recent offset is ignored: the tokenizer may re-scan the tail
    /// of a failed markup construct, and the line break was already recorded
    /// on the first pass.
    pub fn note_line_start(&mut self, offset: usize) {
        if self.line_starts.last() == Some(&offset) {
            return;
        }
        debug_assert!(
            self.line_starts.last().map_or(true, |&last| last < offset),
            "line starts must be recorded in increasing order"
        );
        self.line_starts.push(offset);
    }

    /// Resolve an offset to its line and column.
    ///
    /// An offset equal to a recorded line start is column 1 of the new line.
    pub fn locate(&self, offset: usize) -> LinePosition {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = if line == 0 {
            0
        } else {
            self.line_starts[line - 1]
        };
        LinePosition {
            line: line + 1,
            column: offset - line_start + 1,
        }
    }
}
