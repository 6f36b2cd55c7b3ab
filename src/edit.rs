//! Text-edit application over original source bytes.
//!
//! All functions work on strings and byte offsets with no file I/O. Edits are
//! validated to be non-overlapping and applied in reverse order, so every
//! untouched byte of the input survives verbatim in the output. This is what
//! makes the "lines without violations are byte-for-byte unchanged" invariant
//! hold by construction.

use thiserror::Error;

/// Error type for edit application.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("overlapping edits at byte {0}")]
    Overlapping(usize),

    #[error("edit range [{start}..{end}) exceeds source length {source_len}")]
    OutOfBounds {
        start: usize,
        end: usize,
        source_len: usize,
    },

    #[error("edit start {start} is after edit end {end}")]
    Inverted { start: usize, end: usize },
}

/// A single insertion or replacement, in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    /// Starting byte offset (inclusive).
    pub start_byte: usize,
    /// Ending byte offset (exclusive). Equal to `start_byte` for insertions.
    pub end_byte: usize,
    /// Text inserted in place of the range.
    pub text: String,
}

impl SourceEdit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            start_byte: offset,
            end_byte: offset,
            text: text.into(),
        }
    }

    pub fn replace(start_byte: usize, end_byte: usize, text: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            text: text.into(),
        }
    }

    /// Two ranges [a, b) and [c, d) overlap if a < d && c < b.
    pub fn overlaps(&self, other: &SourceEdit) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    fn validate(&self, source_len: usize) -> Result<(), EditError> {
        if self.start_byte > self.end_byte {
            return Err(EditError::Inverted {
                start: self.start_byte,
                end: self.end_byte,
            });
        }
        if self.end_byte > source_len {
            return Err(EditError::OutOfBounds {
                start: self.start_byte,
                end: self.end_byte,
                source_len,
            });
        }
        Ok(())
    }
}

/// Apply a set of non-overlapping edits to source text.
///
/// Edits are sorted by start offset in descending order before application so
/// earlier offsets stay valid while later ranges are rewritten.
pub fn apply_edits(source: &str, edits: &[SourceEdit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    for edit in edits {
        edit.validate(source.len())?;
    }
    for i in 0..edits.len() {
        for j in (i + 1)..edits.len() {
            if edits[i].overlaps(&edits[j]) {
                return Err(EditError::Overlapping(edits[i].start_byte));
            }
        }
    }

    let mut sorted = edits.to_vec();
    sorted.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

    let mut result = source.to_string();
    for edit in sorted {
        result.replace_range(edit.start_byte..edit.end_byte, &edit.text);
    }

    Ok(result)
}

/// Byte offsets of line starts, for row/offset conversions.
///
/// Rows are 0-based throughout; violation lines from the linter are 1-based
/// and converted at the anchor-resolution boundary.
#[derive(Debug)]
pub struct LineIndex {
    starts: Vec<usize>,
    source_len: usize,
    newlines: usize,
    crlf: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        let mut newlines = 0;
        let mut crlf = 0;
        let bytes = source.as_bytes();
        for (idx, byte) in bytes.iter().enumerate() {
            if *byte == b'\n' {
                starts.push(idx + 1);
                newlines += 1;
                if idx > 0 && bytes[idx - 1] == b'\r' {
                    crlf += 1;
                }
            }
        }
        Self {
            starts,
            source_len: source.len(),
            newlines,
            crlf,
        }
    }

    /// Dominant line terminator of the source; `"\n"` on a tie or when the
    /// source has no newlines.
    pub fn line_ending(&self) -> &'static str {
        if self.crlf * 2 > self.newlines {
            "\r\n"
        } else {
            "\n"
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte offset of the first character of `row`.
    pub fn line_start(&self, row: usize) -> usize {
        self.starts[row]
    }

    /// Text of `row` without its line terminator.
    pub fn line_text<'s>(&self, source: &'s str, row: usize) -> &'s str {
        let start = self.starts[row];
        let end = match self.starts.get(row + 1) {
            Some(next) => next - 1,
            None => self.source_len,
        };
        source[start..end].strip_suffix('\r').unwrap_or(&source[start..end])
    }

    /// Leading whitespace of `row`.
    pub fn indent<'s>(&self, source: &'s str, row: usize) -> &'s str {
        let text = self.line_text(source, row);
        let content = text.trim_start();
        &text[..text.len() - content.len()]
    }
}
