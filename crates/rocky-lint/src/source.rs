//! Compiler-visible source text with line lookups.
//!
//! Offsets handed out by the TypeScript compiler count UTF-16 code units, so
//! the line table is kept in those units alongside the matching byte offsets.

/// One-based line and character of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAndCharacter {
    /// One-based line number
    pub line: usize,
    /// One-based character within the line (UTF-16 code units)
    pub character: usize,
}

/// Text of one file as the compiler saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    file_name: String,
    text: String,
    /// Line starts in UTF-16 code units
    line_starts: Vec<usize>,
    /// Line starts in bytes, parallel to `line_starts`
    byte_starts: Vec<usize>,
    utf16_len: usize,
}

const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl SourceFile {
    /// Create a source file and index its lines
    #[must_use]
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        let mut byte_starts = vec![0];
        let mut utf16_pos = 0;

        let mut chars = text.char_indices().peekable();
        while let Some((byte_pos, c)) = chars.next() {
            utf16_pos += c.len_utf16();
            if !is_line_break(c) {
                continue;
            }
            let mut next_byte = byte_pos + c.len_utf8();
            if c == '\r' {
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                    utf16_pos += 1;
                    next_byte += 1;
                }
            }
            line_starts.push(utf16_pos);
            byte_starts.push(next_byte);
        }

        Self {
            file_name: file_name.into(),
            text,
            line_starts,
            byte_starts,
            utf16_len: utf16_pos,
        }
    }

    /// File name as reported by the compiler
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines (a trailing line break opens an empty last line)
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Map a zero-based UTF-16 offset to a one-based line and character.
    ///
    /// Offsets past the end of the text clamp to the end.
    #[must_use]
    pub fn line_and_character(&self, offset: usize) -> LineAndCharacter {
        let offset = offset.min(self.utf16_len);
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineAndCharacter {
            line: index + 1,
            character: offset - self.line_starts[index] + 1,
        }
    }

    /// Text of a one-based line without its terminator
    #[must_use]
    pub fn line_excerpt(&self, line: usize) -> &str {
        let Some(&start) = line.checked_sub(1).and_then(|i| self.byte_starts.get(i)) else {
            return "";
        };
        let rest = &self.text[start..];
        rest.find(is_line_break).map_or(rest, |end| &rest[..end])
    }
}
