//! Splits a subject-sorted line stream into blocks of lines that share a subject.
//!
//! Grouping is purely textual: the subject key of a line is everything up to and
//! including its first `>`. No statement parsing happens here, so segmentation
//! cannot fail; lines without a `>` simply get a degenerate key of their own.

use std::borrow::Cow;

/// Returns the subject key of a line: the text before the first `>`, with `>` appended.
pub fn subject_key(line: &str) -> Cow<'_, str> {
    match line.find('>') {
        Some(end) => Cow::Borrowed(&line[..=end]),
        None => Cow::Owned(format!("{}>", line)),
    }
}

/// Contiguous lines sharing one subject key, joined with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub subject_key: String,
    pub text: String,
    pub lines: usize,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn push_line(&mut self, line: &str) {
        if self.lines > 0 {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.lines += 1;
    }
}

/// Accumulates lines and hands out a [`Block`] whenever the subject key changes.
#[derive(Debug, Default)]
pub struct BlockSegmenter {
    current: Option<Block>,
}

impl BlockSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line; returns the completed previous block when the line starts a new subject.
    pub fn push(&mut self, line: &str) -> Option<Block> {
        let key = subject_key(line);
        match self.current.as_mut() {
            Some(block) if block.subject_key == key => {
                block.push_line(line);
                None
            }
            _ => {
                let mut block = Block {
                    subject_key: key.into_owned(),
                    ..Block::default()
                };
                block.push_line(line);
                self.current.replace(block)
            }
        }
    }

    /// Flushes the remaining block. Empty when no line was ever pushed.
    pub fn finish(self) -> Block {
        self.current.unwrap_or_default()
    }
}
