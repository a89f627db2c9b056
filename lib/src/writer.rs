//! Appends documents to the output, one compact JSON document per line.

use crate::consts::ID;
use crate::document::Document;
use anyhow::{Context, Result};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Moves the value of `@id` under `namespace`.
pub fn rename_identity(document: &mut Document, namespace: &str) {
    match document.remove(ID) {
        Some(id) => {
            document.insert(namespace.to_string(), id);
        }
        None => warn!("Document without {} key; namespace {} not applied", ID, namespace),
    }
}

pub struct DocumentWriter<W: Write> {
    sink: W,
    written: usize,
}

impl DocumentWriter<BufWriter<File>> {
    /// Opens `path` for appending, creating it when missing.
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.sink.write_all(line.as_bytes())?;
        self.sink.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        let line = serde_json::to_string(document)?;
        self.write_line(&line)
    }

    /// Number of lines appended so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and hands back the sink; nothing can be written afterwards.
    pub fn close(mut self) -> Result<W> {
        self.sink.flush().context("Failed to flush output")?;
        Ok(self.sink)
    }
}
