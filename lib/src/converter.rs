//! Drives a conversion run: reads lines, segments them into subject blocks, converts each
//! block into documents and appends those to the output.

use crate::config::Config;
use crate::document::{ExpandedJsonLd, GraphToDocument};
use crate::flatten::Flattener;
use crate::normalize::normalize_block;
use crate::options::{InputFormat, OutputFormat, Statistics};
use crate::parser::StatementParser;
use crate::segment::BlockSegmenter;
use crate::writer::{rename_identity, DocumentWriter};
use anyhow::{Context, Result};
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::ops::AddAssign;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Counters of a conversion; per block or summed over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub lines: usize,
    pub statements: usize,
    pub parse_errors: usize,
    pub documents: usize,
}

impl AddAssign for ConversionStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.statements += other.statements;
        self.parse_errors += other.parse_errors;
        self.documents += other.documents;
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of lines read                   : {}", self.lines)?;
        writeln!(f, "Statement read errors (N-Quads or N-Triples) : {}", self.parse_errors)?;
        writeln!(f, "Statements captured                          : {}", self.statements)?;
        write!(f, "JSON/JSON-LD documents output                : {}", self.documents)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    Completed(ConversionStats),
    /// Stopped by a cancellation request; documents written so far stay in the output.
    Cancelled(ConversionStats),
}

impl ConversionOutcome {
    pub fn stats(&self) -> &ConversionStats {
        match self {
            ConversionOutcome::Completed(stats) | ConversionOutcome::Cancelled(stats) => stats,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConversionOutcome::Cancelled(_))
    }
}

/// Shared flag used to ask a running conversion to stop, e.g. from a Ctrl-C handler.
#[derive(Debug, Default, Clone)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-run settings read by every block conversion.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    pub namespace: Option<String>,
    pub flattener: Flattener,
    pub statistics: Statistics,
}

impl ConversionOptions {
    pub fn new(input_format: InputFormat) -> Self {
        Self {
            input_format,
            output_format: OutputFormat::JsonLd,
            namespace: None,
            flattener: Flattener::default(),
            statistics: Statistics::Silent,
        }
    }
}

impl From<&Config> for ConversionOptions {
    fn from(config: &Config) -> Self {
        Self {
            input_format: config.input_format,
            output_format: config.output_format,
            namespace: config.namespace.clone(),
            flattener: Flattener::new(config.prefix.clone()),
            statistics: config.statistics,
        }
    }
}

pub struct Converter<R: BufRead, W: Write> {
    input: R,
    writer: DocumentWriter<W>,
    parser: StatementParser,
    shaper: Box<dyn GraphToDocument>,
    options: ConversionOptions,
    cancellation: CancellationToken,
}

impl Converter<BufReader<File>, BufWriter<File>> {
    /// Opens the input for reading and the output for appending.
    pub fn from_config(config: &Config) -> Result<Self> {
        let input = File::open(&config.input)
            .with_context(|| format!("Failed to open input file {}", config.input.display()))?;
        let writer = DocumentWriter::append_to(&config.output)?;
        Ok(Self::new(
            BufReader::new(input),
            writer,
            ConversionOptions::from(config),
        ))
    }
}

impl<R: BufRead, W: Write> Converter<R, W> {
    pub fn new(input: R, writer: DocumentWriter<W>, options: ConversionOptions) -> Self {
        Self {
            input,
            writer,
            parser: StatementParser::new(options.input_format),
            shaper: Box::new(ExpandedJsonLd),
            options,
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the statements-to-documents step.
    pub fn with_shaper(mut self, shaper: Box<dyn GraphToDocument>) -> Self {
        self.shaper = shaper;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Converts the whole input and closes the output.
    ///
    /// Returns the output sink together with the outcome. A cancelled run flushes what was
    /// written so far and skips the summary.
    pub fn convert(mut self) -> Result<(ConversionOutcome, W)> {
        info!(
            "Converting {} to {}",
            self.options.input_format, self.options.output_format
        );
        let mut totals = ConversionStats::default();
        let mut segmenter = BlockSegmenter::new();
        let mut buf = Vec::new();

        loop {
            if self.cancellation.is_cancelled() {
                info!("Conversion cancelled after {} lines", totals.lines);
                debug!("{} documents written before cancellation", self.writer.written());
                let sink = self.writer.close()?;
                return Ok((ConversionOutcome::Cancelled(totals), sink));
            }
            buf.clear();
            let read = self
                .input
                .read_until(b'\n', &mut buf)
                .context("Failed to read input")?;
            if read == 0 {
                break;
            }
            totals.lines += 1;
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(block) = segmenter.push(line) {
                debug!("Flushing block {} ({} lines)", block.subject_key, block.lines);
                totals += self.write_graph(&block.text)?;
            }
        }
        totals += self.write_graph(&segmenter.finish().text)?;

        let written = self.writer.written();
        let sink = self.writer.close()?;
        info!("Conversion finished: {} documents written", written);
        if self.options.statistics.is_reported() {
            println!("{totals}");
        }
        Ok((ConversionOutcome::Completed(totals), sink))
    }

    /// Converts one block of same-subject lines and appends the resulting documents.
    ///
    /// Parse failures are counted in the returned stats; only output failures are errors.
    pub fn write_graph(&mut self, block: &str) -> Result<ConversionStats> {
        let mut stats = ConversionStats::default();
        if block.is_empty() {
            return Ok(stats);
        }

        let block = normalize_block(block);
        let parsed = self.parser.parse_block(&block);
        stats.statements = parsed.statements;
        stats.parse_errors = parsed.errors;
        if parsed.graph.is_empty() {
            return Ok(stats);
        }

        for mut document in self.shaper.documents(&parsed.graph) {
            if let Some(namespace) = &self.options.namespace {
                rename_identity(&mut document, namespace);
            }
            if self.options.output_format.is_minimized() {
                document = self.options.flattener.flatten(document);
            }
            self.writer.write_document(&document)?;
            stats.documents += 1;
        }
        Ok(stats)
    }
}
