//! Option types that replace boolean flag parameters in the Rust API.

use oxigraph::io::RdfFormat;
use std::fmt;
use std::path::Path;

/// Serialization of the statements in the input file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputFormat {
    /// One `subject predicate object .` statement per line.
    NTriples,
    /// One `subject predicate object [graph] .` statement per line.
    NQuads,
}

impl InputFormat {
    /// Guesses the format from a `.nt` or `.nq` file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("nt") => Some(InputFormat::NTriples),
            Some("nq") => Some(InputFormat::NQuads),
            _ => None,
        }
    }

    pub fn rdf_format(self) -> RdfFormat {
        match self {
            InputFormat::NTriples => RdfFormat::NTriples,
            InputFormat::NQuads => RdfFormat::NQuads,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::NTriples => write!(f, "N-Triples"),
            InputFormat::NQuads => write!(f, "N-Quads"),
        }
    }
}

/// Shape of the documents appended to the output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum OutputFormat {
    /// Expanded JSON-LD node objects, with value and reference wrappers.
    #[default]
    JsonLd,
    /// Plain JSON with wrappers collapsed and `@type` removed.
    Json,
}

impl OutputFormat {
    pub fn is_minimized(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl From<bool> for OutputFormat {
    fn from(minimize: bool) -> Self {
        if minimize {
            OutputFormat::Json
        } else {
            OutputFormat::JsonLd
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::JsonLd => write!(f, "JSON-LD"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Whether the end-of-run summary is printed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Statistics {
    #[default]
    Report,
    Silent,
}

impl Statistics {
    pub fn is_reported(self) -> bool {
        matches!(self, Statistics::Report)
    }
}

impl From<bool> for Statistics {
    fn from(silent: bool) -> Self {
        if silent {
            Statistics::Silent
        } else {
            Statistics::Report
        }
    }
}
