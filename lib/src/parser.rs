//! Parses the text of one block into RDF statements.
//!
//! N-Triples and N-Quads are line-based, so every line is parsed on its own: a malformed
//! line counts as exactly one error and contributes no statement, and the lines after it
//! are still parsed. Graph names of N-Quads are dropped; all statements of a block end up
//! in one graph. The configured parser is built once and cloned for each line.

use crate::options::InputFormat;
use log::debug;
use oxigraph::io::RdfParser;
use oxigraph::model::{Graph, Triple};

/// Statements of one block, deduplicated, in the order they were first parsed.
#[derive(Debug, Default)]
pub struct StatementGraph {
    graph: Graph,
    ordered: Vec<Triple>,
}

impl StatementGraph {
    /// Inserts a triple; returns false if the graph already held it.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.graph.insert(&triple) {
            self.ordered.push(triple);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.ordered.iter()
    }
}

/// Result of parsing one block.
#[derive(Debug, Default)]
pub struct ParsedBlock {
    pub graph: StatementGraph,
    /// Every successfully parsed statement, duplicates included.
    pub statements: usize,
    pub errors: usize,
}

#[derive(Clone)]
pub struct StatementParser {
    format: InputFormat,
    parser: RdfParser,
}

impl StatementParser {
    pub fn new(format: InputFormat) -> Self {
        // relative IRIs such as <s1> are common in dumps, so IRIs are not validated
        let parser = RdfParser::from_format(format.rdf_format()).lenient();
        Self { format, parser }
    }

    pub fn parse_block(&self, block: &str) -> ParsedBlock {
        let mut parsed = ParsedBlock::default();
        for line in block.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match self.parse_line(line) {
                Ok(triples) => {
                    for triple in triples {
                        parsed.statements += 1;
                        parsed.graph.insert(triple);
                    }
                }
                Err(e) => {
                    debug!("Skipping malformed {} statement: {}", self.format, e);
                    parsed.errors += 1;
                }
            }
        }
        parsed
    }

    fn parse_line(&self, line: &str) -> Result<Vec<Triple>, oxigraph::io::RdfParseError> {
        let parser = self.parser.clone().for_reader(line.as_bytes());
        let mut triples = Vec::new();
        for quad in parser {
            let quad = quad?;
            triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
        }
        Ok(triples)
    }
}
