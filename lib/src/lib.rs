//! rdf2json: streaming conversion of subject-sorted RDF N-Triples/N-Quads into
//! line-delimited JSON-LD or plain JSON.
//!
//! The input is read line by line and cut into blocks of lines that share the same
//! subject. Every block is parsed on its own and turned into one document per subject,
//! which is appended to the output as one line. The whole input is never held in memory,
//! which is why it has to be sorted by subject first, e.g. `sort -k 1,1 in.nt > sorted.nt`.
//!
//! ```no_run
//! use rdf2json::{Config, Converter};
//!
//! let config = Config::builder()
//!     .input("dump.nt")
//!     .output("dump.json")
//!     .namespace("id")
//!     .prefix("http://example.org/")
//!     .build()?;
//! let (outcome, _) = Converter::from_config(&config)?.convert()?;
//! println!("{} documents", outcome.stats().documents);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod consts;
pub mod converter;
pub mod document;
pub mod errors;
pub mod flatten;
pub mod normalize;
pub mod options;
pub mod parser;
pub mod segment;
pub mod writer;

pub use config::{Config, ConfigBuilder};
pub use converter::{
    CancellationToken, ConversionOptions, ConversionOutcome, ConversionStats, Converter,
};
pub use document::{Document, ExpandedJsonLd, GraphToDocument};
pub use errors::UsageError;
pub use flatten::Flattener;
pub use options::{InputFormat, OutputFormat, Statistics};
pub use writer::DocumentWriter;

/// Initializes logging configuration from environment variables.
///
/// This function checks for the `RDF2JSON_LOG` environment variable. If it is set,
/// `RUST_LOG` is set to its value. `RDF2JSON_LOG` takes precedence over `RUST_LOG`.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var(consts::LOG_ENV) {
        std::env::set_var("RUST_LOG", log_level);
    }
}
