//! Defines the configuration of a conversion run.
//! A `Config` is assembled once through `Config::builder()` and read by every block conversion.

use crate::errors::UsageError;
use crate::options::{InputFormat, OutputFormat, Statistics};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    // replaces the "@id" key of every document
    pub namespace: Option<String>,
    // stripped from the start of keys when minimizing
    pub prefix: Option<Regex>,
    pub statistics: Statistics,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Input: {} ({})", self.input.display(), self.input_format);
        println!("  Output: {} ({})", self.output.display(), self.output_format);
        if let Some(namespace) = &self.namespace {
            println!("  Namespace: {}", namespace);
        }
        if let Some(prefix) = &self.prefix {
            println!("  Prefix: {}", prefix.as_str());
        }
        println!("  Statistics: {}", self.statistics.is_reported());
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    triples: bool,
    quads: bool,
    minimize: bool,
    namespace: Option<String>,
    prefix: Option<String>,
    silent: bool,
    require_input_exists: bool,
}

impl ConfigBuilder {
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Explicit N-Triples selection; ignores the file extension.
    pub fn triples(mut self, triples: bool) -> Self {
        self.triples = triples;
        self
    }

    /// Explicit N-Quads selection; ignores the file extension.
    pub fn quads(mut self, quads: bool) -> Self {
        self.quads = quads;
        self
    }

    pub fn minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    /// Sets the replacement name for "@id". Turns on minimization.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self.minimize = true;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Fail in `build()` when the input file is missing.
    pub fn require_input_exists(mut self, require: bool) -> Self {
        self.require_input_exists = require;
        self
    }

    pub fn build(self) -> Result<Config> {
        let (input, output) = match (self.input, self.output) {
            (Some(input), Some(output)) => (input, output),
            _ => return Err(UsageError::MissingRequired.into()),
        };

        let input_format = match (self.triples, self.quads) {
            (true, true) => return Err(UsageError::ConflictingFormats.into()),
            (true, false) => InputFormat::NTriples,
            (false, true) => InputFormat::NQuads,
            (false, false) => InputFormat::from_path(&input)
                .ok_or_else(|| UsageError::UndeterminedFormat {
                    input: input.clone(),
                })?,
        };

        if self.require_input_exists && !input.exists() {
            return Err(UsageError::InputNotFound { input }.into());
        }

        // the prefix is a pattern that has to match at the start of a key
        let prefix = self
            .prefix
            .map(|p| {
                Regex::new(&format!("^(?:{})", p))
                    .with_context(|| format!("Invalid --prefix pattern: {}", p))
            })
            .transpose()?;

        Ok(Config {
            input,
            output,
            input_format,
            output_format: OutputFormat::from(self.minimize),
            namespace: self.namespace,
            prefix,
            statistics: Statistics::from(self.silent),
        })
    }
}
