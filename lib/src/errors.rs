// Usage errors raised while assembling a conversion configuration

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// `--input` or `--output` was not given.
    MissingRequired,
    /// Both N-Triples and N-Quads were requested explicitly.
    ConflictingFormats,
    /// No explicit format and the input extension is neither `.nt` nor `.nq`.
    UndeterminedFormat { input: PathBuf },
    /// The input file does not exist.
    InputNotFound { input: PathBuf },
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UsageError::MissingRequired => {
                write!(f, "Requires --input and --output parameters.")
            }
            UsageError::ConflictingFormats => write!(
                f,
                "Both --triples and --quads parameters were used. Only one of the parameters \
                 may be provided for explicitly setting the input file format."
            ),
            UsageError::UndeterminedFormat { input } => write!(
                f,
                "Cannot determine input file format of {} by filename extension. Recognized \
                 extensions are .nt and .nq for N-Triples and N-Quads respectively. Use \
                 --triples or --quads to set the input format explicitly.",
                input.display()
            ),
            UsageError::InputNotFound { input } => write!(
                f,
                "Input file {} (--input parameter) does not seem to exist.",
                input.display()
            ),
        }
    }
}

impl std::error::Error for UsageError {}
