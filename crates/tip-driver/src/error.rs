//! Top-level error aggregation and exit-code mapping (§6, §11).

use thiserror::Error;

use tip_syntax::ParseError;
use tip_ty::TypeError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("type analysis failed: {0}")]
    Type(#[from] TypeError),
}

impl CliError {
    /// Distinct non-zero exit codes per failure class, so callers can tell
    /// a parse failure from a type-analysis failure without scraping text.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io { .. } => 1,
            CliError::Parse(_) => 2,
            CliError::Type(_) => 3,
        }
    }
}
