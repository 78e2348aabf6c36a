use std::path::PathBuf;

use crate::io::IoError;

/// A scope selector string that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty scope selector in {raw:?}")]
    Empty { raw: String },
    #[error("empty segment in scope selector {raw:?}")]
    EmptySegment { raw: String },
}

/// Failure while walking a single document.
///
/// Every variant ends the walk of that document only; blocks dispatched before
/// the failure keep their alerts.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("{}:{line}: malformed markup: {message}", .file.display())]
    Tokenizer {
        file: PathBuf,
        line: usize,
        message: String,
    },
    #[error("{}:{line}: failed to check block scoped {scope}", .file.display())]
    Dispatch {
        file: PathBuf,
        line: usize,
        scope: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Io(#[from] IoError),
}
