use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Document;

/// Markdown extensions, scanned when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["md", "markdown", "mdown", "mkd", "mkdn"];

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid root: {0}")]
    InvalidRoot(String),
}

/// Read a document from disk
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(IoError::Io)?;
    Ok(Document::new(path, &source))
}

/// Collect the documents to lint under `root`, sorted.
///
/// A file given directly is returned as-is whatever its extension.
pub fn scan_documents<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, IoError> {
    if !root.exists() {
        return Err(IoError::InvalidRoot(format!(
            "{} does not exist",
            root.display()
        )));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extensions, files)?;
        } else if let Some(ext) = path.extension()
            && extensions.iter().any(|e| ext == e.as_ref())
        {
            files.push(path);
        }
    }

    Ok(())
}
