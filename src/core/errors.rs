/*!
# Error System for WS Doc Parser

Errors raised at the invocation boundary. Parsing a document never fails:
missing anchors, titles, tables and unresolved references produce absent or
empty values instead. Only I/O, configuration and serialization problems
reach this type.
*/

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias for conversion operations
pub type DocResult<T> = Result<T, DocParseError>;

/// Conversion error taxonomy
#[derive(Error, Debug)]
pub enum DocParseError {
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize operation document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DocParseError {
    /// Wraps an I/O error, mapping `NotFound` on an input path to `FileNotFound`
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DocParseError::FileNotFound(path.to_path_buf())
        } else {
            DocParseError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wraps an I/O error raised while writing output
    pub fn from_write(path: &Path, source: io::Error) -> Self {
        DocParseError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DocParseError::FileNotFound(_))
    }
}
