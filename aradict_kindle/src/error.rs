// Errors from reading input tables and writing the Kindle book.
//
// Every variant that touches the filesystem carries the path involved, and
// malformed table lines carry the file and 1-based line number, so the CLI
// can print a single self-explanatory message and exit.

use aradict_morph::MorphError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KindleError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of a morpheme, compatibility, or frequency table is malformed.
    #[error("{}:{line}: {message}", file.display())]
    Table {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Morph(#[from] MorphError),
}

impl KindleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KindleError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn table(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        KindleError::Table {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}
