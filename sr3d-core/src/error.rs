//! Error types for sr3d

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading geometry or driving a display
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed OBJ data on line {line} ({reason}): {content}")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("display error: {0}")]
    Display(#[from] std::io::Error),
}

/// Result type alias for sr3d operations
pub type Result<T> = std::result::Result<T, Error>;
