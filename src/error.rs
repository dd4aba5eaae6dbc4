// treenotes/src/error.rs

use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures that stop a tree render before any line is produced.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    RootNotDir(PathBuf),

    #[error("cannot list {}", .path.display())]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad exclude pattern `{pattern}`")]
    BadPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}
