use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Stage of a publication, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    CreateDir,
    CreateTemp,
    Write,
    Chmod,
    Close,
    Rename,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PublishStep::CreateDir => "create-dir",
            PublishStep::CreateTemp => "create-temp",
            PublishStep::Write => "write",
            PublishStep::Chmod => "chmod",
            PublishStep::Close => "close",
            PublishStep::Rename => "rename",
        };
        f.write_str(s)
    }
}

/// A publication step failed; the destination file is unchanged.
#[derive(Debug, Error)]
#[error("{step} failed for {}: {source}", .path.display())]
pub struct PublishError {
    step: PublishStep,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl PublishError {
    pub(crate) fn new(step: PublishStep, path: &Path, source: io::Error) -> Self {
        Self {
            step,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Step that failed.
    pub fn step(&self) -> PublishStep {
        self.step
    }

    /// Path the failing step operated on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Underlying I/O error kind.
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}
