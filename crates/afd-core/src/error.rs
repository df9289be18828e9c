use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{probe::ProbeError, publish::PublishError};

/// Startup-time configuration failure. Fatal: the loop never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("output path is empty")]
    EmptyOutputPath,

    #[error("failed to resolve absolute path of {}: {source}", .path.display())]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output path {} has no parent directory", .path.display())]
    NoParent { path: PathBuf },

    #[error("invalid duration for {name}: {value:?} ({reason})")]
    InvalidDuration {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Failure of a single labeling cycle, or of the signal setup around the loop.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to retrieve cpu info: {0}")]
    Probe(#[from] ProbeError),

    #[error("failed to publish labels: {0}")]
    Publish(#[from] PublishError),

    #[error("failed to install handler for {signal}: {source}")]
    Signal {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}
