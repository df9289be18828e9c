use std::{io, path::PathBuf};

use afd_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("'{command}' is not installed or not in PATH")]
    NotInstalled { command: String },

    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' did not finish within {timeout_ms} ms")]
    Timeout { command: String, timeout_ms: u64 },

    #[error("'{command}' exited unsuccessfully: {status}")]
    NonZeroExit { command: String, status: String },

    #[error("malformed output from '{command}': {reason}")]
    MalformedOutput { command: String, reason: String },

    #[error("failed to read cpu info from {}: {reason}", .path.display())]
    CpuInfo { path: PathBuf, reason: String },

    #[error("invalid cpu record: {0}")]
    Invalid(#[from] ModelError),
}
