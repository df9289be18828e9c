use std::{fmt, path::PathBuf, time::Duration};

use tracing::trace;

use crate::{ExecError, cpuinfo::CPUINFO_PATH};

/// Settings of [`super::ArchspecProber`].
#[derive(Debug, Clone)]
pub struct ArchspecConfig {
    /// Executable resolved through `PATH` (e.g. `"archspec"`).
    pub command: String,
    /// Arguments making the command print the host microarchitecture.
    pub args: Vec<String>,
    /// Upper bound for one invocation.
    pub timeout: Duration,
    /// Source of vendor, family and model.
    pub cpuinfo_path: PathBuf,
}

impl Default for ArchspecConfig {
    fn default() -> Self {
        Self {
            command: "archspec".to_string(),
            args: vec!["cpu".to_string()],
            timeout: Duration::from_secs(30),
            cpuinfo_path: PathBuf::from(CPUINFO_PATH),
        }
    }
}

impl ArchspecConfig {
    /// Validate before the first probe.
    ///
    /// Rules:
    /// - `command` is not empty or whitespace-only.
    /// - `timeout` is not zero.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.command.trim().is_empty() {
            return Err(ExecError::InvalidConfig("archspec command is empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(ExecError::InvalidConfig("probe timeout cannot be zero".into()));
        }
        Ok(())
    }

    /// Timeout in milliseconds, saturating at `u64::MAX`.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Emit a trace-level log with the resolved fields.
    pub fn trace_state(&self) {
        trace!(
            command = %self.command,
            args = ?self.args,
            timeout_ms = self.timeout_ms(),
            cpuinfo = %self.cpuinfo_path.display(),
            "archspec prober config resolved"
        );
    }

    /// Command line as typed in a shell, for error messages.
    pub(crate) fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

impl fmt::Display for ArchspecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArchspecConfig(cmd='{}', timeout={:?}, cpuinfo={})",
            self.command_line(),
            self.timeout,
            self.cpuinfo_path.display(),
        )
    }
}
