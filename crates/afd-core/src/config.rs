use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::ConfigError;

/// Runtime configuration of the labeling loop.
///
/// Built once at startup and never mutated afterwards. The output path is
/// resolved to an absolute path on construction, so the loop is unaffected
/// by later changes of the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelerConfig {
    label_once: bool,
    output_path: PathBuf,
    sleep_interval: Duration,
}

impl LabelerConfig {
    /// Delay between two cycles unless configured otherwise.
    pub const DEFAULT_SLEEP_INTERVAL: Duration = Duration::from_secs(60);

    /// Feature file watched by node-feature-discovery's local source.
    pub const DEFAULT_OUTPUT_PATH: &'static str =
        "/etc/kubernetes/node-feature-discovery/features.d/afd";

    /// Create a periodic configuration publishing to `output_path`.
    pub fn new(output_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = output_path.as_ref();
        if raw.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        let output_path = std::path::absolute(raw).map_err(|source| ConfigError::ResolvePath {
            path: raw.to_path_buf(),
            source,
        })?;
        if output_path.file_name().is_none() || output_path.parent().is_none() {
            return Err(ConfigError::NoParent { path: output_path });
        }

        Ok(Self {
            label_once: false,
            output_path,
            sleep_interval: Self::DEFAULT_SLEEP_INTERVAL,
        })
    }

    /// Run exactly one cycle and stop.
    pub fn with_label_once(mut self, label_once: bool) -> Self {
        self.label_once = label_once;
        self
    }

    pub fn with_sleep_interval(mut self, interval: Duration) -> Self {
        self.sleep_interval = interval;
        self
    }

    pub fn label_once(&self) -> bool {
        self.label_once
    }

    /// Absolute path of the published file.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Delay between cycles. Meaningless in once-mode.
    pub fn sleep_interval(&self) -> Duration {
        self.sleep_interval
    }
}

impl fmt::Display for LabelerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LabelerConfig(label_once={}, output_path={}, sleep_interval={:?})",
            self.label_once,
            self.output_path.display(),
            self.sleep_interval,
        )
    }
}
