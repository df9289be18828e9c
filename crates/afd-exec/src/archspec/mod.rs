//! Production [`CpuProber`] backed by the `archspec` command line tool.
//!
//! Vendor, family and model come from `/proc/cpuinfo`; the
//! microarchitecture name comes from `archspec cpu`, run as a child
//! process with a timeout.
mod config;
pub use config::ArchspecConfig;

use std::{io, process::Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use afd_core::{CpuProber, ProbeError};
use afd_model::CpuRecord;

use crate::{ExecError, cpuinfo::read_cpuinfo};

/// Probes the host CPU through `/proc/cpuinfo` and `archspec cpu`.
#[derive(Debug, Clone)]
pub struct ArchspecProber {
    config: ArchspecConfig,
}

impl ArchspecProber {
    /// Create a prober with the default `archspec cpu` invocation.
    pub fn new() -> Self {
        Self {
            config: ArchspecConfig::default(),
        }
    }

    /// Create a prober with an explicit configuration.
    pub fn with_config(config: ArchspecConfig) -> Result<Self, ExecError> {
        config.validate()?;
        config.trace_state();
        Ok(Self { config })
    }

    /// Run the configured command and return its trimmed, single-line output.
    async fn microarch(&self) -> Result<String, ProbeError> {
        let cfg = &self.config;
        let command = cfg.command_line();
        trace!(command = %command, "spawning archspec");

        let mut cmd = Command::new(&cfg.command);
        cmd.args(&cfg.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ProbeError::NotInstalled {
                command: cfg.command.clone(),
            },
            _ => ProbeError::Spawn {
                command: command.clone(),
                source: e,
            },
        })?;

        let output = match tokio::time::timeout(cfg.timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(|e| ProbeError::Spawn {
                command: command.clone(),
                source: e,
            })?,
            Err(_) => {
                debug!(command = %command, "archspec timed out; child killed");
                return Err(ProbeError::Timeout {
                    command,
                    timeout_ms: cfg.timeout_ms(),
                });
            }
        };

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(ProbeError::NonZeroExit { command, status });
        }
        parse_microarch(&output.stdout).map_err(|reason| ProbeError::MalformedOutput {
            command,
            reason: reason.to_string(),
        })
    }
}

impl Default for ArchspecProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CpuProber for ArchspecProber {
    fn name(&self) -> &'static str {
        "archspec"
    }

    async fn probe(&self) -> Result<CpuRecord, ProbeError> {
        let id = read_cpuinfo(&self.config.cpuinfo_path).await?;
        let target = self.microarch().await?;
        debug!(
            vendor = %id.vendor,
            family = id.family,
            model = id.model,
            microarch = %target,
            "cpu probed"
        );

        Ok(CpuRecord::new(id.vendor, id.family, id.model, target)?)
    }
}

/// Accepts exactly one non-empty line, surrounding whitespace ignored.
fn parse_microarch(stdout: &[u8]) -> Result<String, &'static str> {
    let text = std::str::from_utf8(stdout).map_err(|_| "output is not valid utf-8")?;
    let arch = text.trim();
    if arch.is_empty() {
        return Err("output is empty");
    }
    if arch.contains('\n') {
        return Err("expected a single line");
    }
    Ok(arch.to_string())
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use super::*;

    #[test]
    fn microarch_output_is_trimmed() {
        assert_eq!(parse_microarch(b"skylake\n").unwrap(), "skylake");
        assert_eq!(parse_microarch(b"  zen3  \r\n").unwrap(), "zen3");
    }

    #[test]
    fn microarch_output_rejects_garbage() {
        assert!(parse_microarch(b"").is_err());
        assert!(parse_microarch(b" \n").is_err());
        assert!(parse_microarch(b"skylake\nicelake\n").is_err());
        assert!(parse_microarch(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn with_config_validates() {
        let cfg = ArchspecConfig {
            command: String::new(),
            ..Default::default()
        };
        assert!(ArchspecProber::with_config(cfg).is_err());
    }

    #[cfg(unix)]
    mod process {
        use super::*;

        fn fixture(dir: &tempfile::TempDir, command: &str, args: &[&str]) -> ArchspecProber {
            let cpuinfo: PathBuf = dir.path().join("cpuinfo");
            std::fs::write(
                &cpuinfo,
                "processor\t: 0\nvendor_id\t: GenuineIntel\ncpu family\t: 6\nmodel\t\t: 142\n",
            )
            .unwrap();

            ArchspecProber::with_config(ArchspecConfig {
                command: command.into(),
                args: args.iter().map(|s| s.to_string()).collect(),
                timeout: Duration::from_secs(5),
                cpuinfo_path: cpuinfo,
            })
            .unwrap()
        }

        #[tokio::test]
        async fn builds_record_from_cpuinfo_and_command_output() {
            let dir = tempfile::tempdir().unwrap();
            let cpu = fixture(&dir, "echo", &["skylake"]).probe().await.unwrap();

            assert_eq!(cpu, CpuRecord::new("GenuineIntel", 6, 142, "skylake").unwrap());
        }

        #[tokio::test]
        async fn missing_executable_is_not_installed() {
            let dir = tempfile::tempdir().unwrap();
            let err = fixture(&dir, "afd-no-such-archspec", &["cpu"])
                .probe()
                .await
                .unwrap_err();

            assert!(matches!(err, ProbeError::NotInstalled { .. }), "{err}");
        }

        #[tokio::test]
        async fn non_zero_exit_is_reported() {
            let dir = tempfile::tempdir().unwrap();
            let err = fixture(&dir, "sh", &["-c", "exit 3"]).probe().await.unwrap_err();

            match err {
                ProbeError::NonZeroExit { status, .. } => assert_eq!(status, "exit code 3"),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn empty_output_is_malformed() {
            let dir = tempfile::tempdir().unwrap();
            let err = fixture(&dir, "true", &[]).probe().await.unwrap_err();

            assert!(matches!(err, ProbeError::MalformedOutput { .. }), "{err}");
        }

        #[tokio::test]
        async fn slow_command_times_out() {
            let dir = tempfile::tempdir().unwrap();
            let mut prober = fixture(&dir, "sleep", &["5"]);
            prober.config.timeout = Duration::from_millis(50);

            let err = prober.probe().await.unwrap_err();
            assert!(matches!(err, ProbeError::Timeout { timeout_ms: 50, .. }), "{err}");
        }

        #[tokio::test]
        async fn cpuinfo_failure_skips_command() {
            let dir = tempfile::tempdir().unwrap();
            let mut prober = fixture(&dir, "afd-no-such-archspec", &[]);
            prober.config.cpuinfo_path = dir.path().join("missing");

            let err = prober.probe().await.unwrap_err();
            assert!(matches!(err, ProbeError::CpuInfo { .. }), "{err}");
        }
    }
}
