use std::{path::PathBuf, time::Duration};

use afd_core::LabelerConfig;
use afd_observe::{LoggerFormat, LoggerLevel, LoggerTimeZone};
use clap::Parser;

/// Binary name, also used in startup logs.
pub const BIN: &str = "archspec-feature-discovery";

/// Command line of the labeling daemon.
///
/// `AFD_LABELONCE`, `AFD_SLEEP_INTERVAL` and `AFD_OUTPUT_FILE` are not
/// declared here: they override the parsed values afterwards (see
/// [`crate::conf::Conf::from_cli`]).
#[derive(Debug, Parser)]
#[command(name = BIN, version, about = "Label the node with its CPU microarchitecture for node-feature-discovery")]
pub struct Cli {
    /// Only label once and exit.
    #[arg(long = "labelonce", conflicts_with = "sleep_interval")]
    pub label_once: bool,

    /// Time to sleep between labeling cycles (e.g. 60s, 5m, 1h30m).
    ///
    /// Fractional units such as `1.5h` are not accepted; write `1h30m`.
    #[arg(
        long = "sleep-interval",
        value_name = "DURATION",
        default_value = "60s",
        value_parser = parse_duration
    )]
    pub sleep_interval: Duration,

    /// Path to the output file.
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        default_value = LabelerConfig::DEFAULT_OUTPUT_PATH
    )]
    pub output_file: PathBuf,

    /// Log filter, e.g. "info" or "afd_core=debug,info".
    #[arg(long, value_name = "FILTER", env = "AFD_LOG_LEVEL", default_value = "info")]
    pub log_level: LoggerLevel,

    /// Log output format: text, json or journald.
    #[arg(long, value_name = "FORMAT", env = "AFD_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Timezone of log timestamps: utc or local.
    #[arg(long, value_name = "TZ", env = "AFD_LOG_TZ", default_value = "utc")]
    pub log_tz: LoggerTimeZone,
}

/// Humantime durations, plus a bare `0`.
pub fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    match s.trim() {
        "0" => Ok(Duration::ZERO),
        other => humantime::parse_duration(other),
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, error::ErrorKind};

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from([BIN]).unwrap();

        assert!(!cli.label_once);
        assert_eq!(cli.sleep_interval, Duration::from_secs(60));
        assert_eq!(
            cli.output_file,
            PathBuf::from("/etc/kubernetes/node-feature-discovery/features.d/afd")
        );
        assert_eq!(cli.log_format, LoggerFormat::Text);
    }

    #[test]
    fn parses_all_core_flags() {
        let cli = Cli::try_parse_from([BIN, "--sleep-interval=1m30s", "-o", "/tmp/afd"]).unwrap();
        assert_eq!(cli.sleep_interval, Duration::from_secs(90));
        assert_eq!(cli.output_file, PathBuf::from("/tmp/afd"));

        let cli = Cli::try_parse_from([BIN, "--labelonce", "--output-file=/tmp/x"]).unwrap();
        assert!(cli.label_once);
        assert_eq!(cli.output_file, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn labelonce_conflicts_with_sleep_interval() {
        let err = Cli::try_parse_from([BIN, "--labelonce", "--sleep-interval", "10s"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn invalid_duration_is_rejected() {
        let err = Cli::try_parse_from([BIN, "--sleep-interval", "soon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn help_and_version_exit_early() {
        let help = Cli::try_parse_from([BIN, "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let version = Cli::try_parse_from([BIN, "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn duration_accepts_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn fractional_durations_are_rejected_and_documented() {
        assert!(parse_duration("1.5h").is_err());
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("1.5h"), "{help}");
    }
}
