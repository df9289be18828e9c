use std::path::PathBuf;

use afd_core::{ConfigError, LabelerConfig};
use afd_observe::LoggerConfig;

use crate::cli::{Cli, parse_duration};

/// Enables once-mode when set to `true` (any case).
pub const ENV_LABEL_ONCE: &str = "AFD_LABELONCE";
/// Overrides `--sleep-interval`.
pub const ENV_SLEEP_INTERVAL: &str = "AFD_SLEEP_INTERVAL";
/// Overrides `--output-file`.
pub const ENV_OUTPUT_FILE: &str = "AFD_OUTPUT_FILE";

/// Everything the daemon needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Conf {
    pub labeler: LabelerConfig,
    pub logger: LoggerConfig,
}

impl Conf {
    /// Merge parsed flags with environment overrides.
    ///
    /// Environment values win over flags. `env` is the variable lookup,
    /// `|k| std::env::var(k).ok()` in production.
    pub fn from_cli<F>(cli: Cli, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut label_once = cli.label_once;
        let mut sleep_interval = cli.sleep_interval;
        let mut output_file = cli.output_file;

        if env(ENV_LABEL_ONCE).is_some_and(|v| v.trim().eq_ignore_ascii_case("true")) {
            label_once = true;
        }
        if let Some(value) = env(ENV_SLEEP_INTERVAL) {
            sleep_interval =
                parse_duration(&value).map_err(|e| ConfigError::InvalidDuration {
                    name: ENV_SLEEP_INTERVAL,
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(value) = env(ENV_OUTPUT_FILE) {
            output_file = PathBuf::from(value);
        }

        let labeler = LabelerConfig::new(output_file)?
            .with_label_once(label_once)
            .with_sleep_interval(sleep_interval);
        let logger = LoggerConfig {
            format: cli.log_format,
            level: cli.log_level,
            tz: cli.log_tz,
            ..Default::default()
        };
        Ok(Self { labeler, logger })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path, time::Duration};

    use clap::Parser;

    use super::*;
    use crate::cli::BIN;

    fn load(args: &[&str], vars: &[(&str, &str)]) -> Result<Conf, ConfigError> {
        let mut argv = vec![BIN];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Conf::from_cli(cli, |k| vars.get(k).cloned())
    }

    #[test]
    fn flags_without_env() {
        let conf = load(&["--labelonce", "-o", "/tmp/afd/features.d/afd"], &[]).unwrap();

        assert!(conf.labeler.label_once());
        assert_eq!(conf.labeler.output_path(), Path::new("/tmp/afd/features.d/afd"));
    }

    #[test]
    fn env_overrides_flags() {
        let conf = load(
            &["--sleep-interval", "10s", "-o", "/from/flag"],
            &[
                (ENV_SLEEP_INTERVAL, "2m"),
                (ENV_OUTPUT_FILE, "/from/env"),
                (ENV_LABEL_ONCE, "TRUE"),
            ],
        )
        .unwrap();

        assert!(conf.labeler.label_once());
        assert_eq!(conf.labeler.sleep_interval(), Duration::from_secs(120));
        assert_eq!(conf.labeler.output_path(), Path::new("/from/env"));
    }

    #[test]
    fn labelonce_env_only_enables() {
        let conf = load(&["--labelonce"], &[(ENV_LABEL_ONCE, "false")]).unwrap();
        assert!(conf.labeler.label_once());

        let conf = load(&[], &[(ENV_LABEL_ONCE, "yes")]).unwrap();
        assert!(!conf.labeler.label_once());
    }

    #[test]
    fn invalid_env_duration_is_a_config_error() {
        let err = load(&[], &[(ENV_SLEEP_INTERVAL, "often")]).unwrap_err();
        match err {
            ConfigError::InvalidDuration { name, value, .. } => {
                assert_eq!(name, ENV_SLEEP_INTERVAL);
                assert_eq!(value, "often");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_env_output_file_is_rejected() {
        let err = load(&[], &[(ENV_OUTPUT_FILE, "")]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyOutputPath));
    }

    #[test]
    fn logger_options_are_carried() {
        let conf = load(&["--log-format", "json", "--log-level", "debug"], &[]).unwrap();
        assert_eq!(conf.logger.format.to_string(), "json");
        assert_eq!(conf.logger.level.as_str(), "debug");
    }
}
