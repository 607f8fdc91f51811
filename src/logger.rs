//! Logging initialisation via tracing-subscriber.
//!
//! Settings are resolved from the same [`Env`] the configuration is built
//! from, so the logger can be up before any configuration problem is reported.
//! Events always go to stderr; a log file, when configured, receives a plain
//! copy of the same events. Call [`init`] once at startup.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::DEBUG_VAR;
use crate::env::Env;
use crate::error::{AppError, ConfigParseError};

pub const LOG_LEVEL_VAR: &str = "FEEDGATE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "FEEDGATE_LOG_DIR";

/// Logger settings taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// Directory for a timestamped log file; stderr only when `None`.
    pub log_dir: Option<PathBuf>,
    /// Unrecognised `FEEDGATE_LOG_LEVEL` value that was replaced by the default.
    pub rejected_level: Option<String>,
}

impl LogSettings {
    /// `FEEDGATE_LOG_LEVEL` wins when it names a level; otherwise `debug` when
    /// the debug flag is set, else `info`.
    pub fn from_env(env: &Env) -> Result<Self, ConfigParseError> {
        let fallback = if env.resolve_bool(DEBUG_VAR, false)? { "debug" } else { "info" };

        let (level, rejected_level) = match env.get(LOG_LEVEL_VAR)? {
            None => (fallback.to_string(), None),
            Some(raw) => match parse_level(raw.trim()) {
                Ok(_) => (raw.trim().to_ascii_lowercase(), None),
                Err(_) => (fallback.to_string(), Some(raw)),
            },
        };

        Ok(Self {
            level,
            log_dir: env.resolve_path(LOG_DIR_VAR)?,
            rejected_level,
        })
    }
}

/// Initialise the global tracing subscriber.
///
/// `level` accepts standard level strings: `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`.
///
/// If `prefer_level` is `true`, `level` takes precedence and `RUST_LOG` is only
/// used as a fallback when `level` is invalid. If `prefer_level` is `false`,
/// `RUST_LOG` takes precedence and `level` is the fallback.
///
/// With `log_file` set, events are written to stderr and appended to the file.
pub fn init(level: &str, prefer_level: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = if prefer_level {
        match EnvFilter::try_new(level) {
            Ok(filter) => filter,
            Err(level_err) => EnvFilter::try_from_default_env().map_err(|env_err| {
                AppError::Logger(format!(
                    "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
                ))
            })?,
        }
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))?
    };

    let file_layer = log_file
        .map(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::Logger(format!("failed to open log file '{}': {e}", path.display()))
                })
        })
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

/// Create `dir` if needed and return a fresh `feedgate_YYYYMMDD_HHMMSS.log`
/// path inside it.
pub fn log_file_path(dir: &Path) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::Logger(format!("cannot create log dir '{}': {e}", dir.display()))
    })?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Ok(dir.join(format!("feedgate_{stamp}.log")))
}

/// Parse a log level string into a [`LevelFilter`], returning an error on
/// unrecognised values.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn valid_levels_parse() {
        for l in &["error", "warn", "info", "debug", "trace"] {
            assert!(parse_level(l).is_ok(), "expected '{l}' to be valid");
        }
    }

    #[test]
    fn invalid_level_errors() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
        assert!(parse_level("INFO_LEVEL").is_err());
    }

    #[test]
    fn settings_default_to_info_on_stderr() {
        let s = LogSettings::from_env(&Env::snapshot([("UNRELATED", "x")])).unwrap();
        assert_eq!(s.level, "info");
        assert_eq!(s.log_dir, None);
        assert_eq!(s.rejected_level, None);
    }

    #[test]
    fn debug_flag_lowers_default_level() {
        let s = LogSettings::from_env(&Env::snapshot([(DEBUG_VAR, "true")])).unwrap();
        assert_eq!(s.level, "debug");
    }

    #[test]
    fn explicit_level_beats_debug_flag() {
        let s = LogSettings::from_env(&Env::snapshot([
            (DEBUG_VAR, "true"),
            (LOG_LEVEL_VAR, " WARN "),
            (LOG_DIR_VAR, "/var/log/feedgate"),
        ]))
        .unwrap();
        assert_eq!(s.level, "warn");
        assert_eq!(s.log_dir, Some(PathBuf::from("/var/log/feedgate")));
    }

    #[test]
    fn unrecognised_level_falls_back_and_is_kept() {
        let s = LogSettings::from_env(&Env::snapshot([(LOG_LEVEL_VAR, "verbose")])).unwrap();
        assert_eq!(s.level, "info");
        assert_eq!(s.rejected_level.as_deref(), Some("verbose"));

        let s = LogSettings::from_env(&Env::snapshot([
            (DEBUG_VAR, "true"),
            (LOG_LEVEL_VAR, "verbose"),
        ]))
        .unwrap();
        assert_eq!(s.level, "debug");
    }

    #[test]
    fn blank_log_dir_means_stderr_only() {
        let s = LogSettings::from_env(&Env::snapshot([(LOG_DIR_VAR, "  ")])).unwrap();
        assert_eq!(s.log_dir, None);
    }

    #[test]
    fn log_file_path_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("logs");
        let path = log_file_path(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(path.parent(), Some(dir.as_path()));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("feedgate_") && name.ends_with(".log"));
    }

    #[test]
    fn init_info_succeeds_or_already_init() {
        // May already be set by a prior test in the same process; both outcomes are fine.
        match init("info", false, None) {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
