//! Raw scalar settings as read from the environment.
//!
//! Values here are typed but not range-checked; `validate` decides whether
//! they are usable and `load` converts them into the public types.

use std::path::PathBuf;

use crate::env::Env;
use crate::error::ConfigParseError;

pub const DEBUG_VAR: &str = "FEEDGATE_DEBUG";
pub const CREDENTIALS_PATH_VAR: &str = "FIREBASE_CREDENTIALS_PATH";
pub const PROJECT_ID_VAR: &str = "FIREBASE_PROJECT_ID";
pub const POLLING_INTERVAL_VAR: &str = "POLLING_INTERVAL";
pub const MAX_RETRIES_VAR: &str = "MAX_RETRIES";
pub const RETRY_DELAY_VAR: &str = "RETRY_DELAY";
pub const CONFIDENCE_THRESHOLD_VAR: &str = "OPPORTUNITY_CONFIDENCE_THRESHOLD";
pub const Z_SCORE_THRESHOLD_VAR: &str = "ANOMALY_Z_SCORE_THRESHOLD";

pub const DEFAULT_POLLING_INTERVAL_SECS: i64 = 300;
pub const DEFAULT_MAX_RETRIES: i64 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 2.0;
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;
pub const DEFAULT_Z_SCORE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct RawSettings {
    pub debug: bool,
    /// `~`-expanded; `None` when the variable is unset or blank.
    pub credential_store_path: Option<PathBuf>,
    pub credential_store_project_id: String,
    pub polling_interval: i64,
    pub max_retries: i64,
    pub retry_delay: f64,
    pub confidence_threshold: f64,
    pub z_score_threshold: f64,
}

impl RawSettings {
    /// Stops at the first malformed value; parse errors are not aggregated.
    pub fn resolve(env: &Env) -> Result<Self, ConfigParseError> {
        Ok(Self {
            debug: env.resolve_bool(DEBUG_VAR, false)?,
            credential_store_path: env.resolve_path(CREDENTIALS_PATH_VAR)?,
            credential_store_project_id: env.resolve_string(PROJECT_ID_VAR, "")?,
            polling_interval: env
                .resolve_int(POLLING_INTERVAL_VAR, DEFAULT_POLLING_INTERVAL_SECS)?,
            max_retries: env.resolve_int(MAX_RETRIES_VAR, DEFAULT_MAX_RETRIES)?,
            retry_delay: env.resolve_float(RETRY_DELAY_VAR, DEFAULT_RETRY_DELAY_SECS)?,
            confidence_threshold: env
                .resolve_float(CONFIDENCE_THRESHOLD_VAR, DEFAULT_CONFIDENCE_THRESHOLD)?,
            z_score_threshold: env
                .resolve_float(Z_SCORE_THRESHOLD_VAR, DEFAULT_Z_SCORE_THRESHOLD)?,
        })
    }
}
