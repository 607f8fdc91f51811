//! Aggregated validation pass.
//!
//! Every check runs; nothing short-circuits. The caller gets either `Ok(())`
//! or one error carrying all violations in check order.

use std::collections::BTreeMap;
use std::path::Path;

use crate::env::Env;
use crate::error::ConfigValidationError;

use super::raw::{
    CONFIDENCE_THRESHOLD_VAR, CREDENTIALS_PATH_VAR, MAX_RETRIES_VAR, POLLING_INTERVAL_VAR,
    PROJECT_ID_VAR, RETRY_DELAY_VAR, RawSettings, Z_SCORE_THRESHOLD_VAR,
};
use super::types::DataSourceSpec;

/// Inputs to one validation pass.
pub(super) struct Draft<'a> {
    pub settings: &'a RawSettings,
    pub data_sources: &'a BTreeMap<String, DataSourceSpec>,
    /// Problems already found while building the catalog.
    pub catalog_violations: Vec<String>,
}

pub(super) fn validate(draft: Draft<'_>, env: &Env) -> Result<(), ConfigValidationError> {
    let mut violations = draft.catalog_violations;

    violations.extend(check_scalars(draft.settings));
    violations.extend(check_credential_store(
        draft.settings.credential_store_path.as_deref(),
        &draft.settings.credential_store_project_id,
    ));
    violations.extend(check_credentials(draft.data_sources, env));

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigValidationError { violations })
    }
}

fn check_scalars(s: &RawSettings) -> Vec<String> {
    let mut out = Vec::new();
    if s.polling_interval <= 0 {
        out.push(format!(
            "{POLLING_INTERVAL_VAR} must be greater than 0 (got {})",
            s.polling_interval
        ));
    }
    if !(0..=i64::from(u32::MAX)).contains(&s.max_retries) {
        out.push(format!(
            "{MAX_RETRIES_VAR} must be between 0 and {} (got {})",
            u32::MAX,
            s.max_retries
        ));
    }
    if !s.retry_delay.is_finite() || s.retry_delay < 0.0 {
        out.push(format!("{RETRY_DELAY_VAR} must be 0 or greater (got {})", s.retry_delay));
    }
    if !(0.0..=1.0).contains(&s.confidence_threshold) {
        out.push(format!(
            "{CONFIDENCE_THRESHOLD_VAR} must be within 0.0..=1.0 (got {})",
            s.confidence_threshold
        ));
    }
    if !s.z_score_threshold.is_finite() || s.z_score_threshold <= 0.0 {
        out.push(format!(
            "{Z_SCORE_THRESHOLD_VAR} must be greater than 0 (got {})",
            s.z_score_threshold
        ));
    }
    out
}

fn check_credential_store(path: Option<&Path>, project_id: &str) -> Vec<String> {
    let mut out = Vec::new();
    match path {
        None => out.push(format!("{CREDENTIALS_PATH_VAR} environment variable not set")),
        Some(p) if !p.exists() => {
            out.push(format!("credential store file not found at {}", p.display()));
        }
        Some(_) => {}
    }
    if project_id.trim().is_empty() {
        out.push(format!("{PROJECT_ID_VAR} environment variable not set"));
    }
    out
}

/// One violation per active source whose credential is missing, blank, or
/// not valid UTF-8.
fn check_credentials(sources: &BTreeMap<String, DataSourceSpec>, env: &Env) -> Vec<String> {
    sources
        .iter()
        .filter(|(_, spec)| spec.is_active())
        .filter_map(|(key, spec)| {
            let var = spec.credential_env_var();
            match env.get(var) {
                Ok(Some(v)) if !v.trim().is_empty() => None,
                Ok(_) => Some(format!("API key for {key} ({var}) not found in environment")),
                Err(_) => Some(format!("API key for {key} ({var}) is not valid UTF-8")),
            }
        })
        .collect()
}
