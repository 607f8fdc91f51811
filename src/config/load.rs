//! Configuration assembly.
//!
//! Resolves scalar settings, builds the source catalog and asset-class list,
//! runs the validation pass, and only then hands out a `SystemConfiguration`.

use tracing::{debug, error};

use crate::env::Env;
use crate::error::AppError;

use super::catalog::{Catalog, build_asset_classes, build_sources};
use super::raw::RawSettings;
use super::types::SystemConfiguration;
use super::validate::{Draft, validate};

/// Build and validate the configuration from `env` using the compiled-in catalog.
pub fn load(env: Env) -> Result<SystemConfiguration, AppError> {
    load_with_catalog(env, Catalog::BUILTIN)
}

/// Same as [`load`] with an explicit catalog.
///
/// A malformed value for a present variable fails immediately with
/// [`AppError::Parse`]. Semantic problems are collected and returned together
/// as [`AppError::Validation`] after being logged.
pub fn load_with_catalog(env: Env, catalog: Catalog<'_>) -> Result<SystemConfiguration, AppError> {
    let settings = RawSettings::resolve(&env)?;

    let (supported_asset_classes, mut catalog_violations) =
        build_asset_classes(catalog.asset_class_tags);
    let (data_sources, source_violations) = build_sources(catalog.sources, &env)?;
    catalog_violations.extend(source_violations);

    let outcome = validate(
        Draft {
            settings: &settings,
            data_sources: &data_sources,
            catalog_violations,
        },
        &env,
    );
    if let Err(e) = outcome {
        error!(violations = e.violations.len(), "{e}");
        return Err(e.into());
    }

    let config = SystemConfiguration {
        debug: settings.debug,
        system_name: format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        polling_interval_secs: settings.polling_interval.unsigned_abs(),
        max_retries: u32::try_from(settings.max_retries).unwrap_or(u32::MAX),
        retry_delay_secs: settings.retry_delay,
        opportunity_confidence_threshold: settings.confidence_threshold,
        anomaly_z_score_threshold: settings.z_score_threshold,
        supported_asset_classes,
        data_sources,
        credential_store_path: settings.credential_store_path.unwrap_or_default(),
        credential_store_project_id: settings.credential_store_project_id,
        env,
    };

    debug!(
        sources = config.data_sources.len(),
        active = config.active_sources().count(),
        "configuration validated"
    );

    Ok(config)
}
