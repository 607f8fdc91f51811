//! Public configuration types.
//!
//! Everything here is read-only once built. `SystemConfiguration` is only
//! produced by the registry in `load.rs`, after validation has passed.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::env::Env;
use crate::error::ConfigValidationError;

// ── Asset classes ───────────────────────────────────────────────────────────

/// Closed set of asset classes the ingestion side may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    #[serde(rename = "cryptocurrency")]
    Crypto,
    Equity,
    Forex,
    Commodity,
    Derivative,
}

impl AssetClass {
    pub const ALL: [Self; 5] = [
        Self::Crypto,
        Self::Equity,
        Self::Forex,
        Self::Commodity,
        Self::Derivative,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crypto => "cryptocurrency",
            Self::Equity => "equity",
            Self::Forex => "forex",
            Self::Commodity => "commodity",
            Self::Derivative => "derivative",
        }
    }
}

impl Display for AssetClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag that is not a member of [`AssetClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAssetClass(pub String);

impl Display for UnknownAssetClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let expected = AssetClass::ALL.map(AssetClass::as_str).join(", ");
        write!(f, "unrecognized asset class '{}', expected one of {expected}", self.0)
    }
}

impl FromStr for AssetClass {
    type Err = UnknownAssetClass;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cryptocurrency" => Ok(Self::Crypto),
            "equity" => Ok(Self::Equity),
            "forex" => Ok(Self::Forex),
            "commodity" => Ok(Self::Commodity),
            "derivative" => Ok(Self::Derivative),
            _ => Err(UnknownAssetClass(value.to_string())),
        }
    }
}

// ── Data sources ────────────────────────────────────────────────────────────

/// One external data source: where it lives, which variable holds its
/// secret, and how hard it may be called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceSpec {
    name: String,
    base_url: String,
    credential_env_var: String,
    rate_limit_per_minute: NonZeroU32,
    is_active: bool,
}

impl DataSourceSpec {
    /// Rejects an empty name, an empty credential variable, or a zero rate
    /// limit. Every broken rule is listed in the error.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        credential_env_var: impl Into<String>,
        rate_limit_per_minute: u32,
        is_active: bool,
    ) -> Result<Self, ConfigValidationError> {
        let name = name.into();
        let credential_env_var = credential_env_var.into();

        let mut violations = Vec::new();
        if name.trim().is_empty() {
            violations.push("name must not be empty".to_string());
        }
        if credential_env_var.trim().is_empty() {
            violations.push("credential variable must not be empty".to_string());
        }
        let rate = NonZeroU32::new(rate_limit_per_minute);
        if rate.is_none() {
            violations.push("rate limit must allow at least one call per minute".to_string());
        }

        match rate {
            Some(rate_limit_per_minute) if violations.is_empty() => Ok(Self {
                name,
                base_url: base_url.into(),
                credential_env_var,
                rate_limit_per_minute,
                is_active,
            }),
            _ => Err(ConfigValidationError { violations }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the environment variable holding this source's secret.
    pub fn credential_env_var(&self) -> &str {
        &self.credential_env_var
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute.get()
    }

    /// Inactive sources are exempt from credential validation.
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

// ── Aggregate ───────────────────────────────────────────────────────────────

/// Fully-resolved, validated configuration.
///
/// There are no mutators; share it behind an `Arc` and build a new one to
/// reload. Serializing it yields a status report that never includes
/// credential values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemConfiguration {
    pub(super) debug: bool,
    pub(super) system_name: String,
    pub(super) polling_interval_secs: u64,
    pub(super) max_retries: u32,
    pub(super) retry_delay_secs: f64,
    pub(super) opportunity_confidence_threshold: f64,
    pub(super) anomaly_z_score_threshold: f64,
    pub(super) supported_asset_classes: Vec<AssetClass>,
    pub(super) data_sources: BTreeMap<String, DataSourceSpec>,
    pub(super) credential_store_path: PathBuf,
    pub(super) credential_store_project_id: String,
    /// Environment the configuration was resolved from; credential lookups
    /// go back through it.
    #[serde(skip)]
    pub(super) env: Env,
}

impl SystemConfiguration {
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    pub fn polling_interval_secs(&self) -> u64 {
        self.polling_interval_secs
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_delay_secs(&self) -> f64 {
        self.retry_delay_secs
    }

    pub fn opportunity_confidence_threshold(&self) -> f64 {
        self.opportunity_confidence_threshold
    }

    pub fn anomaly_z_score_threshold(&self) -> f64 {
        self.anomaly_z_score_threshold
    }

    pub fn supported_asset_classes(&self) -> &[AssetClass] {
        &self.supported_asset_classes
    }

    pub fn data_sources(&self) -> &BTreeMap<String, DataSourceSpec> {
        &self.data_sources
    }

    pub fn credential_store_path(&self) -> &Path {
        &self.credential_store_path
    }

    pub fn credential_store_project_id(&self) -> &str {
        &self.credential_store_project_id
    }
}
