//! Configuration registry.
//!
//! Turns an [`Env`](crate::env::Env) into a validated, immutable
//! [`SystemConfiguration`], or fails with every problem found at once.
//!
//! # Module layout
//!
//! - **types** — `AssetClass`, `DataSourceSpec`, `SystemConfiguration`.
//! - **raw** — scalar settings as read from the environment, variable names
//!   and defaults.
//! - **catalog** — compiled-in source declarations and asset-class tags.
//! - **validate** — the aggregated validation pass.
//! - **load** — the construction algorithm: `load`, `load_with_catalog`.
//! - **credentials** — `get_credential` and other read-only lookups.

mod catalog;
mod credentials;
mod load;
mod raw;
mod types;
mod validate;

pub use catalog::{ASSET_CLASS_TAGS, Catalog, SOURCES, SourceDecl};
pub use load::{load, load_with_catalog};
pub use raw::{
    CONFIDENCE_THRESHOLD_VAR, CREDENTIALS_PATH_VAR, DEBUG_VAR, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_MAX_RETRIES, DEFAULT_POLLING_INTERVAL_SECS, DEFAULT_RETRY_DELAY_SECS,
    DEFAULT_Z_SCORE_THRESHOLD, MAX_RETRIES_VAR, POLLING_INTERVAL_VAR, PROJECT_ID_VAR,
    RETRY_DELAY_VAR, Z_SCORE_THRESHOLD_VAR,
};
pub use types::*;
