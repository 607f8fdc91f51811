//! Compiled-in source catalog and asset-class list.
//!
//! Only the credential values and each source's active flag come from the
//! environment; everything else here is fixed at build time.

use std::collections::{BTreeMap, HashSet};

use crate::env::Env;
use crate::error::ConfigParseError;

use super::types::{AssetClass, DataSourceSpec};

/// Static declaration of one data source.
#[derive(Debug, Clone, Copy)]
pub struct SourceDecl {
    pub key: &'static str,
    pub name: &'static str,
    pub base_url: &'static str,
    pub credential_env_var: &'static str,
    /// Boolean variable toggling the source; absent means active.
    pub active_env_var: &'static str,
    pub rate_limit_per_minute: u32,
}

pub const SOURCES: &[SourceDecl] = &[
    SourceDecl {
        key: "binance",
        name: "Binance",
        base_url: "https://api.binance.com",
        credential_env_var: "BINANCE_API_KEY",
        active_env_var: "BINANCE_ACTIVE",
        rate_limit_per_minute: 1200,
    },
    SourceDecl {
        key: "alpha_vantage",
        name: "Alpha Vantage",
        base_url: "https://www.alphavantage.co/query",
        credential_env_var: "ALPHA_VANTAGE_API_KEY",
        active_env_var: "ALPHA_VANTAGE_ACTIVE",
        rate_limit_per_minute: 5,
    },
    SourceDecl {
        key: "polygon",
        name: "Polygon.io",
        base_url: "https://api.polygon.io",
        credential_env_var: "POLYGON_API_KEY",
        active_env_var: "POLYGON_ACTIVE",
        rate_limit_per_minute: 5,
    },
];

pub const ASSET_CLASS_TAGS: &[&str] = &["cryptocurrency", "equity", "forex"];

/// The static inputs to one configuration build.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    pub sources: &'a [SourceDecl],
    pub asset_class_tags: &'a [&'a str],
}

impl Catalog<'static> {
    pub const BUILTIN: Self = Self {
        sources: SOURCES,
        asset_class_tags: ASSET_CLASS_TAGS,
    };
}

/// Build the key → spec map. Duplicate keys and malformed declarations are
/// reported and left out; for duplicates the first one wins.
pub fn build_sources(
    decls: &[SourceDecl],
    env: &Env,
) -> Result<(BTreeMap<String, DataSourceSpec>, Vec<String>), ConfigParseError> {
    let mut sources = BTreeMap::new();
    let mut violations = Vec::new();

    for decl in decls {
        if sources.contains_key(decl.key) {
            violations.push(format!("duplicate data source key '{}'", decl.key));
            continue;
        }
        let spec = DataSourceSpec::new(
            decl.name,
            decl.base_url,
            decl.credential_env_var,
            decl.rate_limit_per_minute,
            env.resolve_bool(decl.active_env_var, true)?,
        );
        match spec {
            Ok(spec) => {
                sources.insert(decl.key.to_string(), spec);
            }
            Err(e) => violations.extend(
                e.violations
                    .into_iter()
                    .map(|v| format!("data source '{}': {v}", decl.key)),
            ),
        }
    }

    Ok((sources, violations))
}

/// Parse the asset-class tags in order. Unknown, duplicate, or missing tags
/// become violations instead of entries.
pub fn build_asset_classes(tags: &[&str]) -> (Vec<AssetClass>, Vec<String>) {
    let mut classes = Vec::with_capacity(tags.len());
    let mut seen = HashSet::new();
    let mut violations = Vec::new();

    for tag in tags {
        match tag.parse::<AssetClass>() {
            Ok(class) if !seen.insert(class) => {
                violations.push(format!("duplicate asset class '{class}'"));
            }
            Ok(class) => classes.push(class),
            Err(e) => violations.push(e.to_string()),
        }
    }

    if tags.is_empty() {
        violations.push("supported asset classes must not be empty".to_string());
    }

    (classes, violations)
}
