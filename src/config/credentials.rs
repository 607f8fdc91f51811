//! Credential lookup and read-only catalog queries.

use tracing::warn;

use super::types::{DataSourceSpec, SystemConfiguration};

impl SystemConfiguration {
    /// Current credential for `source_key`.
    ///
    /// Unknown keys log a warning and return `None`. For a configuration
    /// built from the live process environment the variable is re-read on
    /// every call, so rotated secrets are picked up; a snapshot-backed
    /// configuration answers from its snapshot. Blank values are `None`.
    pub fn get_credential(&self, source_key: &str) -> Option<String> {
        let Some(spec) = self.data_sources.get(source_key) else {
            warn!(source = %source_key, "unknown data source");
            return None;
        };
        self.read_credential(spec)
    }

    pub fn data_source(&self, source_key: &str) -> Option<&DataSourceSpec> {
        self.data_sources.get(source_key)
    }

    /// Active sources in key order.
    pub fn active_sources(&self) -> impl Iterator<Item = (&str, &DataSourceSpec)> {
        self.data_sources
            .iter()
            .filter(|(_, spec)| spec.is_active())
            .map(|(key, spec)| (key.as_str(), spec))
    }

    pub fn has_credential(&self, source_key: &str) -> bool {
        self.data_sources
            .get(source_key)
            .and_then(|spec| self.read_credential(spec))
            .is_some()
    }

    /// Blank and unreadable values both count as absent.
    fn read_credential(&self, spec: &DataSourceSpec) -> Option<String> {
        match self.env.get(spec.credential_env_var()) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                warn!(source = %spec.name(), "{e}");
                None
            }
        }
    }
}
