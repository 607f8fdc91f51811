//! Environment resolution with typed accessors and explicit defaults.
//!
//! An [`Env`] is either backed by the live process environment (optionally
//! layered over a `.env`-style override file) or by an injected snapshot.
//! Nothing in here ever writes to the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, ConfigParseError};

/// Default override file, relative to the working directory.
pub const DEFAULT_OVERRIDE_FILE: &str = ".env";

/// The resolvable environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    /// Override-file pairs, or the whole snapshot when `inherit_process` is false.
    vars: HashMap<String, String>,
    /// Consult `std::env` first on every lookup.
    inherit_process: bool,
    /// Path of the override file actually loaded, if any.
    override_file: Option<PathBuf>,
}

impl Env {
    /// Live process environment layered over `override_path` when that file
    /// exists. Process variables win over file values.
    ///
    /// A missing file is fine; a file that exists but cannot be parsed is not.
    pub fn from_process(override_path: Option<&Path>) -> Result<Self, AppError> {
        let mut vars = HashMap::new();
        let mut override_file = None;

        if let Some(path) = override_path.filter(|p| p.exists()) {
            let iter = dotenvy::from_path_iter(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            for item in iter {
                let (key, value) = item.map_err(|e| {
                    AppError::Config(format!("parse error in {}: {e}", path.display()))
                })?;
                vars.insert(key, value);
            }
            override_file = Some(path.to_path_buf());
        }

        Ok(Self { vars, inherit_process: true, override_file })
    }

    /// Fixed mapping; the process environment is ignored.
    pub fn snapshot<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            inherit_process: false,
            override_file: None,
        }
    }

    /// `true` when lookups see the live process environment.
    pub fn is_live(&self) -> bool {
        self.inherit_process
    }

    /// The override file that was loaded, if one existed.
    pub fn override_file(&self) -> Option<&Path> {
        self.override_file.as_deref()
    }

    /// Raw lookup. Empty values are returned as-is; a process value that is
    /// not valid UTF-8 is an error rather than "absent".
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigParseError> {
        if self.inherit_process {
            if let Some(raw) = std::env::var_os(key) {
                return raw.into_string().map(Some).map_err(|raw| ConfigParseError {
                    key: key.to_string(),
                    value: raw.to_string_lossy().into_owned(),
                    expected: "UTF-8 string",
                });
            }
        }
        Ok(self.vars.get(key).cloned())
    }

    pub fn resolve_string(&self, key: &str, default: &str) -> Result<String, ConfigParseError> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Absent → `default`; present → `true` only for a case-insensitive `"true"`.
    pub fn resolve_bool(&self, key: &str, default: bool) -> Result<bool, ConfigParseError> {
        Ok(match self.get(key)? {
            Some(raw) => raw.trim().eq_ignore_ascii_case("true"),
            None => default,
        })
    }

    pub fn resolve_int(&self, key: &str, default: i64) -> Result<i64, ConfigParseError> {
        self.resolve_parsed(key, default, "integer")
    }

    pub fn resolve_float(&self, key: &str, default: f64) -> Result<f64, ConfigParseError> {
        self.resolve_parsed(key, default, "float")
    }

    /// Trimmed path with a leading `~` expanded; `None` when unset or blank.
    pub fn resolve_path(&self, key: &str) -> Result<Option<PathBuf>, ConfigParseError> {
        Ok(self
            .get(key)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| expand_home(raw.trim())))
    }

    fn resolve_parsed<T: std::str::FromStr>(
        &self,
        key: &str,
        default: T,
        expected: &'static str,
    ) -> Result<T, ConfigParseError> {
        let Some(raw) = self.get(key)? else {
            return Ok(default);
        };
        raw.trim().parse::<T>().map_err(|_| ConfigParseError {
            key: key.to_string(),
            value: raw,
            expected,
        })
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> Env {
        Env::snapshot(pairs.iter().copied())
    }

    #[test]
    fn string_falls_back_to_default() {
        let e = env(&[("PRESENT", "value")]);
        assert_eq!(e.resolve_string("PRESENT", "d").unwrap(), "value");
        assert_eq!(e.resolve_string("ABSENT", "d").unwrap(), "d");
    }

    #[test]
    fn empty_string_is_present() {
        let e = env(&[("EMPTY", "")]);
        assert_eq!(e.resolve_string("EMPTY", "d").unwrap(), "");
    }

    #[test]
    fn bool_is_case_insensitive_true() {
        let e = env(&[("A", "TRUE"), ("B", "True"), ("C", " true ")]);
        assert!(e.resolve_bool("A", false).unwrap());
        assert!(e.resolve_bool("B", false).unwrap());
        assert!(e.resolve_bool("C", false).unwrap());
    }

    #[test]
    fn bool_other_values_are_false() {
        let e = env(&[("A", "1"), ("B", "yes"), ("C", "")]);
        assert!(!e.resolve_bool("A", true).unwrap());
        assert!(!e.resolve_bool("B", true).unwrap());
        assert!(!e.resolve_bool("C", true).unwrap());
    }

    #[test]
    fn bool_absent_uses_default() {
        let e = env(&[]);
        assert!(e.resolve_bool("MISSING", true).unwrap());
        assert!(!e.resolve_bool("MISSING", false).unwrap());
    }

    #[test]
    fn int_parses_and_defaults() {
        let e = env(&[("N", " 42 ")]);
        assert_eq!(e.resolve_int("N", 7).unwrap(), 42);
        assert_eq!(e.resolve_int("MISSING", 7).unwrap(), 7);
    }

    #[test]
    fn malformed_int_is_an_error_not_a_default() {
        let e = env(&[("POLLING_INTERVAL", "abc")]);
        let err = e.resolve_int("POLLING_INTERVAL", 300).unwrap_err();
        assert_eq!(err.key, "POLLING_INTERVAL");
        assert_eq!(err.value, "abc");
        assert_eq!(err.expected, "integer");
    }

    #[test]
    fn empty_numeric_value_is_an_error() {
        let e = env(&[("N", "")]);
        assert!(e.resolve_int("N", 1).is_err());
        assert!(e.resolve_float("N", 1.0).is_err());
    }

    #[test]
    fn float_parses_and_rejects_garbage() {
        let e = env(&[("F", "0.5"), ("G", "half")]);
        assert_eq!(e.resolve_float("F", 0.0).unwrap(), 0.5);
        assert_eq!(e.resolve_float("MISSING", 2.0).unwrap(), 2.0);
        assert_eq!(e.resolve_float("G", 0.0).unwrap_err().expected, "float");
    }

    #[test]
    fn path_is_trimmed_and_blank_is_unset() {
        let e = env(&[("P", " /srv/creds.json "), ("BLANK", "  ")]);
        assert_eq!(e.resolve_path("P").unwrap(), Some(PathBuf::from("/srv/creds.json")));
        assert_eq!(e.resolve_path("BLANK").unwrap(), None);
        assert_eq!(e.resolve_path("MISSING").unwrap(), None);
    }

    #[test]
    fn path_expands_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let e = env(&[("P", "~/.config/firebase.json")]);
        let path = e.resolve_path("P").unwrap().unwrap();
        assert!(path.starts_with(&home));
        assert!(path.ends_with("firebase.json"));
    }

    #[test]
    fn absolute_and_relative_paths_unchanged() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
        assert_eq!(expand_home("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn snapshot_ignores_process_environment() {
        // PATH is set in any sane test environment.
        let e = env(&[]);
        assert!(!e.is_live());
        assert_eq!(e.get("PATH").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_process_value_is_a_parse_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        const KEY: &str = "FEEDGATE_TEST_ONLY_NON_UTF8";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(KEY, OsStr::from_bytes(b"ab\xffcd")) };
        let e = Env::from_process(None).unwrap();
        let err = e.resolve_string(KEY, "fallback").unwrap_err();
        unsafe { std::env::remove_var(KEY) };

        assert_eq!(err.key, KEY);
        assert_eq!(err.expected, "UTF-8 string");
    }

    #[test]
    fn missing_override_file_is_not_an_error() {
        let e = Env::from_process(Some(Path::new("/nonexistent/dir/.env"))).unwrap();
        assert!(e.is_live());
        assert!(e.override_file().is_none());
    }

    #[test]
    fn override_file_values_are_resolvable() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "FEEDGATE_TEST_ONLY_OVERRIDE_KEY=from-file").unwrap();
        let e = Env::from_process(Some(f.path())).unwrap();
        assert_eq!(e.override_file(), Some(f.path()));
        assert_eq!(
            e.resolve_string("FEEDGATE_TEST_ONLY_OVERRIDE_KEY", "d").unwrap(),
            "from-file"
        );
    }

    #[test]
    fn malformed_override_file_errors() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "THIS LINE IS NOT A PAIR").unwrap();
        let err = Env::from_process(Some(f.path())).unwrap_err();
        assert!(err.to_string().contains("config error"));
    }
}
