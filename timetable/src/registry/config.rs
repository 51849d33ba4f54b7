//! Registry configuration.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::TokenPolicy;
use crate::storage::ReadOptions;

/// Default timetable file, relative to the working directory.
pub const DEFAULT_PATH: &str = "timetable.txt";

/// Environment variable overriding the timetable file path.
pub const PATH_ENV: &str = "TIMETABLE_FILE";
/// Environment variable making unknown day tokens an error.
pub const STRICT_DAYS_ENV: &str = "TIMETABLE_STRICT_DAYS";
/// Environment variable making unknown transport kinds an error.
pub const STRICT_KINDS_ENV: &str = "TIMETABLE_STRICT_KINDS";

/// Configuration for a [`Registry`](super::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Backing file. `None` keeps everything in memory.
    pub path: Option<PathBuf>,

    /// What to do with day tokens that are not a known day name.
    ///
    /// Lenient keeps the first two characters of the token.
    pub unknown_days: TokenPolicy,

    /// What to do with transport kind names that are not recognized.
    ///
    /// Lenient treats them as buses.
    pub unknown_kinds: TokenPolicy,
}

impl RegistryConfig {
    /// Configuration backed by the given file, with lenient parsing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::in_memory()
        }
    }

    /// Configuration with no backing file.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            unknown_days: TokenPolicy::Lenient,
            unknown_kinds: TokenPolicy::Lenient,
        }
    }

    /// Set the backing file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the policy for unknown day tokens.
    pub fn with_unknown_days(mut self, policy: TokenPolicy) -> Self {
        self.unknown_days = policy;
        self
    }

    /// Set the policy for unknown transport kinds.
    pub fn with_unknown_kinds(mut self, policy: TokenPolicy) -> Self {
        self.unknown_kinds = policy;
        self
    }

    /// Build a configuration from `TIMETABLE_FILE`, `TIMETABLE_STRICT_DAYS`
    /// and `TIMETABLE_STRICT_KINDS`.
    ///
    /// Unset variables keep their defaults. Unparseable policy values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.path = Some(PathBuf::from(path));
        }
        if let Some(policy) = policy_from(&lookup, STRICT_DAYS_ENV) {
            config.unknown_days = policy;
        }
        if let Some(policy) = policy_from(&lookup, STRICT_KINDS_ENV) {
            config.unknown_kinds = policy;
        }
        config
    }

    /// Returns the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn read_options(&self) -> ReadOptions {
        ReadOptions {
            unknown_days: self.unknown_days,
            unknown_kinds: self.unknown_kinds,
        }
    }
}

fn policy_from(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<TokenPolicy> {
    let value = lookup(key)?;
    match value.parse() {
        Ok(policy) => Some(policy),
        Err(e) => {
            warn!(variable = key, error = %e, "Ignoring invalid policy");
            None
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}
