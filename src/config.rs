//! Global configuration loaded from the process environment.

use std::env;

use crate::{AppError, Result};

/// Environment variable holding the `SQLite` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable gating all mutating repository operations.
pub const ALLOW_MUTATIONS_VAR: &str = "ALLOW_MUTATIONS";

/// Process-wide configuration.
///
/// Read once at startup and injected into repositories at construction.
/// The mutation gate is a plain field — never re-read from the
/// environment at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// `SQLite` connection string, e.g. `sqlite://tasker.db`.
    pub database_url: String,
    /// Whether mutating repository operations are permitted.
    pub allow_mutations: bool,
}

impl GlobalConfig {
    /// Load configuration from the process environment.
    ///
    /// `DATABASE_URL` is required; `ALLOW_MUTATIONS` defaults to enabled
    /// and only the exact string `"false"` disables it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when `DATABASE_URL` is absent or empty.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var(DATABASE_URL_VAR)
            .ok()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                AppError::Config(format!("{DATABASE_URL_VAR} environment variable is required"))
            })?;

        let allow_mutations = env::var(ALLOW_MUTATIONS_VAR)
            .map_or(true, |value| value != "false");

        Ok(Self {
            database_url,
            allow_mutations,
        })
    }

    /// Construct a configuration with explicit values (used by tests and
    /// the check-in script's dry-run mode).
    #[must_use]
    pub fn new(database_url: String, allow_mutations: bool) -> Self {
        Self {
            database_url,
            allow_mutations,
        }
    }
}
