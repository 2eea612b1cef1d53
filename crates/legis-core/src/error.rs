use thiserror::Error;

/// Configuration failures detected before any network or filesystem work.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("jurisdiction '{0}' is not yet supported")]
    UnsupportedJurisdiction(String),
}
