//! Error types for the GATEKEEP boundaries.
//!
//! Predicate and gate evaluation never fail. Only the edges do: loading the
//! gate catalog, fetching identity data, and validating what came back.

use thiserror::Error;

/// The unified error type for GATEKEEP.
#[derive(Debug, Error)]
pub enum GatekeepError {
    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The identity payload was structurally valid but carried bad values.
    #[error("identity payload rejected: {reason}")]
    PayloadRejected { reason: String },

    /// The identity payload did not match the expected JSON shape.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// The identity source could not produce a payload.
    #[error("identity fetch failed: {reason}")]
    IdentityFetchFailed { reason: String },

    /// A named identity was requested that the source does not know.
    #[error("unknown identity '{name}'")]
    UnknownIdentity { name: String },
}

/// Convenience alias used throughout the GATEKEEP crates.
pub type GatekeepResult<T> = Result<T, GatekeepError>;
