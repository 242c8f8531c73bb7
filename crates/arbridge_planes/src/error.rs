//! # Plane Tracking Error Types
//!
//! The per-tick operations never fail; only configuration can.

use thiserror::Error;

/// Errors that can occur while configuring the plane tracker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaneError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration text is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),
}

/// Result type for plane tracking operations.
pub type PlaneResult<T> = Result<T, PlaneError>;
