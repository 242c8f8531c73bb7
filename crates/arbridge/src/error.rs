//! # Session Error Types
//!
//! Everything that can go wrong between the host and the vendor SDK.

use arbridge_planes::PlaneError;
use thiserror::Error;

/// Errors raised by the session adapter and tracking backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The camera is held by another client or failed to open.
    #[error("camera not available")]
    CameraUnavailable,

    /// The AR services package is not installed.
    #[error("AR services not installed")]
    NotInstalled,

    /// The SDK linked into the app is older than the installed services require.
    #[error("AR SDK too old")]
    SdkTooOld,

    /// The installed AR services package is too old for this SDK.
    #[error("AR services package too old")]
    ApkTooOld,

    /// The device cannot run AR.
    #[error("device not compatible with AR")]
    DeviceIncompatible,

    /// The user refused camera access.
    #[error("camera permission denied")]
    PermissionDenied,

    /// Advancing the frame failed; the tick is skipped.
    #[error("frame update failed: {0}")]
    FrameUpdate(String),

    /// Any other backend failure.
    #[error("backend failure: {0}")]
    Backend(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(String),

    /// Plane tracker configuration rejected.
    #[error(transparent)]
    Planes(#[from] PlaneError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
