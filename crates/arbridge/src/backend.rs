//! # Tracking Backend Seam
//!
//! The adapter never talks to a vendor SDK directly. Each SDK (ARCore-
//! style, AREngine-style, a recorded session, a test double) implements
//! [`TrackingBackend`] and the adapter drives it.
//!
//! ```text
//! ArSession ──► TrackingBackend ──► vendor SDK
//!    │               ▲
//!    │               └── implemented per SDK, outside this crate
//!    └──► PlaneTracker, CameraState, FrameBuffer
//! ```

use arbridge_planes::{PlaneSnapshot, TrackingState};
use arbridge_shared::{Matrix4, Pose, TEX_COORDS_LEN};

use crate::error::SessionResult;

/// The SDK's answer to "can this device run AR?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SdkAvailability {
    /// Supported and the services package is installed.
    SupportedInstalled,
    /// Supported, but the installed services package is too old.
    SupportedApkTooOld,
    /// Supported, but the services package is missing.
    SupportedNotInstalled,
    /// The SDK is still querying; ask again later.
    UnknownChecking,
    /// The query failed.
    UnknownError,
    /// The query timed out.
    UnknownTimedOut,
    /// The device cannot run AR.
    UnsupportedDeviceNotCapable,
}

impl SdkAvailability {
    /// Returns true while the SDK has not decided yet.
    #[inline]
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::UnknownChecking)
    }

    /// Returns true if installing or updating the services would help.
    #[inline]
    #[must_use]
    pub const fn needs_install(self) -> bool {
        matches!(self, Self::SupportedApkTooOld | Self::SupportedNotInstalled)
    }
}

/// Outcome of an install request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstallStatus {
    /// The services are installed and usable now.
    Installed,
    /// The platform showed an install prompt; the app will be resumed later.
    InstallRequested,
}

/// What a successful frame update reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameUpdate {
    /// Camera tracking state this frame.
    pub camera_tracking: TrackingState,
    /// Display rotation or viewport size changed since the last frame.
    pub display_geometry_changed: bool,
}

impl Default for FrameUpdate {
    fn default() -> Self {
        Self {
            camera_tracking: TrackingState::Tracking,
            display_geometry_changed: false,
        }
    }
}

/// One vendor AR SDK as seen by [`crate::ArSession`].
///
/// Methods are only called from the tick thread. Session methods are
/// called only between a successful `create_session` and `close_session`.
pub trait TrackingBackend {
    /// Returns true if the app holds camera permission.
    fn has_camera_permission(&self) -> bool;

    /// Asks the platform for camera permission.
    ///
    /// The answer arrives later as a [`crate::PlatformEvent::CameraPermission`].
    fn request_camera_permission(&mut self);

    /// Queries whether the device can run AR.
    fn check_availability(&mut self) -> SdkAvailability;

    /// Asks the platform to install or update the AR services.
    ///
    /// # Errors
    ///
    /// Returns an error if the install flow could not be started.
    fn request_install(&mut self) -> SessionResult<InstallStatus>;

    /// Creates the SDK session.
    ///
    /// # Errors
    ///
    /// Returns the SDK failure (not installed, too old, incompatible...).
    fn create_session(&mut self) -> SessionResult<()>;

    /// Resumes the SDK session and starts the camera.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::CameraUnavailable`] if the camera
    /// cannot be opened.
    fn resume_session(&mut self) -> SessionResult<()>;

    /// Pauses the SDK session and releases the camera.
    fn pause_session(&mut self);

    /// Closes the SDK session and frees its resources.
    fn close_session(&mut self);

    /// Tells the SDK the display rotation and viewport size.
    fn set_display_geometry(&mut self, rotation: i32, width: u32, height: u32);

    /// Tells the SDK which GL texture to stream the camera image into.
    fn set_camera_texture_name(&mut self, texture_id: u32);

    /// Advances to the next camera frame.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::FrameUpdate`] if no frame is
    /// available; the adapter skips the tick.
    fn update(&mut self) -> SessionResult<FrameUpdate>;

    /// Display-oriented camera pose of the current frame.
    fn camera_pose(&self) -> Pose;

    /// Column-major view matrix of the current frame.
    fn view_matrix(&self) -> Matrix4;

    /// Column-major projection matrix for the given clip distances.
    fn projection_matrix(&self, near: f32, far: f32) -> Matrix4;

    /// Maps normalized device coordinates to camera texture coordinates.
    fn transform_display_uv(&self, ndc: &[f32; TEX_COORDS_LEN]) -> [f32; TEX_COORDS_LEN];

    /// Returns true if the backend can enumerate planes.
    fn supports_planes(&self) -> bool {
        false
    }

    /// Appends every plane the SDK currently knows about to `out`.
    fn live_planes(&self, out: &mut Vec<PlaneSnapshot>) {
        let _ = out;
    }
}
