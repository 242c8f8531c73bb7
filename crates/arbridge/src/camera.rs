//! # Camera Frame State
//!
//! Per-tick copy of what the engine needs to draw the camera background
//! and place virtual content.
//!
//! | Buffer      | Scalars | Source                                        |
//! |-------------|---------|-----------------------------------------------|
//! | pose        | 7       | display-oriented camera pose                  |
//! | view        | 16      | SDK view matrix                               |
//! | projection  | 16      | SDK projection at the configured clip planes  |
//! | tex coords  | 8       | NDC quad through the display-UV transform     |
//!
//! Texture coordinates only change with display geometry, so they are
//! re-queried on the first frame and after a rotation or resize.

use arbridge_shared::{Matrix4, Pose, IDENTITY_MATRIX, NDC_QUAD, POSE_LEN, TEX_COORDS_LEN};

use crate::backend::{FrameUpdate, TrackingBackend};

/// Camera buffers of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    /// Display-oriented camera pose.
    pub pose: Pose,
    /// Column-major view matrix.
    pub view: Matrix4,
    /// Column-major projection matrix.
    pub projection: Matrix4,
    /// Camera texture coordinates for the four NDC quad corners.
    pub tex_coords: [f32; TEX_COORDS_LEN],
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            view: IDENTITY_MATRIX,
            projection: IDENTITY_MATRIX,
            tex_coords: [0.0; TEX_COORDS_LEN],
        }
    }
}

impl CameraFrame {
    /// Pose as `tx, ty, tz, qx, qy, qz, qw`.
    #[inline]
    #[must_use]
    pub const fn pose_scalars(&self) -> [f32; POSE_LEN] {
        self.pose.to_array()
    }
}

/// Refreshes [`CameraFrame`]s from a backend.
#[derive(Clone, Debug)]
pub struct CameraState {
    frame: CameraFrame,
    near_clip: f32,
    far_clip: f32,
    tex_coords_stale: bool,
}

impl CameraState {
    /// Creates camera state for the given clip planes.
    ///
    /// Texture coordinates are fetched on the first refresh.
    #[must_use]
    pub fn new(near_clip: f32, far_clip: f32) -> Self {
        Self {
            frame: CameraFrame::default(),
            near_clip,
            far_clip,
            tex_coords_stale: true,
        }
    }

    /// Last refreshed frame.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    /// Forces the texture coordinates to be re-queried on the next refresh.
    pub fn invalidate_tex_coords(&mut self) {
        self.tex_coords_stale = true;
    }

    /// Returns true if the next refresh will re-query texture coordinates.
    #[inline]
    #[must_use]
    pub const fn tex_coords_stale(&self) -> bool {
        self.tex_coords_stale
    }

    /// Copies the current frame's camera data out of `backend`.
    pub fn refresh<B: TrackingBackend + ?Sized>(
        &mut self,
        backend: &B,
        update: &FrameUpdate,
    ) -> &CameraFrame {
        if update.display_geometry_changed || self.tex_coords_stale {
            self.frame.tex_coords = backend.transform_display_uv(&NDC_QUAD);
            self.tex_coords_stale = false;
        }

        self.frame.pose = backend.camera_pose();
        self.frame.view = backend.view_matrix();
        self.frame.projection = backend.projection_matrix(self.near_clip, self.far_clip);
        &self.frame
    }
}
