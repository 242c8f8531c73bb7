//! Published per-tick state: what engine threads read between ticks.

use arbridge_planes::{PlaneFrame, TrackingState};
use arbridge_shared::{Matrix4, POSE_LEN, REMOVED_PLANE_SLOTS, TEX_COORDS_LEN};

use crate::camera::CameraFrame;

/// One published tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ArFrameSnapshot {
    /// Ticks published before this one.
    pub frame: u64,
    /// Camera tracking state. `Stopped` before the first frame and while no
    /// session runs.
    pub tracking: TrackingState,
    /// Camera buffers.
    pub camera: CameraFrame,
    /// Plane diff of this tick.
    pub planes: PlaneFrame,
}

impl Default for ArFrameSnapshot {
    fn default() -> Self {
        Self {
            frame: 0,
            tracking: TrackingState::Stopped,
            camera: CameraFrame::default(),
            planes: PlaneFrame::default(),
        }
    }
}

impl ArFrameSnapshot {
    /// Camera pose as 7 scalars.
    #[must_use]
    pub const fn camera_pose(&self) -> [f32; POSE_LEN] {
        self.camera.pose_scalars()
    }

    /// Camera view matrix.
    #[must_use]
    pub const fn view_matrix(&self) -> &Matrix4 {
        &self.camera.view
    }

    /// Camera projection matrix.
    #[must_use]
    pub const fn projection_matrix(&self) -> &Matrix4 {
        &self.camera.projection
    }

    /// Camera texture coordinates.
    #[must_use]
    pub const fn camera_tex_coords(&self) -> &[f32; TEX_COORDS_LEN] {
        &self.camera.tex_coords
    }

    /// Planes that received a handle this tick.
    #[must_use]
    pub fn added_planes_count(&self) -> usize {
        self.planes.added_count()
    }

    /// Added planes, 12 scalars each.
    #[must_use]
    pub fn added_planes_info(&self) -> &[f32] {
        self.planes.added_info()
    }

    /// Known planes seen again this tick.
    #[must_use]
    pub fn updated_planes_count(&self) -> usize {
        self.planes.updated_count()
    }

    /// Updated planes, 12 scalars each.
    #[must_use]
    pub fn updated_planes_info(&self) -> &[f32] {
        self.planes.updated_info()
    }

    /// Planes merged away this tick, including any past the fixed slots.
    #[must_use]
    pub fn removed_planes_count(&self) -> usize {
        self.planes.removed_count()
    }

    /// Removed handles, padded with -1.
    #[must_use]
    pub fn removed_planes_info(&self) -> [i32; REMOVED_PLANE_SLOTS] {
        self.planes.removed_info()
    }
}
