//! # Wire Constants
//!
//! Sizes and defaults of the numeric buffers exchanged with the engine.
//!
//! **CRITICAL:** The engine-side readers hard-code these strides.
//! Changing one is a breaking change for every consumer.

// =============================================================================
// CAMERA BUFFERS
// =============================================================================

/// Scalars in a serialized pose: position xyz + quaternion xyzw.
pub const POSE_LEN: usize = 7;

/// Scalars in a 4x4 matrix (column-major, as the SDKs return them).
pub const MATRIX_LEN: usize = 16;

/// Scalars in the display-aligned camera texture coordinates (4 corners × uv).
pub const TEX_COORDS_LEN: usize = 8;

/// Full-screen quad in normalized device coordinates.
///
/// Corner order: bottom-left, top-left, bottom-right, top-right.
pub const NDC_QUAD: [f32; TEX_COORDS_LEN] = [-1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0];

/// Default near clip distance for the projection matrix (meters).
pub const DEFAULT_NEAR_CLIP: f32 = 0.01;

/// Default far clip distance for the projection matrix (meters).
pub const DEFAULT_FAR_CLIP: f32 = 1000.0;

// =============================================================================
// PLANE BUFFERS
// =============================================================================

/// Scalars per serialized plane record.
///
/// Layout: handle, plane type, tracking state, extent x, extent z,
/// position xyz, quaternion xyzw.
pub const PLANE_RECORD_STRIDE: usize = 12;

/// Default cap on planes emitted as added or updated per tick.
pub const DEFAULT_MAX_PLANES: usize = 5;

/// Fixed width of the removed-handle array.
pub const REMOVED_PLANE_SLOTS: usize = 5;

/// Value written into unused removed-handle slots.
pub const REMOVED_SENTINEL: i32 = -1;
