//! Signed camera-to-plane distance.

use arbridge_shared::{Pose, Vec3};

/// Signed distance from `viewpoint` to the plane through `plane_pose`.
///
/// `plane_pose` must have its local Y axis along the plane normal, which
/// holds for a plane's center pose. The result is the projection of
/// `viewpoint.origin - plane.origin` onto that normal; a negative value
/// means the viewpoint is behind the plane.
#[inline]
#[must_use]
pub fn distance_to_plane(plane_pose: &Pose, viewpoint: &Pose) -> f32 {
    let normal = plane_pose.transformed_axis(Vec3::Y);
    (viewpoint.position - plane_pose.position).dot(normal)
}
