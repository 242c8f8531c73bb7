//! # Flat Buffer Serializer
//!
//! Packs a tick's diff into the numeric buffers the engine reads.
//!
//! ## Record Layout (12 × f32, 48 bytes)
//!
//! ```text
//! ┌────────┬──────┬───────┬─────────┬─────────┬────┬────┬────┬────┬────┬────┬────┐
//! │ handle │ type │ state │ extentX │ extentZ │ tx │ ty │ tz │ qx │ qy │ qz │ qw │
//! └────────┴──────┴───────┴─────────┴─────────┴────┴────┴────┴────┴────┴────┴────┘
//! ```
//!
//! Removed planes only need their handle. They go into a fixed array of
//! [`REMOVED_PLANE_SLOTS`] `i32`s padded with [`REMOVED_SENTINEL`]; the
//! full count is reported separately.

use arbridge_shared::{Pose, PLANE_RECORD_STRIDE, REMOVED_PLANE_SLOTS, REMOVED_SENTINEL};
use bytemuck::{Pod, Zeroable};

use crate::differ::PlaneDiff;
use crate::plane::{PlaneHandle, PlaneSnapshot};
use crate::registry::PlaneRegistry;

/// One serialized plane.
///
/// The Pod layout is the wire layout; a slice of records casts directly
/// to the flat `f32` buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PlaneRecord {
    /// Plane handle.
    pub handle: f32,
    /// [`crate::PlaneType`] ordinal.
    pub plane_type: f32,
    /// [`crate::TrackingState`] ordinal.
    pub tracking_state: f32,
    /// Extent along local X.
    pub extent_x: f32,
    /// Extent along local Z.
    pub extent_z: f32,
    /// Center pose.
    pub center_pose: Pose,
}

// The engine-side readers stride by this amount.
const _: () = assert!(std::mem::size_of::<PlaneRecord>() == PLANE_RECORD_STRIDE * 4);

impl PlaneRecord {
    /// Builds the record for `plane` under `handle`.
    #[must_use]
    pub fn new(handle: PlaneHandle, plane: &PlaneSnapshot) -> Self {
        Self {
            handle: handle.as_wire_f32(),
            plane_type: f32::from(plane.plane_type.ordinal()),
            tracking_state: f32::from(plane.tracking_state.ordinal()),
            extent_x: plane.extent_x,
            extent_z: plane.extent_z,
            center_pose: plane.center_pose,
        }
    }

    /// The record as its 12 scalars.
    #[must_use]
    pub fn as_scalars(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

/// Serializes `handles` in order, looking each one up in `registry`.
///
/// Handles the registry doesn't know are skipped.
#[must_use]
pub fn serialize_records(handles: &[PlaneHandle], registry: &PlaneRegistry) -> Vec<PlaneRecord> {
    handles
        .iter()
        .filter_map(|&handle| registry.get(handle).map(|plane| PlaneRecord::new(handle, plane)))
        .collect()
}

/// Packs removed handles into the fixed-width array, padding with the sentinel.
///
/// Handles beyond [`REMOVED_PLANE_SLOTS`] are truncated.
#[must_use]
pub fn removed_slots(handles: &[PlaneHandle]) -> [i32; REMOVED_PLANE_SLOTS] {
    let mut slots = [REMOVED_SENTINEL; REMOVED_PLANE_SLOTS];
    for (slot, handle) in slots.iter_mut().zip(handles) {
        *slot = handle.as_wire_i32();
    }
    slots
}

/// One tick's plane output, ready for the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaneFrame {
    added: Vec<PlaneRecord>,
    updated: Vec<PlaneRecord>,
    removed: Vec<PlaneHandle>,
}

impl PlaneFrame {
    /// Serializes `diff` against the registry that produced it.
    #[must_use]
    pub fn from_diff(diff: &PlaneDiff, registry: &PlaneRegistry) -> Self {
        Self {
            added: serialize_records(&diff.added, registry),
            updated: serialize_records(&diff.updated, registry),
            removed: diff.removed.clone(),
        }
    }

    /// Number of added planes.
    #[inline]
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Added planes, [`PLANE_RECORD_STRIDE`] scalars each.
    #[inline]
    #[must_use]
    pub fn added_info(&self) -> &[f32] {
        bytemuck::cast_slice(&self.added)
    }

    /// Added plane records.
    #[inline]
    #[must_use]
    pub fn added_records(&self) -> &[PlaneRecord] {
        &self.added
    }

    /// Number of updated planes.
    #[inline]
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    /// Updated planes, [`PLANE_RECORD_STRIDE`] scalars each.
    #[inline]
    #[must_use]
    pub fn updated_info(&self) -> &[f32] {
        bytemuck::cast_slice(&self.updated)
    }

    /// Updated plane records.
    #[inline]
    #[must_use]
    pub fn updated_records(&self) -> &[PlaneRecord] {
        &self.updated
    }

    /// Number of removed planes, including any beyond the fixed slots.
    #[inline]
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Removed handles in the fixed sentinel-padded form.
    #[inline]
    #[must_use]
    pub fn removed_info(&self) -> [i32; REMOVED_PLANE_SLOTS] {
        removed_slots(&self.removed)
    }

    /// All removed handles.
    #[inline]
    #[must_use]
    pub fn removed_handles(&self) -> &[PlaneHandle] {
        &self.removed
    }

    /// Returns true if nothing was added, updated or removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Empties all three lists, keeping their allocations.
    pub fn clear(&mut self) {
        self.added.clear();
        self.updated.clear();
        self.removed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::{PlaneId, PlaneType, TrackingState};
    use arbridge_shared::{Quaternion, Vec3};

    #[test]
    fn test_record_field_order() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quaternion::new(0.0, 0.6, 0.0, 0.8));
        let plane = PlaneSnapshot::new(PlaneId(99), pose)
            .with_type(PlaneType::HorizontalDownwardFacing)
            .with_tracking_state(TrackingState::Tracking)
            .with_extents(0.5, 2.5);

        let record = PlaneRecord::new(PlaneHandle::new(4), &plane);
        assert_eq!(
            record.as_scalars(),
            &[4.0, 1.0, 0.0, 0.5, 2.5, 1.0, 2.0, 3.0, 0.0, 0.6, 0.0, 0.8]
        );
    }

    #[test]
    fn test_serialize_follows_handle_order() {
        let mut registry = PlaneRegistry::new();
        let a = registry.allocate(&PlaneSnapshot::new(PlaneId(10), Pose::IDENTITY));
        let b = registry.allocate(&PlaneSnapshot::new(PlaneId(20), Pose::IDENTITY));

        let records = serialize_records(&[b, a], &registry);
        let flat: &[f32] = bytemuck::cast_slice(&records);

        assert_eq!(flat.len(), 2 * PLANE_RECORD_STRIDE);
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[PLANE_RECORD_STRIDE], 0.0);
    }

    #[test]
    fn test_serialize_skips_unknown_handles() {
        let registry = PlaneRegistry::new();
        assert!(serialize_records(&[PlaneHandle::new(3)], &registry).is_empty());
    }

    #[test]
    fn test_removed_slots_padding() {
        assert_eq!(removed_slots(&[]), [-1, -1, -1, -1, -1]);
        assert_eq!(
            removed_slots(&[PlaneHandle::new(7), PlaneHandle::new(2)]),
            [7, 2, -1, -1, -1]
        );
    }

    #[test]
    fn test_removed_slots_truncate_but_count_is_full() {
        let handles: Vec<_> = (0..7).map(PlaneHandle::new).collect();
        let frame = PlaneFrame {
            removed: handles,
            ..PlaneFrame::default()
        };

        assert_eq!(frame.removed_info(), [0, 1, 2, 3, 4]);
        assert_eq!(frame.removed_count(), 7);
    }

    #[test]
    fn test_clear_empties_every_list() {
        let mut frame = PlaneFrame {
            added: vec![PlaneRecord::default()],
            updated: vec![PlaneRecord::default(); 2],
            removed: vec![PlaneHandle::new(3)],
        };

        frame.clear();

        assert!(frame.is_empty());
        assert!(frame.added_info().is_empty());
        assert_eq!(frame.removed_info(), [-1; REMOVED_PLANE_SLOTS]);
    }
}
