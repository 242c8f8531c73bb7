//! # Plane Data Model
//!
//! The tracker owns its plane objects; the adapter hands us one
//! [`PlaneSnapshot`] per live plane per tick, keyed by an opaque
//! [`PlaneId`] that stays stable for the session's lifetime.

use arbridge_shared::Pose;

/// Opaque identity token of a tracker plane.
///
/// Supplied by the session adapter (pointer identity, generation index,
/// UUID bits...). Only equality and hashing are used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneId(pub u64);

/// Stable integer handle assigned to a plane on its first qualifying sighting.
///
/// Handles are dense, start at zero, and are never reused within a
/// registry's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneHandle(u32);

impl PlaneHandle {
    /// Creates a handle from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Index into the registry's dense storage.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Value written into the `f32` plane records.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_wire_f32(self) -> f32 {
        self.0 as f32
    }

    /// Value written into the removed-handle `i32` slots.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_wire_i32(self) -> i32 {
        self.0 as i32
    }
}

/// Orientation class of a plane.
///
/// Discriminants are the ordinals written into plane records.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaneType {
    /// Floor, table top.
    #[default]
    HorizontalUpwardFacing = 0,
    /// Ceiling.
    HorizontalDownwardFacing = 1,
    /// Wall. Never tracked by this crate.
    Vertical = 2,
}

impl PlaneType {
    /// Ordinal written into plane records.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns true for upward- and downward-facing planes.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Self::Vertical)
    }
}

/// Tracking state of a plane as reported by the tracker.
///
/// Discriminants are the ordinals written into plane records.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackingState {
    /// Actively tracked this frame.
    #[default]
    Tracking = 0,
    /// Tracking temporarily lost; may resume.
    Paused = 1,
    /// Will never resume.
    Stopped = 2,
}

impl TrackingState {
    /// Ordinal written into plane records.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// One live plane as seen by the tracker this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSnapshot {
    /// Tracker identity.
    pub id: PlaneId,
    /// Orientation class.
    pub plane_type: PlaneType,
    /// Tracking state.
    pub tracking_state: TrackingState,
    /// Center pose; local Y is the plane normal.
    pub center_pose: Pose,
    /// Extent along the center pose's local X axis (meters).
    pub extent_x: f32,
    /// Extent along the center pose's local Z axis (meters).
    pub extent_z: f32,
    /// Plane this one was merged into, if any.
    pub subsumed_by: Option<PlaneId>,
}

impl PlaneSnapshot {
    /// Creates a tracking, upward-facing, standalone plane of 1m × 1m.
    #[must_use]
    pub const fn new(id: PlaneId, center_pose: Pose) -> Self {
        Self {
            id,
            plane_type: PlaneType::HorizontalUpwardFacing,
            tracking_state: TrackingState::Tracking,
            center_pose,
            extent_x: 1.0,
            extent_z: 1.0,
            subsumed_by: None,
        }
    }

    /// Sets the orientation class.
    #[must_use]
    pub const fn with_type(mut self, plane_type: PlaneType) -> Self {
        self.plane_type = plane_type;
        self
    }

    /// Sets the tracking state.
    #[must_use]
    pub const fn with_tracking_state(mut self, state: TrackingState) -> Self {
        self.tracking_state = state;
        self
    }

    /// Sets both extents.
    #[must_use]
    pub const fn with_extents(mut self, extent_x: f32, extent_z: f32) -> Self {
        self.extent_x = extent_x;
        self.extent_z = extent_z;
        self
    }

    /// Marks this plane as merged into `parent`.
    #[must_use]
    pub const fn merged_into(mut self, parent: PlaneId) -> Self {
        self.subsumed_by = Some(parent);
        self
    }

    /// Returns true if this plane is eligible for handle assignment:
    /// tracking and horizontal.
    #[inline]
    #[must_use]
    pub fn is_trackable(&self) -> bool {
        self.tracking_state == TrackingState::Tracking && self.plane_type.is_horizontal()
    }

    /// Returns true if the tracker merged this plane into another.
    #[inline]
    #[must_use]
    pub const fn is_subsumed(&self) -> bool {
        self.subsumed_by.is_some()
    }
}
