//! # Plane Identity Registry
//!
//! Append-only bijection between tracker identities and handles.
//!
//! ```text
//! PlaneId(0x7f3a..) ──► PlaneHandle(0) ──► entries[0] { latest snapshot, retired }
//! PlaneId(0x7f3b..) ──► PlaneHandle(1) ──► entries[1]
//! ```
//!
//! Entries are never deleted. A plane that merged into another is
//! *retired*: its handle stays mapped (so it can't be reused or
//! reallocated) but the differ never emits it again.

use std::collections::HashMap;

use crate::plane::{PlaneHandle, PlaneId, PlaneSnapshot};

#[derive(Clone, Debug)]
struct RegistryEntry {
    plane: PlaneSnapshot,
    retired: bool,
}

/// Stable handle assignment for tracker planes.
#[derive(Clone, Debug, Default)]
pub struct PlaneRegistry {
    /// Tracker identity → handle.
    handles: HashMap<PlaneId, PlaneHandle>,
    /// Dense storage indexed by handle. Its length is the next handle.
    entries: Vec<RegistryEntry>,
}

impl PlaneRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle previously allocated for `id`, if any.
    #[inline]
    #[must_use]
    pub fn resolve(&self, id: PlaneId) -> Option<PlaneHandle> {
        self.handles.get(&id).copied()
    }

    /// Assigns the next handle to `plane` and records it.
    ///
    /// If the plane already has a handle, that handle is returned and the
    /// mapping is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct planes are registered.
    pub fn allocate(&mut self, plane: &PlaneSnapshot) -> PlaneHandle {
        if let Some(existing) = self.resolve(plane.id) {
            return existing;
        }

        let raw = u32::try_from(self.entries.len()).expect("plane handle space exhausted");
        let handle = PlaneHandle::new(raw);

        self.handles.insert(plane.id, handle);
        self.entries.push(RegistryEntry {
            plane: *plane,
            retired: false,
        });
        handle
    }

    /// Returns the latest snapshot recorded for `handle`.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PlaneHandle) -> Option<&PlaneSnapshot> {
        self.entries.get(handle.index()).map(|entry| &entry.plane)
    }

    /// Stores `plane` as the latest snapshot for `handle`.
    ///
    /// Returns false if the handle is unknown or belongs to another plane.
    pub fn refresh(&mut self, handle: PlaneHandle, plane: &PlaneSnapshot) -> bool {
        match self.entries.get_mut(handle.index()) {
            Some(entry) if entry.plane.id == plane.id => {
                entry.plane = *plane;
                true
            }
            _ => false,
        }
    }

    /// Marks `handle` as removed.
    ///
    /// Returns true only the first time a handle is retired.
    pub fn retire(&mut self, handle: PlaneHandle) -> bool {
        match self.entries.get_mut(handle.index()) {
            Some(entry) if !entry.retired => {
                entry.retired = true;
                true
            }
            _ => false,
        }
    }

    /// Returns true if `handle` has been reported removed.
    #[inline]
    #[must_use]
    pub fn is_retired(&self, handle: PlaneHandle) -> bool {
        self.entries
            .get(handle.index())
            .is_some_and(|entry| entry.retired)
    }

    /// Handle the next allocation will receive.
    #[inline]
    #[must_use]
    pub fn next_handle(&self) -> PlaneHandle {
        // Saturates only after u32::MAX allocations, which allocate() refuses.
        PlaneHandle::new(u32::try_from(self.entries.len()).unwrap_or(u32::MAX))
    }

    /// Number of planes ever registered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plane has been registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of retired handles.
    #[must_use]
    pub fn retired_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.retired).count()
    }
}
