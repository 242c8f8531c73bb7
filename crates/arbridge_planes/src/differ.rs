//! # Frame Differ
//!
//! Turns the tracker's live planes into this tick's added / updated /
//! removed handle lists.
//!
//! ## Algorithm
//!
//! ```text
//! 1. keep planes that are TRACKING and horizontal
//! 2. distance to camera; drop back-facing (d < 0) and non-finite
//! 3. stable sort, farthest first (nearer planes land last and draw on top)
//! 4. walk the ranking until `max_output` planes were added or updated:
//!      unknown, standalone   → allocate handle  → ADDED
//!      unknown, subsumed     → skip (no handle is burnt on it)
//!      known,   subsumed     → retire once      → REMOVED (no quota)
//!      known,   retired      → skip (never resurrected)
//!      known,   standalone   → refresh snapshot → UPDATED
//! ```
//!
//! The registry is owned by the tracker and mutated only here; the caller
//! must not run two diffs at once (the `&mut self` receiver enforces it).

use arbridge_shared::Pose;

use crate::config::PlaneTrackerConfig;
use crate::geometry::distance_to_plane;
use crate::plane::{PlaneHandle, PlaneSnapshot};
use crate::registry::PlaneRegistry;
use crate::serializer::PlaneFrame;

/// Handles touched by one tick. The three lists are disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaneDiff {
    /// Planes that received a handle this tick.
    pub added: Vec<PlaneHandle>,
    /// Known, standalone planes seen again this tick.
    pub updated: Vec<PlaneHandle>,
    /// Known planes that merged into another plane this tick.
    pub removed: Vec<PlaneHandle>,
}

impl PlaneDiff {
    /// Number of planes that counted against the per-tick cap.
    #[inline]
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.added.len() + self.updated.len()
    }

    /// Returns true if the tick touched no handle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    fn clear(&mut self) {
        self.added.clear();
        self.updated.clear();
        self.removed.clear();
    }
}

/// Counters from the last tick plus lifetime totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Diff passes run.
    pub ticks: u64,
    /// Live planes handed in on the last tick.
    pub live_planes: usize,
    /// Planes that survived filtering on the last tick.
    pub candidates: usize,
    /// Candidates not reached on the last tick because the cap was full.
    pub dropped_by_cap: usize,
    /// Planes first seen already subsumed (never given a handle).
    pub skipped_subsumed: u64,
}

/// Owns the plane registry and runs one diff per tick.
#[derive(Debug)]
pub struct PlaneTracker {
    registry: PlaneRegistry,
    config: PlaneTrackerConfig,
    /// (distance, index into the live slice), reused across ticks.
    ranked: Vec<(f32, usize)>,
    stats: TrackerStats,
}

impl PlaneTracker {
    /// Creates a tracker with an empty registry.
    #[must_use]
    pub fn new(config: PlaneTrackerConfig) -> Self {
        Self {
            registry: PlaneRegistry::new(),
            ranked: Vec::with_capacity(config.max_output * 4),
            config,
            stats: TrackerStats::default(),
        }
    }

    /// Returns the tracker configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlaneTrackerConfig {
        &self.config
    }

    /// Returns the handle registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &PlaneRegistry {
        &self.registry
    }

    /// Returns tick counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Drops every handle. Only for full session teardown.
    pub fn reset(&mut self) {
        self.registry = PlaneRegistry::new();
        self.ranked.clear();
        self.stats = TrackerStats::default();
    }

    /// Runs one diff with the configured cap and serializes the result.
    pub fn update(&mut self, live: &[PlaneSnapshot], viewpoint: &Pose) -> PlaneFrame {
        let diff = self.diff(live, viewpoint, self.config.max_output);
        PlaneFrame::from_diff(&diff, &self.registry)
    }

    /// Runs one diff pass.
    ///
    /// At most `max_output` handles end up in `added` + `updated`;
    /// `removed` is not capped.
    pub fn diff(
        &mut self,
        live: &[PlaneSnapshot],
        viewpoint: &Pose,
        max_output: usize,
    ) -> PlaneDiff {
        let mut diff = PlaneDiff::default();
        self.diff_into(live, viewpoint, max_output, &mut diff);
        diff
    }

    /// Like [`PlaneTracker::diff`], reusing `out`'s allocations.
    pub fn diff_into(
        &mut self,
        live: &[PlaneSnapshot],
        viewpoint: &Pose,
        max_output: usize,
        out: &mut PlaneDiff,
    ) {
        out.clear();
        self.rank(live, viewpoint);

        let quota = max_output.min(self.ranked.len());
        let mut visited = 0;

        for &(_, index) in &self.ranked {
            if out.emitted() >= quota {
                break;
            }
            visited += 1;

            let plane = &live[index];
            match self.registry.resolve(plane.id) {
                None if plane.is_subsumed() => {
                    self.stats.skipped_subsumed += 1;
                }
                None => {
                    out.added.push(self.registry.allocate(plane));
                }
                Some(handle) if plane.is_subsumed() => {
                    if self.registry.retire(handle) {
                        out.removed.push(handle);
                    }
                }
                Some(handle) if self.registry.is_retired(handle) => {}
                Some(handle) => {
                    self.registry.refresh(handle, plane);
                    out.updated.push(handle);
                }
            }
        }

        self.stats.ticks += 1;
        self.stats.live_planes = live.len();
        self.stats.candidates = self.ranked.len();
        self.stats.dropped_by_cap = self.ranked.len() - visited;

        tracing::trace!(
            live = live.len(),
            candidates = self.ranked.len(),
            added = out.added.len(),
            updated = out.updated.len(),
            removed = out.removed.len(),
            "plane diff"
        );
    }

    /// Fills `ranked` with qualifying planes, farthest first.
    fn rank(&mut self, live: &[PlaneSnapshot], viewpoint: &Pose) {
        self.ranked.clear();
        self.ranked.extend(live.iter().enumerate().filter_map(|(index, plane)| {
            if !plane.is_trackable() {
                return None;
            }
            let distance = distance_to_plane(&plane.center_pose, viewpoint);
            (distance.is_finite() && distance >= 0.0).then_some((distance, index))
        }));

        // Stable: equal distances keep the tracker's enumeration order.
        self.ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    }
}
