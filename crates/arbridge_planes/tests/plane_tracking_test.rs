//! # Plane Tracking Scenarios
//!
//! Multi-tick behavior of the tracker: ranking, capping, merges, and the
//! invariants that must hold for any sequence of ticks.

use std::collections::HashSet;

use arbridge_planes::{
    distance_to_plane, PlaneHandle, PlaneId, PlaneSnapshot, PlaneTracker, PlaneTrackerConfig,
    PlaneType, TrackingState,
};
use arbridge_shared::{Pose, Quaternion, Vec3, PLANE_RECORD_STRIDE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Camera hovering above the origin.
fn camera() -> Pose {
    Pose::from_position(Vec3::new(0.0, 10.0, 0.0))
}

/// Upward-facing plane whose distance to `camera()` is `distance`.
fn plane_at_distance(id: u64, distance: f32) -> PlaneSnapshot {
    PlaneSnapshot::new(PlaneId(id), Pose::from_position(Vec3::new(id as f32, 10.0 - distance, 0.0)))
}

fn handle(raw: u32) -> PlaneHandle {
    PlaneHandle::new(raw)
}

#[test]
fn test_distance_matches_reference_values() {
    let plane = Pose::IDENTITY;
    assert_eq!(distance_to_plane(&plane, &Pose::from_position(Vec3::new(0.0, 5.0, 0.0))), 5.0);
    assert_eq!(distance_to_plane(&plane, &Pose::from_position(Vec3::new(0.0, -3.0, 0.0))), -3.0);
}

#[test]
fn test_seven_planes_keep_five_farthest() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default());
    let live: Vec<_> = (1..=7).map(|d| plane_at_distance(d, d as f32)).collect();

    let diff = tracker.diff(&live, &camera(), 5);

    // Handles go out farthest first: distances 7, 6, 5, 4, 3.
    assert_eq!(diff.added, (0..5).map(handle).collect::<Vec<_>>());
    for (raw, id) in (0..5).zip([7, 6, 5, 4, 3]) {
        assert_eq!(tracker.registry().resolve(PlaneId(id)), Some(handle(raw)));
    }
    assert_eq!(tracker.registry().resolve(PlaneId(2)), None);
    assert_eq!(tracker.registry().resolve(PlaneId(1)), None);
}

#[test]
fn test_dropped_planes_come_back_when_ranking_changes() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default().with_max_output(2));
    let near = plane_at_distance(1, 1.0);
    let far = [plane_at_distance(2, 5.0), plane_at_distance(3, 6.0)];

    let first = tracker.diff(&[near, far[0], far[1]], &camera(), 2);
    assert_eq!(first.added.len(), 2);
    assert_eq!(tracker.registry().resolve(PlaneId(1)), None);

    // The far planes stop tracking; the near one now makes the cut.
    let lost = far.map(|p| p.with_tracking_state(TrackingState::Paused));
    let second = tracker.diff(&[near, lost[0], lost[1]], &camera(), 2);
    assert_eq!(second.added, vec![handle(2)]);
    assert!(second.updated.is_empty());
}

#[test]
fn test_vertical_plane_never_gets_handle() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default());
    let wall_rotation = Quaternion::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2);
    let wall = PlaneSnapshot::new(PlaneId(42), Pose::new(Vec3::new(0.0, 10.0, -1.0), wall_rotation))
        .with_type(PlaneType::Vertical);

    for state in [TrackingState::Tracking, TrackingState::Paused, TrackingState::Stopped] {
        let diff = tracker.diff(&[wall.with_tracking_state(state)], &camera(), 5);
        assert!(diff.is_empty());
    }
    assert_eq!(tracker.registry().resolve(PlaneId(42)), None);
}

#[test]
fn test_identical_ticks_are_idempotent() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default());
    let live: Vec<_> = (1..=4).map(|d| plane_at_distance(d, d as f32 * 0.5)).collect();

    let first = tracker.diff(&live, &camera(), 5);
    let second = tracker.diff(&live, &camera(), 5);
    let third = tracker.diff(&live, &camera(), 5);

    assert_eq!(second.updated, first.added);
    assert_eq!(third.updated, second.updated);
    assert!(second.added.is_empty() && second.removed.is_empty());
    assert!(third.added.is_empty() && third.removed.is_empty());
}

#[test]
fn test_merge_removes_once_and_never_returns() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default());
    let table = plane_at_distance(1, 1.0);
    let floor = plane_at_distance(2, 2.0);

    let added = tracker.diff(&[table, floor], &camera(), 5);
    let table_handle = tracker.registry().resolve(PlaneId(1)).unwrap();
    assert!(added.added.contains(&table_handle));

    // The table patch is absorbed into the floor.
    let merged = table.merged_into(PlaneId(2));
    let diff = tracker.diff(&[merged, floor], &camera(), 5);
    assert_eq!(diff.removed, vec![table_handle]);
    assert!(!diff.updated.contains(&table_handle));

    // Still subsumed: not reported again.
    let diff = tracker.diff(&[merged, floor], &camera(), 5);
    assert!(diff.removed.is_empty());

    // The tracker un-merges it: still gone for good.
    let diff = tracker.diff(&[table, floor], &camera(), 5);
    assert!(!diff.added.contains(&table_handle));
    assert!(!diff.updated.contains(&table_handle));
    assert_eq!(tracker.registry().resolve(PlaneId(1)), Some(table_handle));
}

#[test]
fn test_removed_does_not_consume_cap() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default().with_max_output(2));
    let live: Vec<_> = (1..=4).map(|d| plane_at_distance(d, d as f32)).collect();

    // Handles for the two farthest (4, 3), then for (2, 1) once those pause.
    let _ = tracker.diff(&live, &camera(), 2);
    let paused: Vec<_> = live[2..]
        .iter()
        .map(|p| p.with_tracking_state(TrackingState::Paused))
        .collect();
    let _ = tracker.diff(&[live[0], live[1], paused[0], paused[1]], &camera(), 2);

    // Both far planes merge; the two near ones must still be updated.
    let merged = [
        live[0],
        live[1],
        live[2].merged_into(PlaneId(1)),
        live[3].merged_into(PlaneId(1)),
    ];
    let diff = tracker.diff(&merged, &camera(), 2);
    assert_eq!(diff.removed.len(), 2);
    assert_eq!(diff.updated.len(), 2);
}

#[test]
fn test_frame_buffers_have_fixed_strides() {
    let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default());
    let live: Vec<_> = (1..=3).map(|d| plane_at_distance(d, d as f32)).collect();

    let frame = tracker.update(&live, &camera());
    assert_eq!(frame.added_count(), 3);
    assert_eq!(frame.added_info().len(), 3 * PLANE_RECORD_STRIDE);

    // First record is the farthest plane: handle 0, distance 3 → y = 7.
    let first = &frame.added_info()[..PLANE_RECORD_STRIDE];
    assert_eq!(first[0], 0.0);
    assert_eq!(first[6], 7.0);
    assert_eq!(frame.removed_info(), [-1; 5]);

    let frame = tracker.update(&live, &camera());
    assert_eq!(frame.added_count(), 0);
    assert_eq!(frame.updated_count(), 3);
    assert_eq!(frame.updated_info().len(), 3 * PLANE_RECORD_STRIDE);
}

/// Random plane soup: mixed types, states, heights, merges.
fn random_planes(rng: &mut StdRng, ids: u64) -> Vec<PlaneSnapshot> {
    let count = rng.gen_range(0..12);
    (0..count)
        .map(|_| {
            let id = rng.gen_range(0..ids);
            let mut plane = PlaneSnapshot::new(
                PlaneId(id),
                Pose::from_position(Vec3::new(
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(0.0..14.0),
                    rng.gen_range(-5.0..5.0),
                )),
            );
            if rng.gen_bool(0.2) {
                plane = plane.with_type(PlaneType::Vertical);
            }
            if rng.gen_bool(0.15) {
                plane = plane.with_tracking_state(TrackingState::Paused);
            }
            if rng.gen_bool(0.1) {
                plane = plane.merged_into(PlaneId(rng.gen_range(0..ids)));
            }
            plane
        })
        .collect()
}

#[test]
fn test_random_ticks_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(0xA11CE);

    for _ in 0..50 {
        let max_output = rng.gen_range(1..6);
        let mut tracker =
            PlaneTracker::new(PlaneTrackerConfig::default().with_max_output(max_output));
        let mut removed_ever = HashSet::new();
        let mut last_next = 0;

        for _ in 0..40 {
            let mut live = random_planes(&mut rng, 16);
            // The tracker reports each plane once per frame.
            let mut seen = HashSet::new();
            live.retain(|p| seen.insert(p.id));

            let diff = tracker.diff(&live, &camera(), max_output);

            // Pairwise disjoint.
            let added: HashSet<_> = diff.added.iter().copied().collect();
            let updated: HashSet<_> = diff.updated.iter().copied().collect();
            let removed: HashSet<_> = diff.removed.iter().copied().collect();
            assert!(added.is_disjoint(&updated));
            assert!(added.is_disjoint(&removed));
            assert!(updated.is_disjoint(&removed));

            // Cap applies to added + updated only.
            assert!(diff.emitted() <= max_output);

            // Added handles are fresh and strictly increasing.
            for h in &diff.added {
                assert!(h.get() >= last_next);
                last_next = h.get() + 1;
            }
            assert_eq!(tracker.registry().next_handle().get(), last_next);

            // Removed exactly once, never seen again.
            for h in &diff.removed {
                assert!(removed_ever.insert(*h), "handle {h:?} removed twice");
            }
            for h in diff.added.iter().chain(&diff.updated) {
                assert!(!removed_ever.contains(h), "retired handle {h:?} resurfaced");
            }
        }
    }
}
