//! # ARBRIDGE Plane Tracking
//!
//! Keeps stable integer handles for the transient plane objects an AR
//! tracker reports, and turns each frame's live planes into added /
//! updated / removed sets the engine can consume as flat `f32` buffers.
//!
//! ## Per-Tick Flow
//!
//! ```text
//! live planes ──► filter (tracking, horizontal, front-facing)
//!             ──► rank by distance, farthest first
//!             ──► resolve / allocate handles (registry)
//!             ──► added / updated / removed
//!             ──► 12-wide records + fixed removed slots
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use arbridge_planes::{PlaneTracker, PlaneTrackerConfig};
//!
//! let mut tracker = PlaneTracker::new(PlaneTrackerConfig::default());
//! let frame = tracker.update(&live_planes, &camera_pose);
//! engine.upload(frame.added_info(), frame.updated_info(), frame.removed_info());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod differ;
pub mod error;
pub mod geometry;
pub mod plane;
pub mod registry;
pub mod serializer;

pub use config::PlaneTrackerConfig;
pub use differ::{PlaneDiff, PlaneTracker, TrackerStats};
pub use error::{PlaneError, PlaneResult};
pub use geometry::distance_to_plane;
pub use plane::{PlaneHandle, PlaneId, PlaneSnapshot, PlaneType, TrackingState};
pub use registry::PlaneRegistry;
pub use serializer::{PlaneFrame, PlaneRecord};
