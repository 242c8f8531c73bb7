//! # ARBRIDGE Shared
//!
//! Common types used by the plane tracker, the session adapter and the
//! engine-side consumer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a vendor AR SDK binding
//! - any GPU or window-related crate
//!
//! Vendor types live behind `arbridge::TrackingBackend`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_FAR_CLIP, DEFAULT_MAX_PLANES, DEFAULT_NEAR_CLIP, MATRIX_LEN, NDC_QUAD,
    PLANE_RECORD_STRIDE, POSE_LEN, REMOVED_PLANE_SLOTS, REMOVED_SENTINEL, TEX_COORDS_LEN,
};
pub use math::{Matrix4, Pose, Quaternion, Vec3, IDENTITY_MATRIX};
