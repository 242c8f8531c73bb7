//! # Synchronization Primitives for Frame Publishing
//!
//! ## The Problem
//!
//! ```text
//! Tick thread:    WRITE added/updated/removed planes, camera pose
//! Engine thread:  READ the last finished tick
//!
//! Without synchronization: reader sees planes from tick N with pose of N+1
//! ```
//!
//! ## The Solution: Double Buffering
//!
//! ```text
//! Frame N:
//!   Tick writes to Buffer A
//!   Readers read Buffer B (last published frame)
//!
//! Frame N+1:
//!   PUBLISH (atomic index flip)
//!   Tick writes to Buffer B
//!   Readers read Buffer A
//! ```

mod double_buffer;

pub use double_buffer::{FrameBuffer, FrameReader, FrameWriteGuard};
