//! # ARBRIDGE Core
//!
//! Frame publishing between the tracking tick and engine readers.
//!
//! ## Architecture Rules
//!
//! 1. **One writer** - the session tick is the only producer
//! 2. **Whole frames** - readers never observe a half-written tick
//! 3. **Publish at end of frame** - nothing is visible until `publish()`
//!
//! ## Example
//!
//! ```rust,ignore
//! use arbridge_core::FrameBuffer;
//!
//! let frames = FrameBuffer::new(Vec::<u32>::new());
//! frames.write().push(1);
//! frames.publish();
//! assert_eq!(frames.snapshot(), vec![1]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod sync;

pub use sync::{FrameBuffer, FrameReader, FrameWriteGuard};
