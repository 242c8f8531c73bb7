//! # Double-Buffered Frame Snapshots
//!
//! Concurrent access for the tracking tick and engine-side readers.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │        FrameBuffer<T>       │
//!                    │                             │
//!                    │  ┌─────────┐  ┌─────────┐  │
//!                    │  │ Frame A │  │ Frame B │  │
//!                    │  └────┬────┘  └────┬────┘  │
//!                    │       │            │       │
//!                    │  ┌────┴────────────┴────┐  │
//!                    │  │ Atomic Front (0/1)   │  │
//!                    │  └──────────────────────┘  │
//!                    └─────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!      ┌──────────────┐ ┌────────────┐ ┌────────────┐
//!      │ WriteGuard   │ │ FrameReader│ │  publish() │
//!      │ (tick)       │ │ (engine)   │ │  (flip)    │
//!      └──────────────┘ └────────────┘ └────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! - `FrameWriteGuard`: exclusive access to the back buffer (one per tick)
//! - `read()`: shared access to the front buffer (many allowed)
//! - `publish()`: index flip, called by the writer at end of tick
//!
//! Readers should not hold a guard across ticks; `publish()` waits for
//! readers of the buffer it is about to recycle.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Double-buffered frame state.
///
/// The writer fills the back buffer during a tick and calls
/// [`FrameBuffer::publish`] once the tick is complete. Readers always see
/// the last published frame in full.
///
/// ## Usage
///
/// ```rust,ignore
/// let frames = FrameBuffer::new(FrameState::default());
///
/// // Tick
/// {
///     let mut back = frames.write();
///     back.pose = pose;
///     back.planes = planes;
/// }
/// frames.publish();
///
/// // Engine thread
/// let front = frames.read();
/// render(&front.planes);
/// ```
pub struct FrameBuffer<T> {
    /// The two frame buffers.
    buffers: [RwLock<T>; 2],

    /// Index of the published buffer (0 or 1).
    /// The back buffer is always (front ^ 1).
    front: AtomicUsize,

    /// Whether a write guard is currently held.
    write_locked: AtomicBool,

    /// Number of publishes so far.
    frame_count: AtomicU64,
}

impl<T: Clone> FrameBuffer<T> {
    /// Creates a new double buffer with both halves set to `initial`.
    #[must_use]
    pub fn new(initial: T) -> Arc<Self> {
        Arc::new(Self {
            buffers: [RwLock::new(initial.clone()), RwLock::new(initial)],
            front: AtomicUsize::new(0),
            write_locked: AtomicBool::new(false),
            frame_count: AtomicU64::new(0),
        })
    }

    /// Returns the number of frames published so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::Acquire)
    }

    /// Returns whether a write guard is currently active.
    #[inline]
    #[must_use]
    pub fn is_write_locked(&self) -> bool {
        self.write_locked.load(Ordering::Acquire)
    }

    /// Gets write access to the back buffer.
    ///
    /// # Panics
    ///
    /// Panics if a write guard is already held (only one allowed).
    #[must_use]
    pub fn write(&self) -> FrameWriteGuard<'_, T> {
        self.try_write()
            .expect("Double write handle! Only one write handle allowed at a time.")
    }

    /// Gets write access to the back buffer, or `None` if a writer is active.
    #[must_use]
    pub fn try_write(&self) -> Option<FrameWriteGuard<'_, T>> {
        if self.write_locked.swap(true, Ordering::AcqRel) {
            return None;
        }

        let back = self.front.load(Ordering::Acquire) ^ 1;
        Some(FrameWriteGuard {
            owner: self,
            guard: self.buffers[back].write(),
        })
    }

    /// Gets shared access to the last published frame.
    ///
    /// Never returns a buffer the writer is filling.
    #[must_use]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        loop {
            let front = self.front.load(Ordering::Acquire);
            let guard = self.buffers[front].read();

            // A publish may have recycled this buffer between the load and the lock.
            if self.front.load(Ordering::Acquire) == front {
                return guard;
            }
        }
    }

    /// Returns a copy of the last published frame.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.read().clone()
    }

    /// Publishes the back buffer.
    ///
    /// After the flip the new back buffer still holds the frame before
    /// last; it is refreshed from the frame just published so the next
    /// tick starts from current state.
    ///
    /// # Panics
    ///
    /// Panics if a write guard is still active.
    pub fn publish(&self) {
        assert!(
            !self.write_locked.load(Ordering::Acquire),
            "Cannot publish while write handle is active!"
        );

        let old_front = self.front.fetch_xor(1, Ordering::AcqRel);
        let new_front = old_front ^ 1;

        {
            let fresh = self.buffers[new_front].read();
            let mut stale = self.buffers[old_front].write();
            stale.clone_from(&fresh);
        }

        self.frame_count.fetch_add(1, Ordering::AcqRel);
    }

    /// Creates a reader handle for another thread.
    #[must_use]
    pub fn reader(self: &Arc<Self>) -> FrameReader<T> {
        FrameReader {
            frames: Arc::clone(self),
        }
    }
}

/// Write guard for the tick.
///
/// Provides exclusive mutable access to the back buffer.
/// Only one write guard can exist at a time.
pub struct FrameWriteGuard<'a, T> {
    owner: &'a FrameBuffer<T>,
    guard: RwLockWriteGuard<'a, T>,
}

impl<T> Deref for FrameWriteGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for FrameWriteGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<T> Drop for FrameWriteGuard<'_, T> {
    fn drop(&mut self) {
        self.owner.write_locked.store(false, Ordering::Release);
    }
}

/// Reader handle for engine threads.
///
/// Cheap to clone (just increments a refcount).
pub struct FrameReader<T> {
    frames: Arc<FrameBuffer<T>>,
}

impl<T: Clone> FrameReader<T> {
    /// Gets shared access to the last published frame.
    #[must_use]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.frames.read()
    }

    /// Returns a copy of the last published frame.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.frames.snapshot()
    }

    /// Returns the number of frames published so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }
}

impl<T> Clone for FrameReader<T> {
    fn clone(&self) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
        }
    }
}
