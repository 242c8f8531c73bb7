//! # Platform Events
//!
//! Permission results and display changes are delivered on platform
//! threads. They are queued here and applied at the start of the next
//! [`crate::ArSession::update`], so the session itself stays single-threaded.
//!
//! ```text
//! UI thread ──► PlatformEventSender ──► [bounded channel] ──► ArSession::update()
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Something the platform told us outside the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user answered the camera permission prompt.
    CameraPermission {
        /// Whether access was granted.
        granted: bool,
    },

    /// The display was rotated or the viewport resized.
    DisplayChanged {
        /// Display rotation as reported by the platform.
        rotation: i32,
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
}

/// Creates a connected sender/receiver pair with room for `capacity` events.
#[must_use]
pub fn platform_channel(capacity: usize) -> (PlatformEventSender, PlatformEventReceiver) {
    let (sender, receiver) = bounded(capacity);
    (
        PlatformEventSender { sender },
        PlatformEventReceiver { receiver },
    )
}

/// Handle for platform callbacks. Clone one per callback site.
#[derive(Clone, Debug)]
pub struct PlatformEventSender {
    sender: Sender<PlatformEvent>,
}

impl PlatformEventSender {
    /// Queues an event without blocking.
    ///
    /// Returns `false` if the queue is full or the session is gone; the
    /// event is dropped.
    #[inline]
    pub fn send(&self, event: PlatformEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "platform event queue full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Reports the camera permission answer.
    pub fn camera_permission(&self, granted: bool) -> bool {
        self.send(PlatformEvent::CameraPermission { granted })
    }

    /// Reports a display rotation or resize.
    pub fn display_changed(&self, rotation: i32, width: u32, height: u32) -> bool {
        self.send(PlatformEvent::DisplayChanged {
            rotation,
            width,
            height,
        })
    }
}

/// Receiving end, owned by the session.
#[derive(Debug)]
pub struct PlatformEventReceiver {
    receiver: Receiver<PlatformEvent>,
}

impl PlatformEventReceiver {
    /// Takes one pending event, if any.
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<PlatformEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of queued events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
