//! # AR Session
//!
//! The context object the host engine owns for the lifetime of an AR
//! session. It drives a [`TrackingBackend`] through the lifecycle and
//! publishes one [`ArFrameSnapshot`] per tick.
//!
//! ## Lifecycle
//!
//! ```text
//!            start()/resume()               pause()
//!   Absent ─────────────────► Running ◄──────────────► Paused
//!     ▲                          │        resume()        │
//!     └──────── destroy() ───────┴────────────────────────┘
//! ```
//!
//! ## Per Tick
//!
//! ```text
//! update():
//!   1. apply queued platform events
//!   2. not running?      → publish empty planes, done
//!   3. backend.update()  → failed? publish empty planes, done
//!   4. refresh camera buffers
//!   5. plane diff (if enabled and supported)
//!   6. publish snapshot
//! ```
//!
//! Lifecycle calls never panic. A failure is logged, kept in
//! [`ArSession::last_error`], and leaves the session in a state where the
//! next tick is skipped rather than run against a broken backend.

use std::sync::Arc;
use std::time::Duration;

use arbridge_core::{FrameBuffer, FrameReader};
use arbridge_planes::{PlaneSnapshot, PlaneTracker, TrackingState};
use arbridge_shared::{Matrix4, Pose, POSE_LEN, REMOVED_PLANE_SLOTS, TEX_COORDS_LEN};

use crate::availability::{AvailabilityMonitor, AvailabilityState};
use crate::backend::TrackingBackend;
use crate::camera::CameraState;
use crate::config::ArConfig;
use crate::error::{SessionError, SessionResult};
use crate::events::{platform_channel, PlatformEvent, PlatformEventReceiver, PlatformEventSender};
use crate::snapshot::ArFrameSnapshot;

/// Where the backend session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No backend session exists.
    #[default]
    Absent,
    /// A session exists but the camera is stopped.
    Paused,
    /// The session is resumed; ticks run.
    Running,
}

/// Counters for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// `update()` calls.
    pub updates: u64,
    /// Ticks skipped because no session was running.
    pub skipped_no_session: u64,
    /// Ticks skipped because the backend failed to advance.
    pub skipped_update_failed: u64,
    /// Platform events applied.
    pub events_applied: u64,
}

/// An AR session bound to one tracking backend.
pub struct ArSession<B: TrackingBackend> {
    backend: B,
    config: ArConfig,
    phase: SessionPhase,
    availability: AvailabilityMonitor,
    /// `start()` is waiting on permission or availability.
    pending_start: bool,
    tracker: PlaneTracker,
    camera: CameraState,
    /// Reused across ticks.
    live_planes: Vec<PlaneSnapshot>,
    frames: Arc<FrameBuffer<ArFrameSnapshot>>,
    events: PlatformEventReceiver,
    event_sender: PlatformEventSender,
    last_error: Option<SessionError>,
    stats: SessionStats,
}

impl<B: TrackingBackend> ArSession<B> {
    /// Creates a session context. No backend session is opened yet.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is out of range.
    pub fn new(backend: B, config: ArConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self::build(backend, config))
    }

    /// Creates a session context with default configuration.
    #[must_use]
    pub fn with_defaults(backend: B) -> Self {
        Self::build(backend, ArConfig::default())
    }

    fn build(backend: B, config: ArConfig) -> Self {
        let (event_sender, events) = platform_channel(config.event_capacity);
        Self {
            availability: AvailabilityMonitor::new(config.availability_poll_interval()),
            tracker: PlaneTracker::new(config.planes.clone()),
            camera: CameraState::new(config.near_clip, config.far_clip),
            live_planes: Vec::new(),
            frames: FrameBuffer::new(ArFrameSnapshot::default()),
            events,
            event_sender,
            backend,
            config,
            phase: SessionPhase::Absent,
            pending_start: false,
            last_error: None,
            stats: SessionStats::default(),
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Starts (or resumes) the session.
    ///
    /// Requests camera permission if missing and checks availability.
    /// Returns true if the session is running afterwards. When the answer
    /// is pending (permission prompt, SDK still checking) the start is
    /// remembered and completed later by [`ArSession::update`] or
    /// [`ArSession::poll_availability`].
    pub fn start(&mut self) -> bool {
        if self.phase == SessionPhase::Running {
            return true;
        }

        if !self.backend.has_camera_permission() {
            tracing::info!("camera permission missing, requesting");
            self.backend.request_camera_permission();
            self.pending_start = true;
            return false;
        }

        let state = self.availability.check(&mut self.backend);
        self.continue_start(state)
    }

    /// Same as [`ArSession::start`].
    pub fn resume(&mut self) -> bool {
        self.start()
    }

    /// Pauses the backend session. No-op unless running.
    pub fn pause(&mut self) {
        self.pending_start = false;
        if self.phase != SessionPhase::Running {
            return;
        }
        self.backend.pause_session();
        self.phase = SessionPhase::Paused;
        tracing::info!("AR session paused");
    }

    /// Closes the backend session and drops every plane handle.
    ///
    /// The plane registry and availability are reset even when no backend
    /// session is open, e.g. after a resume lost the camera.
    pub fn destroy(&mut self) {
        self.pending_start = false;
        if self.phase != SessionPhase::Absent {
            self.backend.close_session();
            self.phase = SessionPhase::Absent;
            tracing::info!("AR session destroyed");
        }

        self.tracker.reset();
        self.availability.reset();
        self.publish(TrackingState::Stopped, None);
    }

    /// Advances the availability poll timer by `elapsed`.
    ///
    /// While the SDK keeps answering "checking", it is re-queried once per
    /// poll interval; a pending start completes once it reports ready.
    pub fn poll_availability(&mut self, elapsed: Duration) -> AvailabilityState {
        if let Some(state) = self.availability.poll(elapsed, &mut self.backend) {
            if self.pending_start {
                self.continue_start(state);
            }
        }
        self.availability.state()
    }

    fn continue_start(&mut self, state: AvailabilityState) -> bool {
        match state {
            AvailabilityState::Ready => {
                self.pending_start = false;
                self.open_and_resume()
            }
            AvailabilityState::Checking | AvailabilityState::Unknown => {
                tracing::debug!("AR availability pending, start deferred");
                self.pending_start = true;
                false
            }
            AvailabilityState::NeedsInstall => {
                self.pending_start = false;
                self.record(SessionError::NotInstalled);
                false
            }
            AvailabilityState::Unsupported => {
                self.pending_start = false;
                self.record(SessionError::DeviceIncompatible);
                false
            }
        }
    }

    fn open_and_resume(&mut self) -> bool {
        if self.phase == SessionPhase::Absent {
            if let Err(error) = self.backend.create_session() {
                self.record(error);
                return false;
            }
            self.phase = SessionPhase::Paused;
            self.camera.invalidate_tex_coords();
            tracing::info!("AR session created");
        }

        match self.backend.resume_session() {
            Ok(()) => {
                self.phase = SessionPhase::Running;
                self.last_error = None;
                tracing::info!("AR session running");
                true
            }
            Err(SessionError::CameraUnavailable) => {
                self.backend.close_session();
                self.phase = SessionPhase::Absent;
                self.record(SessionError::CameraUnavailable);
                false
            }
            Err(error) => {
                self.record(error);
                false
            }
        }
    }

    fn record(&mut self, error: SessionError) {
        tracing::warn!(%error, phase = ?self.phase, "AR session error");
        self.last_error = Some(error);
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Runs one tick and publishes its snapshot.
    ///
    /// Returns true if the backend produced a frame. A skipped tick still
    /// publishes, with empty plane outputs.
    pub fn update(&mut self) -> bool {
        self.stats.updates += 1;
        self.drain_events();

        if self.phase != SessionPhase::Running {
            self.stats.skipped_no_session += 1;
            tracing::trace!(phase = ?self.phase, "no running AR session, tick skipped");
            self.publish(TrackingState::Stopped, None);
            return false;
        }

        let frame = match self.backend.update() {
            Ok(frame) => frame,
            Err(error) => {
                self.stats.skipped_update_failed += 1;
                self.record(error);
                self.publish(TrackingState::Stopped, None);
                return false;
            }
        };

        let viewpoint = self.camera.refresh(&self.backend, &frame).pose;

        let run_planes = self.config.plane_detection && self.backend.supports_planes();
        if run_planes {
            self.live_planes.clear();
            self.backend.live_planes(&mut self.live_planes);
        }
        self.publish(frame.camera_tracking, run_planes.then_some(&viewpoint));
        true
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.try_recv() {
            self.stats.events_applied += 1;
            match event {
                PlatformEvent::CameraPermission { granted: true } => {
                    tracing::info!("camera permission granted");
                    if self.pending_start {
                        self.start();
                    }
                }
                PlatformEvent::CameraPermission { granted: false } => {
                    self.pending_start = false;
                    self.record(SessionError::PermissionDenied);
                }
                PlatformEvent::DisplayChanged {
                    rotation,
                    width,
                    height,
                } => self.set_display_geometry(rotation, width, height),
            }
        }
    }

    /// Writes the back buffer and flips it. The plane diff only runs when
    /// `viewpoint` is given; otherwise plane outputs are empty.
    fn publish(&mut self, tracking: TrackingState, viewpoint: Option<&Pose>) {
        let frame = self.frames.frame_count();
        // `&mut self` makes this the only writer; the guard is held before
        // the diff touches the registry.
        let mut back = self.frames.write();
        back.frame = frame;
        back.tracking = tracking;
        back.camera = *self.camera.frame();
        match viewpoint {
            Some(viewpoint) => back.planes = self.tracker.update(&self.live_planes, viewpoint),
            None => back.planes.clear(),
        }
        drop(back);
        self.frames.publish();
    }

    // =========================================================================
    // HOST CALLS
    // =========================================================================

    /// Returns true when a backend session exists.
    #[inline]
    #[must_use]
    pub fn check_start(&self) -> bool {
        self.phase != SessionPhase::Absent
    }

    /// Tells the backend which texture receives the camera image.
    ///
    /// Ignored while no session exists.
    pub fn set_camera_texture_name(&mut self, texture_id: u32) {
        if self.phase == SessionPhase::Absent {
            tracing::debug!(texture_id, "no AR session, camera texture ignored");
            return;
        }
        self.backend.set_camera_texture_name(texture_id);
    }

    /// Tells the backend the display rotation and viewport size.
    ///
    /// Ignored while no session exists. Texture coordinates are
    /// re-queried on the next frame.
    pub fn set_display_geometry(&mut self, rotation: i32, width: u32, height: u32) {
        if self.phase == SessionPhase::Absent {
            tracing::debug!(rotation, width, height, "no AR session, display change ignored");
            return;
        }
        self.backend.set_display_geometry(rotation, width, height);
        self.camera.invalidate_tex_coords();
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current availability state.
    #[inline]
    #[must_use]
    pub const fn availability(&self) -> AvailabilityState {
        self.availability.state()
    }

    /// Availability as the host's integer code: 1 ready, 0 needs install, -1 otherwise.
    #[inline]
    #[must_use]
    pub const fn availability_code(&self) -> i32 {
        self.availability.state().code()
    }

    /// Returns true while a start waits on permission or availability.
    #[inline]
    #[must_use]
    pub const fn is_start_pending(&self) -> bool {
        self.pending_start
    }

    /// Last recorded failure, cleared when the session starts running.
    #[inline]
    #[must_use]
    pub const fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Session configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ArConfig {
        &self.config
    }

    /// Diagnostic counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The plane tracker, for inspection.
    #[inline]
    #[must_use]
    pub const fn tracker(&self) -> &PlaneTracker {
        &self.tracker
    }

    /// The backend.
    #[inline]
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Sender for platform callbacks. Clone freely.
    #[must_use]
    pub fn event_sender(&self) -> PlatformEventSender {
        self.event_sender.clone()
    }

    /// Reader handle for engine threads.
    #[must_use]
    pub fn reader(&self) -> FrameReader<ArFrameSnapshot> {
        self.frames.reader()
    }

    /// Copy of the last published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ArFrameSnapshot {
        self.frames.snapshot()
    }

    /// Camera pose of the last published tick.
    #[must_use]
    pub fn camera_pose(&self) -> [f32; POSE_LEN] {
        self.frames.read().camera_pose()
    }

    /// View matrix of the last published tick.
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4 {
        *self.frames.read().view_matrix()
    }

    /// Projection matrix of the last published tick.
    #[must_use]
    pub fn projection_matrix(&self) -> Matrix4 {
        *self.frames.read().projection_matrix()
    }

    /// Camera texture coordinates of the last published tick.
    #[must_use]
    pub fn camera_tex_coords(&self) -> [f32; TEX_COORDS_LEN] {
        *self.frames.read().camera_tex_coords()
    }

    /// Planes added in the last published tick.
    #[must_use]
    pub fn added_planes_count(&self) -> usize {
        self.frames.read().added_planes_count()
    }

    /// Added plane records of the last published tick.
    #[must_use]
    pub fn added_planes_info(&self) -> Vec<f32> {
        self.frames.read().added_planes_info().to_vec()
    }

    /// Planes updated in the last published tick.
    #[must_use]
    pub fn updated_planes_count(&self) -> usize {
        self.frames.read().updated_planes_count()
    }

    /// Updated plane records of the last published tick.
    #[must_use]
    pub fn updated_planes_info(&self) -> Vec<f32> {
        self.frames.read().updated_planes_info().to_vec()
    }

    /// Planes removed in the last published tick.
    #[must_use]
    pub fn removed_planes_count(&self) -> usize {
        self.frames.read().removed_planes_count()
    }

    /// Removed handles of the last published tick, padded with -1.
    #[must_use]
    pub fn removed_planes_info(&self) -> [i32; REMOVED_PLANE_SLOTS] {
        self.frames.read().removed_planes_info()
    }
}

impl<B: TrackingBackend> Drop for ArSession<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
