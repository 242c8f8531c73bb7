//! Scriptable tracking backend shared by the session tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use arbridge::{
    FrameUpdate, InstallStatus, Matrix4, PlaneSnapshot, Pose, SdkAvailability, SessionError,
    SessionResult, TrackingBackend, TrackingState,
};
use arbridge_shared::{IDENTITY_MATRIX, TEX_COORDS_LEN};

/// Calls the session made, in order.
pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

/// In-memory backend. Every field is a knob the test turns.
pub struct FakeBackend {
    pub log: CallLog,
    pub permission: bool,
    /// Availability answers, consumed in order; `SupportedInstalled` once empty.
    pub availability: VecDeque<SdkAvailability>,
    pub install: InstallStatus,
    pub create_error: Option<SessionError>,
    pub resume_error: Option<SessionError>,
    pub fail_updates: bool,
    /// Reported on the next update only.
    pub geometry_changed: bool,
    pub camera_tracking: TrackingState,
    pub pose: Pose,
    pub plane_support: bool,
    pub planes: Vec<PlaneSnapshot>,
    /// Added to every texture coordinate.
    pub uv_offset: f32,
    pub uv_queries: Cell<u32>,
    pub texture: Option<u32>,
    pub display: Option<(i32, u32, u32)>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            permission: true,
            availability: VecDeque::new(),
            install: InstallStatus::Installed,
            create_error: None,
            resume_error: None,
            fail_updates: false,
            geometry_changed: false,
            camera_tracking: TrackingState::Tracking,
            pose: Pose::IDENTITY,
            plane_support: true,
            planes: Vec::new(),
            uv_offset: 0.0,
            uv_queries: Cell::new(0),
            texture: None,
            display: None,
        }
    }

    pub fn with_availability(mut self, answers: &[SdkAvailability]) -> Self {
        self.availability = answers.iter().copied().collect();
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.log.borrow().iter().filter(|c| **c == call).count()
    }

    fn note(&self, call: &'static str) {
        self.log.borrow_mut().push(call);
    }
}

impl TrackingBackend for FakeBackend {
    fn has_camera_permission(&self) -> bool {
        self.permission
    }

    fn request_camera_permission(&mut self) {
        self.note("request_permission");
    }

    fn check_availability(&mut self) -> SdkAvailability {
        self.note("check_availability");
        self.availability
            .pop_front()
            .unwrap_or(SdkAvailability::SupportedInstalled)
    }

    fn request_install(&mut self) -> SessionResult<InstallStatus> {
        self.note("request_install");
        Ok(self.install)
    }

    fn create_session(&mut self) -> SessionResult<()> {
        self.note("create");
        match self.create_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn resume_session(&mut self) -> SessionResult<()> {
        self.note("resume");
        match self.resume_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn pause_session(&mut self) {
        self.note("pause");
    }

    fn close_session(&mut self) {
        self.note("close");
    }

    fn set_display_geometry(&mut self, rotation: i32, width: u32, height: u32) {
        self.note("display_geometry");
        self.display = Some((rotation, width, height));
    }

    fn set_camera_texture_name(&mut self, texture_id: u32) {
        self.note("texture");
        self.texture = Some(texture_id);
    }

    fn update(&mut self) -> SessionResult<FrameUpdate> {
        if self.fail_updates {
            return Err(SessionError::FrameUpdate("camera not available".to_string()));
        }
        Ok(FrameUpdate {
            camera_tracking: self.camera_tracking,
            display_geometry_changed: std::mem::take(&mut self.geometry_changed),
        })
    }

    fn camera_pose(&self) -> Pose {
        self.pose
    }

    fn view_matrix(&self) -> Matrix4 {
        let mut view = IDENTITY_MATRIX;
        view[12] = -self.pose.position.x;
        view[13] = -self.pose.position.y;
        view[14] = -self.pose.position.z;
        view
    }

    /// Echoes the clip planes so tests can see them.
    fn projection_matrix(&self, near: f32, far: f32) -> Matrix4 {
        let mut projection = [0.0; 16];
        projection[0] = near;
        projection[1] = far;
        projection
    }

    fn transform_display_uv(&self, ndc: &[f32; TEX_COORDS_LEN]) -> [f32; TEX_COORDS_LEN] {
        self.uv_queries.set(self.uv_queries.get() + 1);
        ndc.map(|v| (v + 1.0) * 0.5 + self.uv_offset)
    }

    fn supports_planes(&self) -> bool {
        self.plane_support
    }

    fn live_planes(&self, out: &mut Vec<PlaneSnapshot>) {
        out.extend_from_slice(&self.planes);
    }
}
