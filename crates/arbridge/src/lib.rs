//! # ARBRIDGE
//!
//! Bridges a vendor AR SDK to a game engine: session lifecycle, camera
//! buffers and plane tracking, exposed as flat numeric buffers the engine
//! pulls once per frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   lifecycle    ┌─────────────────────────────────────┐
//! │ Host engine  │───────────────►│ ArSession<B>                        │
//! │              │                │  ├─ AvailabilityMonitor             │
//! │              │   pull buffers │  ├─ CameraState                     │
//! │              │◄───────────────│  ├─ PlaneTracker (arbridge_planes)  │
//! └──────────────┘                │  └─ FrameBuffer  (arbridge_core)    │
//!                                 └──────────────┬──────────────────────┘
//! ┌──────────────┐  PlatformEvent                │ TrackingBackend
//! │ UI callbacks │──────────────► (channel)      ▼
//! └──────────────┘                        vendor AR SDK
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use arbridge::{ArConfig, ArSession};
//!
//! let config = ArConfig::from_file("arbridge.toml")?;
//! let mut session = ArSession::new(MyBackend::new(), config)?;
//! session.start();
//!
//! loop {
//!     session.poll_availability(frame_time);
//!     session.update();
//!     engine.upload_planes(session.added_planes_info(), session.removed_planes_info());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod availability;
pub mod backend;
pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod snapshot;

pub use availability::{AvailabilityMonitor, AvailabilityState};
pub use backend::{FrameUpdate, InstallStatus, SdkAvailability, TrackingBackend};
pub use camera::{CameraFrame, CameraState};
pub use config::ArConfig;
pub use error::{SessionError, SessionResult};
pub use events::{platform_channel, PlatformEvent, PlatformEventReceiver, PlatformEventSender};
pub use session::{ArSession, SessionPhase, SessionStats};
pub use snapshot::ArFrameSnapshot;

pub use arbridge_planes::{
    PlaneHandle, PlaneId, PlaneSnapshot, PlaneTrackerConfig, PlaneType, TrackingState,
};
pub use arbridge_shared::{Matrix4, Pose, Quaternion, Vec3};
