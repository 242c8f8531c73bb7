//! # Session Configuration
//!
//! Loaded once at startup.
//!
//! ```toml
//! plane_detection = true
//! near_clip = 0.01
//! far_clip = 1000.0
//! availability_poll_ms = 200
//! event_capacity = 64
//!
//! [planes]
//! max_output = 5
//! ```

use std::path::Path;
use std::time::Duration;

use arbridge_planes::PlaneTrackerConfig;
use arbridge_shared::{DEFAULT_FAR_CLIP, DEFAULT_NEAR_CLIP};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Default interval between availability re-checks while the SDK is still deciding.
pub const DEFAULT_AVAILABILITY_POLL_MS: u64 = 200;

/// Default capacity of the platform event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Configuration for [`crate::ArSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArConfig {
    /// Run the plane differ each tick. Ignored by backends without plane support.
    pub plane_detection: bool,
    /// Projection near clip distance (meters).
    pub near_clip: f32,
    /// Projection far clip distance (meters).
    pub far_clip: f32,
    /// Availability re-check interval while the SDK reports a transient answer.
    pub availability_poll_ms: u64,
    /// Capacity of the platform event channel.
    pub event_capacity: usize,
    /// Plane tracker settings.
    pub planes: PlaneTrackerConfig,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            plane_detection: true,
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
            availability_poll_ms: DEFAULT_AVAILABILITY_POLL_MS,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            planes: PlaneTrackerConfig::default(),
        }
    }
}

impl ArConfig {
    /// Availability re-check interval.
    #[inline]
    #[must_use]
    pub const fn availability_poll_interval(&self) -> Duration {
        Duration::from_millis(self.availability_poll_ms)
    }

    /// Enables or disables plane detection.
    #[must_use]
    pub const fn with_plane_detection(mut self, enabled: bool) -> Self {
        self.plane_detection = enabled;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] for bad clip distances, a zero
    /// poll interval or a zero channel capacity, and [`SessionError::Planes`]
    /// if the tracker settings are invalid.
    pub fn validate(&self) -> SessionResult<()> {
        if !(self.near_clip.is_finite() && self.far_clip.is_finite()) {
            return Err(SessionError::InvalidConfig(
                "clip distances must be finite".to_string(),
            ));
        }
        if self.near_clip <= 0.0 || self.near_clip >= self.far_clip {
            return Err(SessionError::InvalidConfig(format!(
                "need 0 < near_clip < far_clip, got {} and {}",
                self.near_clip, self.far_clip
            )));
        }
        if self.availability_poll_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "availability_poll_ms must be at least 1".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(SessionError::InvalidConfig(
                "event_capacity must be at least 1".to_string(),
            ));
        }
        self.planes.validate()?;
        Ok(())
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] for malformed TOML, unknown
    /// keys or out-of-range values.
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SessionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConfigIo`] if the file can't be read, and
    /// the errors of [`ArConfig::from_toml_str`] otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SessionError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
