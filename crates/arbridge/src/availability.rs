//! # Availability State Machine
//!
//! ```text
//!              check()
//!   Unknown ──────────► Checking ──(every poll interval)──► check() again
//!      │                    │
//!      └────────────────────┴──► Ready | NeedsInstall | Unsupported
//! ```
//!
//! The SDK may answer "still checking" for a while after process start.
//! Instead of sleeping on a timer thread, the session ticks the monitor
//! with elapsed time and it re-queries once the poll interval has passed.

use std::time::Duration;

use crate::backend::{InstallStatus, SdkAvailability, TrackingBackend};

/// Where the device stands with respect to running AR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AvailabilityState {
    /// Never checked.
    #[default]
    Unknown,
    /// The SDK hasn't decided; re-polled periodically.
    Checking,
    /// AR can run.
    Ready,
    /// The services must be installed or updated first.
    NeedsInstall,
    /// AR can't run on this device.
    Unsupported,
}

impl AvailabilityState {
    /// Numeric code handed to the host: 1 ready, 0 needs install, -1 otherwise.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Ready => 1,
            Self::NeedsInstall => 0,
            Self::Unknown | Self::Checking | Self::Unsupported => -1,
        }
    }

    /// Returns true once the SDK has given a final answer.
    #[inline]
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Ready | Self::NeedsInstall | Self::Unsupported)
    }
}

/// Tracks availability and re-polls while it is transient.
#[derive(Clone, Debug)]
pub struct AvailabilityMonitor {
    state: AvailabilityState,
    poll_interval: Duration,
    /// Time since the last query while `Checking`.
    accumulator: Duration,
    /// SDK queries issued.
    checks: u64,
}

impl AvailabilityMonitor {
    /// Creates a monitor in the `Unknown` state.
    #[must_use]
    pub const fn new(poll_interval: Duration) -> Self {
        Self {
            state: AvailabilityState::Unknown,
            poll_interval,
            accumulator: Duration::ZERO,
            checks: 0,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> AvailabilityState {
        self.state
    }

    /// Number of SDK queries issued so far.
    #[inline]
    #[must_use]
    pub const fn checks(&self) -> u64 {
        self.checks
    }

    /// Queries the SDK now, requesting an install if that would help.
    pub fn check<B: TrackingBackend + ?Sized>(&mut self, backend: &mut B) -> AvailabilityState {
        self.checks += 1;
        self.accumulator = Duration::ZERO;

        let answer = backend.check_availability();
        let next = match answer {
            SdkAvailability::SupportedInstalled => AvailabilityState::Ready,
            SdkAvailability::SupportedApkTooOld | SdkAvailability::SupportedNotInstalled => {
                match backend.request_install() {
                    Ok(InstallStatus::Installed) => AvailabilityState::Ready,
                    Ok(InstallStatus::InstallRequested) => AvailabilityState::NeedsInstall,
                    Err(error) => {
                        tracing::warn!(%error, "AR services install request failed");
                        AvailabilityState::NeedsInstall
                    }
                }
            }
            SdkAvailability::UnknownChecking => AvailabilityState::Checking,
            SdkAvailability::UnknownError
            | SdkAvailability::UnknownTimedOut
            | SdkAvailability::UnsupportedDeviceNotCapable => AvailabilityState::Unsupported,
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, ?answer, "AR availability changed");
        }
        self.state = next;
        next
    }

    /// Advances the poll timer by `elapsed`.
    ///
    /// Re-queries the SDK when the state is `Checking` and a full poll
    /// interval has passed. Returns the new state if a query was made.
    pub fn poll<B: TrackingBackend + ?Sized>(
        &mut self,
        elapsed: Duration,
        backend: &mut B,
    ) -> Option<AvailabilityState> {
        if self.state != AvailabilityState::Checking {
            return None;
        }

        self.accumulator += elapsed;
        if self.accumulator < self.poll_interval {
            return None;
        }
        Some(self.check(backend))
    }

    /// Forgets the last answer.
    pub fn reset(&mut self) {
        self.state = AvailabilityState::Unknown;
        self.accumulator = Duration::ZERO;
    }
}
