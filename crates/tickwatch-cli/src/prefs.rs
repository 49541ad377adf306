//! User preferences for the refresh cycle.

use std::time::Duration;

use thiserror::Error;

pub const MIN_REFRESH_MINUTES: u32 = 1;
pub const MAX_REFRESH_MINUTES: u32 = 60;

/// Raised when the refresh period falls outside the permitted range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "refresh period must be {MIN_REFRESH_MINUTES} to {MAX_REFRESH_MINUTES} minutes, got {minutes}"
)]
pub struct PrefsError {
    pub minutes: u32,
}

/// Validated preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    refresh_minutes: u32,
}

impl Preferences {
    pub fn new(refresh_minutes: u32) -> Result<Self, PrefsError> {
        if !(MIN_REFRESH_MINUTES..=MAX_REFRESH_MINUTES).contains(&refresh_minutes) {
            return Err(PrefsError {
                minutes: refresh_minutes,
            });
        }
        Ok(Self { refresh_minutes })
    }

    pub fn refresh_minutes(&self) -> u32 {
        self.refresh_minutes
    }

    /// The refresh period as a scheduler duration.
    pub fn update_period(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_minutes) * 60)
    }
}
