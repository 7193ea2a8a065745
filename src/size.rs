//! Size reports from the embedded document and the decision whether they
//! should update the host's stored dimensions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debug;

/// Measured content size. Missing dimensions read as `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// Errors decoding a transport message.
#[derive(Debug, Error)]
pub enum SizeError {
    #[error("malformed size message")]
    Json(#[from] serde_json::Error),
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Decode the `{"width":..,"height":..}` message posted by the script.
    pub fn from_message(message: &str) -> Result<Self, SizeError> {
        Ok(serde_json::from_str(message)?)
    }

    /// Both dimensions present and non-zero.
    pub fn is_complete(&self) -> bool {
        is_set(self.width) && is_set(self.height)
    }
}

/// Zero and NaN both count as unset.
fn is_set(dimension: f64) -> bool {
    dimension != 0.0 && !dimension.is_nan()
}

/// `None` for an incomplete report (no decision, treat as unchanged);
/// otherwise whether either dimension differs from `previous`.
pub fn is_size_changed(reported: Size, previous: Size) -> Option<bool> {
    if !reported.is_complete() {
        return None;
    }
    Some(reported.height != previous.height || reported.width != previous.width)
}

/// Host-side record of the last accepted size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeTracker {
    current: Size,
}

impl SizeTracker {
    pub const fn new() -> Self {
        Self {
            current: Size::new(0.0, 0.0),
        }
    }

    pub const fn current(&self) -> Size {
        self.current
    }

    /// Apply a report. Returns `true` when the stored size was replaced.
    pub fn observe(&mut self, reported: Size) -> bool {
        match is_size_changed(reported, self.current) {
            Some(true) => {
                debug!(
                    "size";
                    "{}x{} -> {}x{}",
                    self.current.width, self.current.height, reported.width, reported.height
                );
                self.current = reported;
                true
            }
            Some(false) => false,
            None => {
                debug!("size"; "ignoring incomplete report {}x{}", reported.width, reported.height);
                false
            }
        }
    }

    /// Decode a transport message and apply it.
    pub fn observe_message(&mut self, message: &str) -> Result<bool, SizeError> {
        Ok(self.observe(Size::from_message(message)?))
    }
}
