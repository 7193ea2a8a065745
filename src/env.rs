//! Host environment: values the caller measures or detects and hands in.
//!
//! Platform detection and screen querying live in the host. This module only
//! names the results and remembers the screen width read at startup.

use crate::config::{Style, Width};
use clap::ValueEnum;
use std::sync::OnceLock;

/// Platform the embedding view runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Other,
}

impl Platform {
    /// Android WebViews manage viewport scaling themselves, so no viewport
    /// `<meta>` is injected there.
    pub const fn manages_viewport(self) -> bool {
        matches!(self, Self::Android)
    }
}

/// Where the embedded document posts its measurements:
/// `window[object][method](json)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    pub object: String,
    pub method: String,
}

impl Transport {
    pub fn new(object: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            method: method.into(),
        }
    }

    /// `window.ReactNativeWebView.postMessage`
    pub fn react_native() -> Self {
        Self::new("ReactNativeWebView", "postMessage")
    }

    /// `window.ipc.postMessage`, as exposed by wry-based webviews.
    pub fn ipc() -> Self {
        Self::new("ipc", "postMessage")
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::react_native()
    }
}

/// Externally supplied values that shape the script but are not part of the
/// change-detected configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub platform: Platform,
    pub transport: Transport,
}

impl Environment {
    pub fn new(platform: Platform, transport: Transport) -> Self {
        Self {
            platform,
            transport,
        }
    }
}

// ============================================================================
// Screen width
// ============================================================================

/// Screen width read once at startup.
static SCREEN_WIDTH: OnceLock<f64> = OnceLock::new();

/// Record the screen width. Only the first call takes effect; returns the
/// width in use afterwards.
pub fn init_screen_width(width: f64) -> f64 {
    *SCREEN_WIDTH.get_or_init(|| width)
}

/// Recorded screen width, `0.0` before [`init_screen_width`].
pub fn screen_width() -> f64 {
    SCREEN_WIDTH.get().copied().unwrap_or(0.0)
}

/// Width the host view should take: the explicit style width when set
/// (see [`Width::is_set`]), otherwise the screen width.
pub fn resolve_width(style: Option<&Style>) -> Width {
    style
        .and_then(|style| style.width.as_ref())
        .filter(|width| width.is_set())
        .cloned()
        .unwrap_or_else(|| Width::Points(screen_width()))
}
