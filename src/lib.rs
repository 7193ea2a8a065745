//! Auto-height webview support: builds the measurement script injected into
//! an embedded document and decides when the host should re-render or
//! resize.
//!
//! ```ignore
//! use webview_autosize::{Configuration, Environment, Source, reduce, should_update};
//!
//! let config = Configuration::new(Source::html("<p>Hello</p>")).with_zoomable(false);
//! let derived = reduce(&config, &Environment::default());
//! // hand `derived.current_source` (and `derived.script`, if any) to the webview
//!
//! if should_update(Some(&previous), Some(&config)) {
//!     // recompose
//! }
//! ```

pub mod change;
pub mod config;
pub mod embed;
pub mod env;
pub mod logger;
pub mod script;
pub mod size;
pub mod source;

pub use change::{ConfigField, first_change, should_update};
pub use config::{ConfigError, Configuration, FileDescriptor, Source, Style, Width};
pub use env::{Environment, Platform, Transport, init_screen_width, resolve_width};
pub use script::{Script, compose};
pub use size::{Size, SizeError, SizeTracker, is_size_changed};
pub use source::{Derived, reduce};
