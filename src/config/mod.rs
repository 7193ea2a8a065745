//! Measurement configuration: every caller-supplied knob that shapes the
//! generated script.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error     # ConfigError
//! └── mod.rs    # Configuration, Style, FileDescriptor, Source (this file)
//! ```
//!
//! A configuration is usually built in code by the host, but it can also be
//! loaded from a TOML file or from the JSON props a host already has.
//! Keys are camelCase like host props; snake_case aliases are accepted.
//!
//! # Example
//!
//! ```toml
//! zoomable = false
//! scales_page_to_fit = false
//! custom_style = "p { color: red; }"
//!
//! [style]
//! width = 320
//!
//! [[files]]
//! rel = "stylesheet"
//! type = "text/css"
//! href = "a.css"
//!
//! [source]
//! html = "<p>Hello</p>"
//! base_url = "https://example.com/"
//! ```

mod error;

pub use error::ConfigError;

use crate::log;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Everything that influences script generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Host view style. Only `width` is read here; other keys are carried for
    /// change detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    /// Allow pinch zoom (`user-scalable=yes`).
    #[serde(default = "default_zoomable")]
    pub zoomable: bool,

    /// Scale reported dimensions to fit wide content into the viewport.
    #[serde(default, alias = "scales_page_to_fit")]
    pub scales_page_to_fit: bool,

    /// External files linked into the document head, in order.
    #[serde(default)]
    pub files: Vec<FileDescriptor>,

    /// Stylesheet appended after the baseline body style.
    #[serde(default, alias = "custom_style", skip_serializing_if = "Option::is_none")]
    pub custom_style: Option<String>,

    /// Script run before the measurement setup.
    #[serde(default, alias = "custom_script", skip_serializing_if = "Option::is_none")]
    pub custom_script: Option<String>,

    /// What the host renders.
    pub source: Source,
}

fn default_zoomable() -> bool {
    true
}

/// Host view style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Explicit view width; falls back to the screen width when unset or zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,

    /// Any other style keys, kept untyped.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Style width: points, or a layout string such as `"100%"` passed to the host
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Width {
    Points(f64),
    Relative(String),
}

impl Width {
    /// `0`, NaN and `""` count as unset.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Points(points) => *points != 0.0 && !points.is_nan(),
            Self::Relative(value) => !value.is_empty(),
        }
    }
}

impl From<f64> for Width {
    fn from(points: f64) -> Self {
        Self::Points(points)
    }
}

impl From<&str> for Width {
    fn from(value: &str) -> Self {
        Self::Relative(value.to_owned())
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points(points) => write!(f, "{points}"),
            Self::Relative(value) => f.write_str(value),
        }
    }
}

/// One `<link>` injected into the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub rel: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub href: String,
}

impl FileDescriptor {
    pub fn new(
        rel: impl Into<String>,
        mime_type: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            rel: rel.into(),
            mime_type: mime_type.into(),
            href: href.into(),
        }
    }

    /// A `text/css` stylesheet link.
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self::new("stylesheet", "text/css", href)
    }
}

/// Rendered content: inline markup or an opaque reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Inline markup; the script is embedded into it.
    Html {
        html: String,
        #[serde(
            default,
            rename = "baseUrl",
            alias = "base_url",
            skip_serializing_if = "Option::is_none"
        )]
        base_url: Option<String>,
    },

    /// Remote or otherwise opaque content; the script is delivered separately.
    Remote {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
}

impl Source {
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html {
            html: html.into(),
            base_url: None,
        }
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Remote {
            uri: uri.into(),
            method: None,
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

// ============================================================================
// construction
// ============================================================================

impl Configuration {
    /// Defaults for every knob except the source.
    pub fn new(source: Source) -> Self {
        Self {
            style: None,
            zoomable: true,
            scales_page_to_fit: false,
            files: Vec::new(),
            custom_style: None,
            custom_script: None,
            source,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_zoomable(mut self, zoomable: bool) -> Self {
        self.zoomable = zoomable;
        self
    }

    pub fn with_scales_page_to_fit(mut self, scales_page_to_fit: bool) -> Self {
        self.scales_page_to_fit = scales_page_to_fit;
        self
    }

    pub fn with_files(mut self, files: Vec<FileDescriptor>) -> Self {
        self.files = files;
        self
    }

    pub fn with_custom_style(mut self, style: impl Into<String>) -> Self {
        self.custom_style = Some(style.into());
        self
    }

    pub fn with_custom_script(mut self, script: impl Into<String>) -> Self {
        self.custom_script = Some(script.into());
        self
    }
}

// ============================================================================
// loading
// ============================================================================

/// On-disk configuration format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// `.toml` or `.json`; anything else is rejected.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl Configuration {
    /// Load a configuration file, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content, format)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse content, collecting any unknown fields.
    pub fn parse_with_ignored(
        content: &str,
        format: Format,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let mut track = |path: serde_ignored::Path| ignored.push(path.to_string());

        let config: Self = match format {
            Format::Toml => {
                let deserializer = toml::Deserializer::new(content);
                serde_ignored::deserialize(deserializer, &mut track)?
            }
            Format::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                let config = serde_ignored::deserialize(&mut deserializer, &mut track)?;
                deserializer.end()?;
                config
            }
        };

        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path: PathBuf = path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf());
        log!("warning"; "unknown fields in {}:", display_path.display());
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {field}");
        }
    }
}

// ============================================================================
// tests
// ============================================================================
