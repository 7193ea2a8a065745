//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use webview_autosize::{Platform, Transport};

/// Measurement script generator for auto-height webviews
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Platform the webview runs on
    #[arg(long, global = true, value_enum, default_value_t = Platform::Other)]
    pub platform: Platform,

    /// Message transport exposed to the embedded document
    #[arg(long, global = true, value_enum, default_value_t = TransportKind::ReactNative)]
    pub transport: TransportKind,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Known message transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// window.ReactNativeWebView.postMessage
    ReactNative,
    /// window.ipc.postMessage (wry)
    Ipc,
}

impl From<TransportKind> for Transport {
    fn from(kind: TransportKind) -> Self {
        match kind {
            TransportKind::ReactNative => Transport::react_native(),
            TransportKind::Ipc => Transport::ipc(),
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the composed measurement script
    #[command(visible_alias = "s")]
    Script {
        /// Configuration file (.toml or .json)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        config: PathBuf,
    },

    /// Print the source and script handed to the host, as JSON
    #[command(visible_alias = "r")]
    Reduce {
        /// Configuration file (.toml or .json)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        config: PathBuf,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check whether a new configuration requires recomposing the script
    #[command(visible_alias = "d")]
    Diff {
        /// Previous configuration file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        prev: PathBuf,

        /// Next configuration file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        next: PathBuf,
    },

    /// Check whether a size message should update the stored dimensions
    Size {
        /// Message posted by the embedded document, e.g. '{"width":320,"height":480}'
        message: String,

        /// Previously stored width
        #[arg(long, default_value_t = 0.0)]
        width: f64,

        /// Previously stored height
        #[arg(long, default_value_t = 0.0)]
        height: f64,
    },

    /// Print the width the host view should take
    Width {
        /// Configuration file (.toml or .json)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        config: PathBuf,

        /// Screen width used when the style has no explicit width
        #[arg(long, default_value_t = 0.0)]
        screen_width: f64,
    },
}
