//! CLI command implementations.

mod args;

pub use args::{Cli, Commands};

use anyhow::{Context, Result};
use std::path::Path;
use webview_autosize::{
    Configuration, Environment, Size, change, compose, init_screen_width, is_size_changed, reduce,
    resolve_width,
};

/// Run the parsed command.
pub fn run(cli: &Cli) -> Result<()> {
    let env = Environment::new(cli.platform, cli.transport.into());

    match &cli.command {
        Commands::Script { config } => {
            let config = load(config)?;
            println!("{}", compose(&config, &env));
        }
        Commands::Reduce { config, pretty } => {
            let config = load(config)?;
            let derived = reduce(&config, &env);
            let json = if *pretty {
                serde_json::to_string_pretty(&derived)?
            } else {
                serde_json::to_string(&derived)?
            };
            println!("{json}");
        }
        Commands::Diff { prev, next } => {
            let prev = load(prev)?;
            let next = load(next)?;
            match change::first_change(&prev, &next) {
                Some(field) => println!("changed: {field}"),
                None => println!("unchanged"),
            }
        }
        Commands::Size {
            message,
            width,
            height,
        } => {
            let reported = Size::from_message(message).context("Failed to decode size message")?;
            let verdict = match is_size_changed(reported, Size::new(*width, *height)) {
                Some(true) => "changed",
                Some(false) => "unchanged",
                None => "incomplete",
            };
            println!("{verdict}");
        }
        Commands::Width {
            config,
            screen_width,
        } => {
            let config = load(config)?;
            init_screen_width(*screen_width);
            println!("{}", resolve_width(config.style.as_ref()));
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Configuration> {
    Configuration::from_path(path)
        .with_context(|| format!("Failed to load configuration `{}`", path.display()))
}
