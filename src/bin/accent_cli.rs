//! CLI tool for accent-color - resolves colors and prints JSON
//!
//! Usage:
//!   accent_cli '#379D94' red 'rgb(1, 2, 3)'      # Resolve each color
//!   accent_cli --settings data.json --mode reading --dark
//!                                                # Theme variables for a context
//!   accent_cli ... -o out.json                   # Write to a file

#![allow(clippy::exit)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use accent_color::{
    AccentContext, AccentError, AccentSettings, AccentTheme, ColorResolver, CssEngine, HslTriple,
    ViewMode, DEFAULT_HSL,
};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "accent_cli", about = "Resolve accent colors to HSL theme variables")]
struct Cli {
    /// Color strings to resolve
    colors: Vec<String>,

    /// Stored plugin settings (data.json); defaults are used when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// View mode: source, livePreview or reading
    #[arg(long)]
    mode: Option<ViewMode>,

    /// Use the dark color scheme
    #[arg(long)]
    dark: bool,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Resolved<'a> {
    color: &'a str,
    hsl: HslTriple,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let json = if cli.settings.is_some() || cli.mode.is_some() {
        theme_vars(&cli)
    } else if cli.colors.is_empty() {
        eprintln!("Usage: accent_cli <color>... | --settings <data.json> --mode <mode> [--dark]");
        std::process::exit(1);
    } else {
        resolve_colors(&cli.colors)
    };

    let json = match json {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {e}");
            std::process::exit(1);
        }
    };

    // Output
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {e}", path.display());
                std::process::exit(1);
            }
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{json}").is_err() {
                std::process::exit(1);
            }
        }
    }
}

fn resolve_colors(colors: &[String]) -> serde_json::Result<String> {
    let mut resolver = ColorResolver::new(CssEngine::new());
    let resolved: Vec<Resolved<'_>> = colors
        .iter()
        .map(|color| match resolver.try_resolve(color) {
            Ok(hsl) => Resolved {
                color,
                hsl,
                fallback: None,
            },
            Err(e) => Resolved {
                color,
                hsl: DEFAULT_HSL,
                fallback: Some(e.to_string()),
            },
        })
        .collect();
    serde_json::to_string_pretty(&resolved)
}

fn theme_vars(cli: &Cli) -> serde_json::Result<String> {
    let settings = match &cli.settings {
        Some(path) => {
            let loaded = fs::read_to_string(path)
                .map_err(AccentError::from)
                .and_then(|text| AccentSettings::from_json(&text));
            match loaded {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading {}: {e}", path.display());
                    std::process::exit(1);
                }
            }
        }
        None => AccentSettings::default(),
    };

    let mut theme = AccentTheme::new(settings, CssEngine::new());
    let ctx = AccentContext::new(cli.dark, cli.mode.unwrap_or(ViewMode::Source));
    let vars = theme.update(ctx);
    serde_json::to_string_pretty(&vars)
}
