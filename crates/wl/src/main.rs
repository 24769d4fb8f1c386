//! wl CLI - wiki lookup and rendering.
//!
//! Provides commands for:
//! - `render`: Render a markup file to HTML
//! - `lookup`: Find the articles matching free-form text
//! - `open`: Render one article by title
//! - `translate`: Gloss-translate a markup file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GlobalArgs, LookupArgs, OpenArgs, RenderArgs, TranslateArgs};
use output::Output;

/// wl - Wiki lookup and rendering.
#[derive(Parser)]
#[command(name = "wl", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markup file to HTML.
    Render(RenderArgs),
    /// Look up the articles matching free-form text.
    Lookup(LookupArgs),
    /// Render an article by title.
    Open(OpenArgs),
    /// Replace glossary terms in a markup file.
    Translate(TranslateArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&cli.global),
        Commands::Lookup(args) => args.execute(&cli.global),
        Commands::Open(args) => args.execute(&cli.global),
        Commands::Translate(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
