//! Tonegen CLI - render, inspect and package the tonegen generators.

mod commands;
mod config;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tonegen")]
#[command(author, version, about = "Tonegen sine and square generators", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a generator to a WAV file
    Render(commands::render::RenderArgs),

    /// List available generators and their controls
    Generators(commands::generators::GeneratorsArgs),

    /// Draw a generator's inline display preview in the terminal
    Preview(commands::preview::PreviewArgs),

    /// Write the LV2 bundle metadata (manifest.ttl and one .ttl per generator)
    Bundle(commands::bundle::BundleArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Generators(args) => commands::generators::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Bundle(args) => commands::bundle::run(args),
    }
}
