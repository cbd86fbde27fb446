//! Terminal rendering of the inline display preview.
//!
//! Runs the generator for a few blocks, takes the same snapshot the plugin
//! would publish, and prints the rendered surface with one character per
//! pixel.

use clap::Args;
use tonegen_core::preview::TRACE_COLOR;
use tonegen_core::{GeneratorRegistry, Surface, render_preview};

#[derive(Args)]
pub struct PreviewArgs {
    /// Generator id
    #[arg(value_name = "GENERATOR", default_value = "singen")]
    generator: String,

    /// Frequency in Hz
    #[arg(long, default_value = "440.0")]
    freq: f32,

    /// Amplitude in dB
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    amplitude: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Width in pixels (columns)
    #[arg(long, default_value = "80")]
    width: u32,

    /// Maximum height in pixels (rows); the preview uses at most 30
    #[arg(long, default_value = "30")]
    max_height: u32,

    /// Blocks of 256 samples to run before taking the snapshot
    #[arg(long, default_value = "1")]
    blocks: usize,
}

/// Draw `surface` as text, `#` for the trace and space for the background.
pub fn surface_to_text(surface: &Surface) -> String {
    let capacity = (surface.width() as usize + 1) * surface.height() as usize;
    let mut text = String::with_capacity(capacity);
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            text.push(if surface.pixel(x, y) == Some(TRACE_COLOR) {
                '#'
            } else {
                ' '
            });
        }
        text.push('\n');
    }
    text
}

pub fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let registry = GeneratorRegistry::new();
    let generator = registry
        .descriptor(&args.generator)
        .ok_or_else(|| anyhow::anyhow!("Unknown generator: {}", args.generator))?;

    let mut osc = generator.create(args.sample_rate as f32);
    let mut block = [0.0f32; 256];
    for _ in 0..args.blocks {
        osc.process_block(args.freq, args.amplitude, &mut block);
    }
    let snapshot = osc.snapshot();
    tracing::debug!(?snapshot, "preview snapshot");

    let mut surface = Surface::new();
    render_preview(&snapshot, args.width, args.max_height, &mut surface);

    println!(
        "{} at {} Hz, {} dB ({}x{})",
        generator.id,
        snapshot.frequency,
        snapshot.amplitude_db,
        surface.width(),
        surface.height()
    );
    let border = format!("+{}+", "-".repeat(surface.width() as usize));
    println!("{border}");
    for line in surface_to_text(&surface).lines() {
        println!("|{line}|");
    }
    println!("{border}");
    Ok(())
}
