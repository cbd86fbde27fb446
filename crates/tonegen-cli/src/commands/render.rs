//! Offline rendering of a generator to WAV.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tonegen_core::GeneratorRegistry;

use crate::config::RenderConfig;
use crate::wav::{WavSpec, write_wav};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// TOML render configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generator id (singen, squargen)
    #[arg(short, long)]
    generator: Option<String>,

    /// Frequency in Hz
    #[arg(long)]
    freq: Option<f32>,

    /// Glide the frequency control to this value over the render
    #[arg(long, value_name = "HZ")]
    freq_end: Option<f32>,

    /// Amplitude in dB (-80 is silence, 20 is the ceiling)
    #[arg(long, allow_negative_numbers = true)]
    amplitude: Option<f32>,

    /// Duration in seconds
    #[arg(long)]
    duration: Option<f32>,

    /// Sample rate
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Samples per processing block
    #[arg(long)]
    block_size: Option<usize>,

    /// Bit depth (16, 24, or 32 for float)
    #[arg(long)]
    bits: Option<u16>,
}

impl RenderArgs {
    /// Start from the config file (or defaults) and apply the flags.
    fn resolve(&self) -> anyhow::Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };

        if let Some(generator) = &self.generator {
            config.generator.clone_from(generator);
        }
        if let Some(freq) = self.freq {
            config.frequency = freq;
        }
        if self.freq_end.is_some() {
            config.frequency_end = self.freq_end;
        }
        if let Some(amplitude) = self.amplitude {
            config.amplitude_db = amplitude;
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(bits) = self.bits {
            config.bit_depth = bits;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Render `config` to a sample buffer, calling `progress` after each block
/// with the number of samples written so far.
pub fn render(config: &RenderConfig, mut progress: impl FnMut(usize)) -> anyhow::Result<Vec<f32>> {
    let registry = GeneratorRegistry::new();
    let mut osc = registry
        .create(&config.generator, config.sample_rate as f32)
        .with_context(|| format!("unknown generator: {}", config.generator))?;

    let total = config.total_samples();
    let blocks = total.div_ceil(config.block_size);
    let mut samples = vec![0.0f32; total];

    for (i, block) in samples.chunks_mut(config.block_size).enumerate() {
        osc.process_block(config.frequency_at(i, blocks), config.amplitude_db, block);
        progress(((i + 1) * config.block_size).min(total));
    }

    tracing::debug!(
        blocks,
        end_phase = osc.phase(),
        end_frequency = osc.smoothed_frequency(),
        "render finished"
    );
    Ok(samples)
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    let total = config.total_samples();

    println!("Rendering {}...", config.generator);
    match config.frequency_end {
        Some(end) => println!(
            "  {} Hz -> {} Hz at {} dB for {:.2}s",
            config.frequency, end, config.amplitude_db, config.duration
        ),
        None => println!(
            "  {} Hz at {} dB for {:.2}s",
            config.frequency, config.amplitude_db, config.duration
        ),
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let samples = render(&config, |done| pb.set_position(done as u64))?;
    pb.finish_with_message("done");

    let spec = WavSpec {
        sample_rate: config.sample_rate,
        bits_per_sample: config.bit_depth,
    };
    write_wav(&args.output, &samples, spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let peak = peak(&samples);
    let peak_db = if peak > 0.0 {
        20.0 * peak.log10()
    } else {
        f32::NEG_INFINITY
    };
    println!("Peak {:.1} dB", peak_db);
    println!("Wrote {} samples to {}", samples.len(), args.output.display());
    tracing::info!(path = %args.output.display(), samples = samples.len(), "wrote WAV");
    Ok(())
}
