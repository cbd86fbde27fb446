//! Generator listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use tonegen_core::GeneratorRegistry;

#[derive(Args)]
pub struct GeneratorsArgs {
    /// Show details for a specific generator
    #[arg(value_name = "GENERATOR")]
    generator: Option<String>,
}

pub fn run(args: GeneratorsArgs) -> anyhow::Result<()> {
    let registry = GeneratorRegistry::new();

    if let Some(id) = &args.generator {
        let generator = registry
            .all_generators()
            .find(|g| g.id.eq_ignore_ascii_case(id) || g.uri == id)
            .ok_or_else(|| anyhow::anyhow!("Unknown generator: {}", id))?;

        println!("{}", generator.name);
        println!("{}", "=".repeat(generator.name.len()));
        println!();
        println!("{}", generator.description);
        println!();
        println!("  URI:        {}", generator.uri);
        println!("  Waveform:   {}", generator.waveform.name());
        println!("  Smoothing:  snaps within {}", generator.smoothing_limit);
        println!();

        println!("Controls:");
        println!();
        println!("  {:12}  {:10}  {}", "Name", "Default", "Range");
        println!("  {:12}  {:10}  {}", "----", "-------", "-----");
        for (name, range, unit) in [
            ("frequency", generator.frequency, "Hz"),
            ("amplitude", generator.amplitude, "dB"),
        ] {
            println!(
                "  {:12}  {:10}  {} to {} {}",
                name,
                format!("{} {}", range.default, unit),
                range.min,
                range.max,
                unit
            );
        }

        println!();
        println!("Example usage:");
        println!();
        println!(
            "  tonegen render out.wav --generator {} --freq {} --amplitude {}",
            generator.id, generator.frequency.default, generator.amplitude.default
        );
        println!("  tonegen preview {}", generator.id);
    } else {
        println!("Available Generators");
        println!("====================");
        println!();
        println!("  {:10}  {:22}  {}", "ID", "URI", "Description");
        println!("  {:10}  {:22}  {}", "--", "---", "-----------");
        for generator in registry.all_generators() {
            println!(
                "  {:10}  {:22}  {}",
                generator.id, generator.uri, generator.description
            );
        }
        println!();
        println!("Use 'tonegen generators <ID>' for details.");
    }

    Ok(())
}
