//! LV2 bundle metadata generation.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tonegen_plugin::manifest::{default_binary_name, write_bundle};

#[derive(Args)]
pub struct BundleArgs {
    /// Bundle directory, e.g. ~/.lv2/tonegen.lv2
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Plugin library file name referenced by manifest.ttl
    #[arg(long, value_name = "FILE")]
    binary: Option<String>,
}

pub fn run(args: BundleArgs) -> anyhow::Result<()> {
    let binary = args.binary.unwrap_or_else(default_binary_name);
    let written = write_bundle(&args.dir, &binary)
        .with_context(|| format!("failed to write bundle to {}", args.dir.display()))?;

    for path in &written {
        println!("Wrote {}", path.display());
    }
    println!();
    println!("Copy {} into {} to complete the bundle.", binary, args.dir.display());
    Ok(())
}
