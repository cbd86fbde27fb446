//! Integration tests for tonegen-cli.
//!
//! Tests cover the CLI binary invocation: listing generators, rendering WAV
//! files with flags and config files, the terminal preview, and bundle
//! metadata generation.

use std::process::Command;

use tempfile::TempDir;

/// Helper to get the path to the `tonegen` binary built by cargo.
fn tonegen_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tonegen"))
}

fn read_wav(path: &std::path::Path) -> (hound::WavSpec, Vec<f32>) {
    let reader = hound::WavReader::open(path).expect("output should be a WAV file");
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.into_samples::<f32>().map(Result::unwrap).collect(),
        hound::SampleFormat::Int => {
            let scale = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.unwrap() as f32 / scale)
                .collect()
        }
    };
    (spec, samples)
}

// ---------------------------------------------------------------------------
// `tonegen generators`
// ---------------------------------------------------------------------------

#[test]
fn cli_generators_lists_both() {
    let output = tonegen_bin()
        .arg("generators")
        .output()
        .expect("failed to run tonegen generators");

    assert!(output.status.success(), "tonegen generators failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available Generators"));
    for expected in ["singen", "squargen", "urn:ardour:singen", "urn:ardour:squargen"] {
        assert!(stdout.contains(expected), "listing should contain '{expected}'");
    }
}

#[test]
fn cli_generators_details() {
    let output = tonegen_bin()
        .args(["generators", "squargen"])
        .output()
        .expect("failed to run tonegen generators squargen");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Square Generator"));
    assert!(stdout.contains("square"));
    assert!(stdout.contains("0.2"));
}

#[test]
fn cli_generators_unknown_fails() {
    let output = tonegen_bin()
        .args(["generators", "sawgen"])
        .output()
        .expect("failed to run tonegen generators sawgen");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown generator"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// `tonegen render`
// ---------------------------------------------------------------------------

#[test]
fn cli_render_requested_length() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sine.wav");

    let output = tonegen_bin()
        .arg("render")
        .arg(&path)
        .args(["--freq", "1000", "--amplitude", "-6", "--duration", "0.5"])
        .args(["--sample-rate", "44100"])
        .output()
        .expect("failed to run tonegen render");
    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (spec, samples) = read_wav(&path);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(samples.len(), 22050);

    // -6 dB is a peak of about 0.501.
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!((peak - 0.501).abs() < 0.01, "peak {peak}");
}

#[test]
fn cli_render_square_16_bit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("square.wav");

    let output = tonegen_bin()
        .arg("render")
        .arg(&path)
        .args(["-g", "squargen", "--freq", "100", "--amplitude", "0"])
        .args(["--duration", "0.1", "--bits", "16"])
        .output()
        .expect("failed to run tonegen render");
    assert!(output.status.success());

    let (spec, samples) = read_wav(&path);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(samples.len(), 4800);
    // 480 samples per cycle; phase 0.125 sits on the +0.5 plateau.
    assert!((samples[60] - 0.5).abs() < 0.02, "sample {}", samples[60]);
    assert!((samples[240] + 0.5).abs() < 0.02, "sample {}", samples[240]);
}

#[test]
fn cli_render_config_file_and_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("render.toml");
    std::fs::write(
        &config,
        "generator = \"squargen\"\nduration = 0.25\nsample_rate = 32000\nbit_depth = 24\n",
    )
    .unwrap();
    let path = dir.path().join("out.wav");

    let output = tonegen_bin()
        .arg("render")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .args(["--duration", "0.5"])
        .output()
        .expect("failed to run tonegen render");
    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (spec, samples) = read_wav(&path);
    assert_eq!(spec.sample_rate, 32000);
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(samples.len(), 16000, "--duration overrides the file");
}

#[test]
fn cli_render_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.wav");

    let output = tonegen_bin()
        .arg("render")
        .arg(&path)
        .args(["--bits", "8"])
        .output()
        .expect("failed to run tonegen render");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bit_depth"), "stderr: {stderr}");
    assert!(!path.exists());
}

#[test]
fn cli_render_unknown_generator() {
    let dir = TempDir::new().unwrap();
    let output = tonegen_bin()
        .arg("render")
        .arg(dir.path().join("out.wav"))
        .args(["--generator", "sawgen"])
        .output()
        .expect("failed to run tonegen render");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown generator: sawgen"));
}

// ---------------------------------------------------------------------------
// `tonegen preview`
// ---------------------------------------------------------------------------

#[test]
fn cli_preview_draws_box() {
    let output = tonegen_bin()
        .args(["preview", "squargen", "--width", "40", "--max-height", "12"])
        .output()
        .expect("failed to run tonegen preview");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<_> = stdout.lines().filter(|l| l.starts_with('|')).collect();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.chars().count() == 42));
    assert!(stdout.contains('#'));
}

// ---------------------------------------------------------------------------
// `tonegen bundle`
// ---------------------------------------------------------------------------

#[test]
fn cli_bundle_writes_turtle() {
    let dir = TempDir::new().unwrap();
    let bundle = dir.path().join("tonegen.lv2");

    let output = tonegen_bin()
        .arg("bundle")
        .arg(&bundle)
        .args(["--binary", "tonegen.so"])
        .output()
        .expect("failed to run tonegen bundle");
    assert!(output.status.success());

    let manifest = std::fs::read_to_string(bundle.join("manifest.ttl")).unwrap();
    assert!(manifest.contains("lv2:binary <tonegen.so>"));
    for id in ["singen", "squargen"] {
        let ttl = std::fs::read_to_string(bundle.join(format!("{id}.ttl"))).unwrap();
        assert!(ttl.contains(&format!("<urn:ardour:{id}>")));
        assert!(ttl.contains("lv2:symbol \"out\""));
    }
}
