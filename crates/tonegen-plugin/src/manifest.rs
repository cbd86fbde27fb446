//! Turtle metadata for the LV2 bundle.
//!
//! The host learns about the generators from `manifest.ttl` and one
//! `<id>.ttl` per generator. Both are generated from the registry, so port
//! ranges and URIs cannot drift from the code.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tonegen_core::{ControlRange, GeneratorDescriptor, GeneratorRegistry};

use crate::ports::PortIndex;

const PREFIXES: &str = "\
@prefix doap:  <http://usefulinc.com/ns/doap#> .
@prefix idpy:  <http://harrisonconsoles.com/lv2/inlinedisplay#> .
@prefix lv2:   <http://lv2plug.in/ns/lv2core#> .
@prefix pprop: <http://lv2plug.in/ns/ext/port-props#> .
@prefix rdfs:  <http://www.w3.org/2000/01/rdf-schema#> .
@prefix units: <http://lv2plug.in/ns/extensions/units#> .
";

/// File name of the plugin library on this platform, e.g.
/// `libtonegen_plugin.so`.
pub fn default_binary_name() -> String {
    format!(
        "{}tonegen_plugin{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_SUFFIX
    )
}

/// Contents of `manifest.ttl`, pointing every generator at `binary`.
pub fn manifest_ttl(registry: &GeneratorRegistry, binary: &str) -> String {
    let mut ttl = String::from(PREFIXES);
    for generator in registry.all_generators() {
        let _ = write!(
            ttl,
            "\n<{uri}>\n    a lv2:Plugin ;\n    lv2:binary <{binary}> ;\n    rdfs:seeAlso <{id}.ttl> .\n",
            uri = generator.uri,
            id = generator.id,
        );
    }
    ttl
}

fn write_control_port(ttl: &mut String, port: PortIndex, range: &ControlRange, unit: &str) {
    let _ = write!(
        ttl,
        "[
        a lv2:InputPort, lv2:ControlPort ;
        lv2:index {index} ;
        lv2:symbol \"{symbol}\" ;
        lv2:name \"{name}\" ;
        lv2:default {default:?} ;
        lv2:minimum {min:?} ;
        lv2:maximum {max:?} ;
        units:unit units:{unit} ;",
        index = port as u32,
        symbol = port.symbol(),
        name = port.name(),
        default = range.default,
        min = range.min,
        max = range.max,
    );
    if port == PortIndex::Frequency {
        ttl.push_str("\n        lv2:portProperty pprop:logarithmic ;");
    }
    ttl.push_str("\n    ]");
}

/// Contents of `<id>.ttl` describing one generator.
pub fn plugin_ttl(generator: &GeneratorDescriptor) -> String {
    let mut ttl = String::from(PREFIXES);
    let _ = write!(
        ttl,
        "
<{uri}>
    a lv2:Plugin, lv2:OscillatorPlugin ;
    doap:name \"{name}\" ;
    rdfs:comment \"{description}\" ;
    lv2:optionalFeature lv2:hardRTCapable, idpy:queue_draw ;
    lv2:extensionData idpy:interface ;
    lv2:port ",
        uri = generator.uri,
        name = generator.name,
        description = generator.description,
    );

    for (i, port) in PortIndex::ALL.into_iter().enumerate() {
        if i > 0 {
            ttl.push_str(" , ");
        }
        match port {
            PortIndex::Frequency => write_control_port(&mut ttl, port, &generator.frequency, "hz"),
            PortIndex::Amplitude => write_control_port(&mut ttl, port, &generator.amplitude, "db"),
            PortIndex::Output => {
                let _ = write!(
                    ttl,
                    "[
        a lv2:OutputPort, lv2:AudioPort ;
        lv2:index {index} ;
        lv2:symbol \"{symbol}\" ;
        lv2:name \"{name}\" ;
    ]",
                    index = port as u32,
                    symbol = port.symbol(),
                    name = port.name(),
                );
            }
        }
    }
    ttl.push_str(" .\n");
    ttl
}

/// Write `manifest.ttl` and every `<id>.ttl` into `dir`, creating it if
/// needed. Returns the paths written.
pub fn write_bundle(dir: &Path, binary: &str) -> std::io::Result<Vec<PathBuf>> {
    let registry = GeneratorRegistry::new();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(registry.len() + 1);
    let manifest = dir.join("manifest.ttl");
    std::fs::write(&manifest, manifest_ttl(&registry, binary))?;
    written.push(manifest);

    for generator in registry.all_generators() {
        let path = dir.join(format!("{}.ttl", generator.id));
        std::fs::write(&path, plugin_ttl(generator))?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "wrote LV2 bundle");
    Ok(written)
}
