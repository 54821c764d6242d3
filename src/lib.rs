pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::model::ProtocolRequest;
use crate::parser::DocumentRole;
use crate::processor::TypeSource;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    // 1. ── Load ───────────────────────────────────────────────────────
    let data = parser::load_document(&args.input, DocumentRole::Input)
        .context("Loading input document")?;
    let params = parser::load_mapping(args.json_params.as_deref(), DocumentRole::Params)
        .context("Loading advanced params")?;
    let metadata = parser::load_mapping(args.metadata.as_deref(), DocumentRole::Metadata)
        .context("Loading metadata")?;

    // 2. ── Resolve type ───────────────────────────────────────────────
    let resolved = processor::resolve_type(&data, args.protocol_type, args.assembly_type)
        .context("Detecting protocol type")?;
    match (resolved.source, resolved.subtype) {
        (TypeSource::Detected, Some(sub)) => {
            println!("Detected protocol type: {} ({sub})", resolved.category)
        }
        (TypeSource::Detected, None) => println!("Detected protocol type: {}", resolved.category),
        (TypeSource::SubtypeInferred, Some(sub)) => println!("Detected assembly subtype: {sub}"),
        _ => {}
    }

    // 3. ── Generate ───────────────────────────────────────────────────
    let request = ProtocolRequest {
        data,
        params,
        metadata,
    };
    let generated = processor::generate(&request, &resolved).context("Generating protocol")?;

    // 4. ── Write ──────────────────────────────────────────────────────
    writer::emit(&generated, &args.output)
        .with_context(|| format!("Writing {}", args.output.display()))?;

    println!("✓ Protocol generated successfully: {}", args.output.display());
    println!("  Protocol type: {}", generated.kind.category());
    if let Some(sub) = generated.kind.subtype() {
        println!("  Assembly subtype: {sub}");
    }
    if generated.param_count > 0 {
        println!("  Advanced params: {} parameters", generated.param_count);
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
