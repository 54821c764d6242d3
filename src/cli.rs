use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::model::{AssemblySubtype, ProtocolCategory};

const EXAMPLES: &str = "\
Examples:
  # Auto-detect protocol type
  protocol-gen data.json -o protocol.py

  # Assembly protocol with advanced parameters
  protocol-gen data.json params.json -o protocol.py --protocol-type assembly

  # Plating protocol with custom metadata
  protocol-gen plating.json -o protocol.py --protocol-type plating --metadata meta.json

  # Specify assembly subtype explicitly
  protocol-gen assemblies.json -o protocol.py --protocol-type assembly --assembly-type Manual";

/// Generate standalone Opentrons protocol files from JSON inputs.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Path to protocol data JSON file
    pub input: PathBuf,

    /// Path to advanced parameters JSON file
    pub json_params: Option<PathBuf>,

    /// Output protocol file path (e.g. protocol.py)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Protocol type (default: auto-detect)
    #[arg(long, value_name = "assembly|transformation|plating")]
    pub protocol_type: Option<ProtocolCategory>,

    /// Assembly subtype, only used with `--protocol-type assembly` (default: auto-detect)
    #[arg(long, value_name = "SBOL|Manual|Domestication")]
    pub assembly_type: Option<AssemblySubtype>,

    /// Path to metadata JSON file
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Log stage progress to stderr
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
