//! Error taxonomy for the generator.
//!
//! Input, classification, configuration and write failures each get their
//! own variants so the CLI can report which stage broke.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    // ── input ────────────────────────────────────────────────────────
    #[error("{role} file not found: {}", path.display())]
    FileNotFound { role: &'static str, path: PathBuf },

    #[error("invalid JSON in {role} file")]
    Malformed {
        role: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not read {role} file {}", path.display())]
    Read {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    InvalidShape(String),

    #[error("{0}")]
    EmptyData(&'static str),

    // ── classification ───────────────────────────────────────────────
    #[error("unable to detect protocol type; please specify --protocol-type explicitly")]
    Undetectable,

    #[error("first assembly item is not a record (found {0})")]
    UnrecognizedRecord(&'static str),

    // ── configuration ────────────────────────────────────────────────
    #[error("unknown protocol type: {0}")]
    UnknownProtocolType(String),

    #[error("assembly subtype required for assembly protocols")]
    MissingSubtype,

    // ── synthesis ────────────────────────────────────────────────────
    #[error("emitted literal does not read back to the input: {0}")]
    RoundTrip(String),

    // ── write ────────────────────────────────────────────────────────
    #[error("error writing output file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
