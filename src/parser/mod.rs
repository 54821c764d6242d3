//! Loads the JSON documents the generator consumes.
//!
//! A missing file and a file with broken JSON are reported differently,
//! for all three documents.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{GeneratorError, Result};
use crate::processor::detect::value_kind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Input,
    Params,
    Metadata,
}

impl DocumentRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Params => "advanced params",
            Self::Metadata => "metadata",
        }
    }
}

/// Read and parse one document from disk.
pub fn load_document(path: &Path, role: DocumentRole) -> Result<Value> {
    let json = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => GeneratorError::FileNotFound {
            role: role.label(),
            path: path.to_path_buf(),
        },
        _ => GeneratorError::Read {
            role: role.label(),
            path: path.to_path_buf(),
            source,
        },
    })?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "{} file loaded", role.label());

    load_from_json(&json, role)
}

pub fn load_from_json(json: &str, role: DocumentRole) -> Result<Value> {
    serde_json::from_str(json).map_err(|source| GeneratorError::Malformed {
        role: role.label(),
        source,
    })
}

/// Loads an optional mapping document; no path means an empty mapping.
pub fn load_mapping(path: Option<&Path>, role: DocumentRole) -> Result<Map<String, Value>> {
    let Some(path) = path else {
        return Ok(Map::new());
    };

    match load_document(path, role)? {
        Value::Object(map) => Ok(map),
        other => Err(GeneratorError::InvalidShape(format!(
            "{} file must contain a JSON object, found {}",
            role.label(),
            value_kind(&other)
        ))),
    }
}
