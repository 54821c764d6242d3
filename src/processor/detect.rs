//! Classifies an untyped protocol document.
//!
//! Checks run in a fixed order and the first match wins; the schemas
//! overlap, so reordering changes results.

use serde_json::{Map, Value};

use crate::error::{GeneratorError, Result};
use crate::model::{AssemblySubtype, ProtocolCategory};

pub type Detection = (ProtocolCategory, Option<AssemblySubtype>);

/// Keys every SBOL-exported assembly record carries.
const SBOL_KEYS: [&str; 4] = ["Product", "Backbone", "PartsList", "Restriction Enzyme"];
const MANUAL_KEY: &str = "receiver";
const DOMESTICATION_KEYS: [&str; 3] = ["parts", "backbone", "restriction_enzyme"];

const ASSEMBLIES_KEY: &str = "assemblies";

pub fn detect(document: &Value) -> Result<Detection> {
    match document {
        Value::Array(items) => {
            let first = items
                .first()
                .ok_or(GeneratorError::EmptyData("empty data provided"))?;
            Ok((ProtocolCategory::Assembly, Some(assembly_subtype(first)?)))
        }
        Value::Object(map) => {
            if let Some(items) = wrapped_assemblies(map)? {
                let first = items
                    .first()
                    .ok_or(GeneratorError::EmptyData("no assemblies provided"))?;
                return Ok((ProtocolCategory::Assembly, Some(assembly_subtype(first)?)));
            }
            if map.contains_key("list_of_dna") && map.contains_key("competent_cells") {
                return Ok((ProtocolCategory::Transformation, None));
            }
            if map.contains_key("bacterium_locations") {
                return Ok((ProtocolCategory::Plating, None));
            }
            Err(GeneratorError::Undetectable)
        }
        _ => Err(GeneratorError::Undetectable),
    }
}

/// Picks the assembly subtype from the key set of one assembly record.
///
/// A record that matches none of the known key sets is treated as SBOL so
/// newer exports with renamed optional fields keep working.
pub fn assembly_subtype(record: &Value) -> Result<AssemblySubtype> {
    let record = record
        .as_object()
        .ok_or_else(|| GeneratorError::UnrecognizedRecord(value_kind(record)))?;

    if SBOL_KEYS.iter().all(|k| record.contains_key(*k)) {
        return Ok(AssemblySubtype::Sbol);
    }
    if record.contains_key(MANUAL_KEY) {
        return Ok(AssemblySubtype::Manual);
    }
    if DOMESTICATION_KEYS.iter().all(|k| record.contains_key(*k)) {
        return Ok(AssemblySubtype::Domestication);
    }

    tracing::debug!(
        keys = ?record.keys().collect::<Vec<_>>(),
        "assembly record matches no known key set; defaulting to SBOL"
    );
    Ok(AssemblySubtype::Sbol)
}

/// The `assemblies` list of a wrapped document, if the key is present.
pub fn wrapped_assemblies(map: &Map<String, Value>) -> Result<Option<&Vec<Value>>> {
    match map.get(ASSEMBLIES_KEY) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(GeneratorError::InvalidShape(format!(
            "`{ASSEMBLIES_KEY}` must be a list, found {}",
            value_kind(other)
        ))),
    }
}

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
