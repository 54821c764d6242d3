//! Builds the standalone protocol program.
//!
//! Output layout, in order:
//!   1. imports (protocol class + runtime API)
//!   2. `<type>_data = …`
//!   3. `json_params = …`        (only when params are non-empty)
//!   4. `metadata = …`
//!   5. `def run(protocol)` constructing the class and running it
//!
//! The layout and the variable names are what the runtime imports, so they
//! must not drift. Output depends only on the inputs.

use serde_json::{Map, Value};

use super::detect::wrapped_assemblies;
use super::literal;
use crate::error::{GeneratorError, Result};
use crate::model::{AssemblySubtype, DEFAULT_METADATA, ProtocolCategory, ProtocolKind};
use crate::writer::python::format_value;

const RUNTIME_IMPORT: &str = "from opentrons import protocol_api";
const PARAMS_NAME: &str = "json_params";
const METADATA_NAME: &str = "metadata";
const INSTANCE_NAME: &str = "protocol_instance";

pub fn assemble(
    data: &Value,
    params: &Map<String, Value>,
    metadata: &Map<String, Value>,
    category: ProtocolCategory,
    subtype: Option<AssemblySubtype>,
) -> Result<String> {
    let kind = ProtocolKind::resolve(category, subtype)?;
    let config = kind.config();

    let final_metadata = merge_metadata(config.metadata_name, metadata);
    let actual_data = normalize_data(data, kind)?;

    let data_literal = checked_literal(actual_data)?;
    let params_literal = if params.is_empty() {
        None
    } else {
        Some(checked_literal(&Value::Object(params.clone()))?)
    };
    let metadata_literal = checked_literal(&Value::Object(final_metadata))?;

    let mut lines: Vec<String> = Vec::new();

    // ── imports ──────────────────────────────────────────────────────
    lines.push(format!("from {} import {}", config.module, config.class_name));
    lines.push(RUNTIME_IMPORT.to_string());
    lines.push(String::new());
    lines.push(String::new());

    // ── data ─────────────────────────────────────────────────────────
    lines.push("# Protocol data".to_string());
    lines.push(format!("{} = {}", config.data_key, data_literal));
    lines.push(String::new());

    if let Some(params_literal) = &params_literal {
        lines.push("# Advanced parameters for protocol customization".to_string());
        lines.push(format!("{PARAMS_NAME} = {params_literal}"));
        lines.push(String::new());
    }

    // ── metadata ─────────────────────────────────────────────────────
    lines.push("# Protocol metadata".to_string());
    lines.push(format!("{METADATA_NAME} = {metadata_literal}"));
    lines.push(String::new());
    lines.push(String::new());

    // ── entry point ──────────────────────────────────────────────────
    lines.push("def run(protocol: protocol_api.ProtocolContext):".to_string());
    lines.push("    \"\"\"Main protocol execution function\"\"\"".to_string());
    lines.push(String::new());

    if params_literal.is_some() {
        lines.push(format!("    {INSTANCE_NAME} = {}(", config.class_name));
        lines.push(format!("        {}={},", config.data_param, config.data_key));
        lines.push(format!("        {PARAMS_NAME}={PARAMS_NAME}"));
        lines.push("    )".to_string());
    } else {
        lines.push(format!(
            "    {INSTANCE_NAME} = {}({}={})",
            config.class_name, config.data_param, config.data_key
        ));
    }
    lines.push(format!("    {INSTANCE_NAME}.run(protocol)"));
    lines.push(String::new());

    Ok(lines.join("\n"))
}

/// Default record, then the kind's title, then every caller key on top.
pub fn merge_metadata(title: &str, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = DEFAULT_METADATA.to_map();
    merged.insert("protocolName".to_string(), Value::from(title));
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Unwraps `{"assemblies": [...]}` for assembly protocols; everything else
/// is passed through as given.
fn normalize_data(data: &Value, kind: ProtocolKind) -> Result<&Value> {
    let ProtocolKind::Assembly(_) = kind else {
        return Ok(data);
    };

    let actual = match data {
        Value::Object(map) => match wrapped_assemblies(map)? {
            Some(_) => &map["assemblies"],
            None => data,
        },
        _ => data,
    };

    if matches!(actual, Value::Array(items) if items.is_empty()) {
        return Err(GeneratorError::EmptyData("no assemblies provided"));
    }
    Ok(actual)
}

/// Formats `value` and reads the text back, refusing to emit a literal the
/// runtime would load as something else.
fn checked_literal(value: &Value) -> Result<String> {
    let text = format_value(value, 0);
    let back = literal::parse(&text).map_err(GeneratorError::RoundTrip)?;
    if &back != value {
        return Err(GeneratorError::RoundTrip(format!(
            "read back a different value from `{}`",
            text.lines().next().unwrap_or_default()
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn transformation_without_params() {
        let data = json!({"list_of_dna": ["a", "b"], "competent_cells": "DH5alpha"});
        let out = assemble(
            &data,
            &Map::new(),
            &Map::new(),
            ProtocolCategory::Transformation,
            None,
        )
        .unwrap();

        let expected = "\
from pudu.transformation import HeatShockTransformation
from opentrons import protocol_api


# Protocol data
transformation_data = {
    'list_of_dna': ['a', 'b'],
    'competent_cells': 'DH5alpha'
}

# Protocol metadata
metadata = {
    'protocolName': 'PUDU Transformation Protocol',
    'author': 'Researcher',
    'description': 'Automated protocol',
    'apiLevel': '2.20'
}


def run(protocol: protocol_api.ProtocolContext):
    \"\"\"Main protocol execution function\"\"\"

    protocol_instance = HeatShockTransformation(transformation_data=transformation_data)
    protocol_instance.run(protocol)
";
        assert_eq!(out, expected);
        assert!(!out.contains("json_params"));
    }

    #[test]
    fn plating_with_params_passes_both() {
        let data = json!({"bacterium_locations": {"A1": "X"}});
        let params = obj(json!({"replicates": 2}));
        let out = assemble(&data, &params, &Map::new(), ProtocolCategory::Plating, None).unwrap();

        assert!(out.starts_with("from pudu.plating import Plating\n"));
        assert!(out.contains("plating_data = {\n    'bacterium_locations': {\n        'A1': 'X'\n    }\n}\n"));
        assert!(out.contains(
            "# Advanced parameters for protocol customization\njson_params = {\n    'replicates': 2\n}\n"
        ));
        assert!(out.contains(
            "    protocol_instance = Plating(\n        plating_data=plating_data,\n        json_params=json_params\n    )\n    protocol_instance.run(protocol)\n"
        ));
    }

    #[test]
    fn regions_are_in_fixed_order() {
        let data = json!({"bacterium_locations": {}});
        let params = obj(json!({"replicates": 1}));
        let out = assemble(&data, &params, &Map::new(), ProtocolCategory::Plating, None).unwrap();

        let pos = |needle: &str| out.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        assert!(pos("from pudu.plating") < pos("plating_data ="));
        assert!(pos("plating_data =") < pos("json_params ="));
        assert!(pos("json_params =") < pos("metadata ="));
        assert!(pos("metadata =") < pos("def run("));
    }

    #[test]
    fn assembly_unwraps_assemblies_key() {
        let data = json!({"assemblies": [{"receiver": "r1", "parts": ["a"]}]});
        let out = assemble(
            &data,
            &Map::new(),
            &Map::new(),
            ProtocolCategory::Assembly,
            Some(AssemblySubtype::Manual),
        )
        .unwrap();

        assert!(out.starts_with("from pudu.assembly import ManualLoopAssembly\n"));
        assert!(out.contains("assembly_data = [\n    {\n        'receiver': 'r1',"));
        assert!(!out.contains("'assemblies'"));
        assert!(out.contains("ManualLoopAssembly(assembly_data=assembly_data)"));
    }

    #[test]
    fn assembly_requires_subtype() {
        let err = assemble(
            &json!([{"receiver": "r"}]),
            &Map::new(),
            &Map::new(),
            ProtocolCategory::Assembly,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::MissingSubtype));
    }

    #[test]
    fn empty_assemblies_are_fatal() {
        for data in [json!([]), json!({"assemblies": []})] {
            let err = assemble(
                &data,
                &Map::new(),
                &Map::new(),
                ProtocolCategory::Assembly,
                Some(AssemblySubtype::Sbol),
            )
            .unwrap_err();
            assert!(matches!(err, GeneratorError::EmptyData(_)));
        }
    }

    #[test]
    fn metadata_precedence() {
        let merged = merge_metadata("PUDU Plating Protocol", &Map::new());
        assert_eq!(merged["protocolName"], "PUDU Plating Protocol");
        assert_eq!(merged["author"], "Researcher");

        let overrides = obj(json!({"protocolName": "Mine", "apiLevel": "2.21", "extra": 1}));
        let merged = merge_metadata("PUDU Plating Protocol", &overrides);
        assert_eq!(merged["protocolName"], "Mine");
        assert_eq!(merged["apiLevel"], "2.21");
        assert_eq!(merged["description"], "Automated protocol");

        let keys: Vec<_> = merged.keys().cloned().collect();
        assert_eq!(keys, ["protocolName", "author", "description", "apiLevel", "extra"]);
    }

    #[test]
    fn output_is_deterministic() {
        let data = json!([{"Product": "p", "Backbone": "b", "PartsList": ["x", "y"], "Restriction Enzyme": "BsaI"}]);
        let params = obj(json!({"volume_total_reaction": 20, "replicates": 1}));
        let meta = obj(json!({"author": "Lab"}));

        let run = || {
            assemble(
                &data,
                &params,
                &meta,
                ProtocolCategory::Assembly,
                Some(AssemblySubtype::Sbol),
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn data_literal_reads_back() {
        let data = json!({"bacterium_locations": {"A1": "it's \"quoted\" \\ 🧫"}});
        let out = assemble(&data, &Map::new(), &Map::new(), ProtocolCategory::Plating, None).unwrap();

        let start = out.find("plating_data = ").unwrap() + "plating_data = ".len();
        let end = out[start..].find("\n\n").unwrap() + start;
        assert_eq!(literal::parse(&out[start..end]).unwrap(), data);
    }
}
