use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GeneratorError;

/// Top-level experiment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolCategory {
    Assembly,
    Transformation,
    Plating,
}

/// Which downstream assembly class an assembly document targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblySubtype {
    Sbol,
    Manual,
    Domestication,
}

impl ProtocolCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assembly => "assembly",
            Self::Transformation => "transformation",
            Self::Plating => "plating",
        }
    }
}

impl AssemblySubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sbol => "SBOL",
            Self::Manual => "Manual",
            Self::Domestication => "Domestication",
        }
    }
}

impl fmt::Display for ProtocolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AssemblySubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolCategory {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assembly" => Ok(Self::Assembly),
            "transformation" => Ok(Self::Transformation),
            "plating" => Ok(Self::Plating),
            other => Err(GeneratorError::UnknownProtocolType(other.to_string())),
        }
    }
}

impl FromStr for AssemblySubtype {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SBOL" => Ok(Self::Sbol),
            "Manual" => Ok(Self::Manual),
            "Domestication" => Ok(Self::Domestication),
            other => Err(GeneratorError::UnknownProtocolType(format!(
                "assembly/{other}"
            ))),
        }
    }
}

/// A fully resolved protocol target. Assembly always carries its subtype,
/// so an unresolved assembly can't reach the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    Assembly(AssemblySubtype),
    Transformation,
    Plating,
}

impl ProtocolKind {
    pub fn resolve(
        category: ProtocolCategory,
        subtype: Option<AssemblySubtype>,
    ) -> Result<Self, GeneratorError> {
        match category {
            ProtocolCategory::Assembly => subtype
                .map(Self::Assembly)
                .ok_or(GeneratorError::MissingSubtype),
            ProtocolCategory::Transformation => Ok(Self::Transformation),
            ProtocolCategory::Plating => Ok(Self::Plating),
        }
    }

    pub fn category(self) -> ProtocolCategory {
        match self {
            Self::Assembly(_) => ProtocolCategory::Assembly,
            Self::Transformation => ProtocolCategory::Transformation,
            Self::Plating => ProtocolCategory::Plating,
        }
    }

    pub fn subtype(self) -> Option<AssemblySubtype> {
        match self {
            Self::Assembly(sub) => Some(sub),
            _ => None,
        }
    }

    pub fn config(self) -> &'static ProtocolConfig {
        match self {
            Self::Assembly(AssemblySubtype::Sbol) => &SBOL_ASSEMBLY,
            Self::Assembly(AssemblySubtype::Manual) => &MANUAL_ASSEMBLY,
            Self::Assembly(AssemblySubtype::Domestication) => &DOMESTICATION,
            Self::Transformation => &TRANSFORMATION,
            Self::Plating => &PLATING,
        }
    }
}

/// Names the generated program uses for one protocol kind.
#[derive(Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Variable holding the data literal.
    pub data_key: &'static str,
    /// Keyword the class constructor takes the data under.
    pub data_param: &'static str,
    pub class_name: &'static str,
    pub module: &'static str,
    /// Replaces the default `protocolName`.
    pub metadata_name: &'static str,
}

const SBOL_ASSEMBLY: ProtocolConfig = ProtocolConfig {
    data_key: "assembly_data",
    data_param: "assembly_data",
    class_name: "SBOLLoopAssembly",
    module: "pudu.assembly",
    metadata_name: "PUDU Assembly Protocol",
};

const MANUAL_ASSEMBLY: ProtocolConfig = ProtocolConfig {
    class_name: "ManualLoopAssembly",
    ..SBOL_ASSEMBLY
};

const DOMESTICATION: ProtocolConfig = ProtocolConfig {
    class_name: "Domestication",
    ..SBOL_ASSEMBLY
};

const TRANSFORMATION: ProtocolConfig = ProtocolConfig {
    data_key: "transformation_data",
    data_param: "transformation_data",
    class_name: "HeatShockTransformation",
    module: "pudu.transformation",
    metadata_name: "PUDU Transformation Protocol",
};

const PLATING: ProtocolConfig = ProtocolConfig {
    data_key: "plating_data",
    data_param: "plating_data",
    class_name: "Plating",
    module: "pudu.plating",
    metadata_name: "PUDU Plating Protocol",
};

/// Metadata record every generated protocol starts from.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultMetadata {
    #[serde(rename = "protocolName")]
    pub protocol_name: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    #[serde(rename = "apiLevel")]
    pub api_level: &'static str,
}

pub const DEFAULT_METADATA: DefaultMetadata = DefaultMetadata {
    protocol_name: "PUDU Protocol",
    author: "Researcher",
    description: "Automated protocol",
    api_level: "2.20",
};

impl DefaultMetadata {
    /// Field order follows the struct, which is the order emitted.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // a struct of string fields always serializes to an object
            _ => Map::new(),
        }
    }
}

/// Everything a caller hands to the generator after loading.
#[derive(Debug, Clone)]
pub struct ProtocolRequest {
    pub data: Value,
    /// Empty when no params document was given.
    pub params: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

/// Result of one generation run, handed to `writer` and the summary.
#[derive(Debug, Clone)]
pub struct GeneratedProtocol {
    pub kind: ProtocolKind,
    pub text: String,
    pub param_count: usize,
}
