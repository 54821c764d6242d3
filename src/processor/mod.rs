//! The functional core: decide what kind of protocol a document is, then
//! turn it into program text.
pub mod assemble;
pub mod detect;
pub mod lexer;
pub mod literal;

use serde_json::Value;

use crate::error::Result;
use crate::model::{
    AssemblySubtype, GeneratedProtocol, ProtocolCategory, ProtocolKind, ProtocolRequest,
};

/// Where the resolved type came from, so the CLI can say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSource {
    /// Both halves given by the caller (or no subtype needed).
    Explicit,
    /// Category and subtype both detected.
    Detected,
    /// Category given as assembly, subtype detected.
    SubtypeInferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
    pub category: ProtocolCategory,
    pub subtype: Option<AssemblySubtype>,
    pub source: TypeSource,
}

/// Applies caller overrides, running detection only for what is missing.
pub fn resolve_type(
    document: &Value,
    category: Option<ProtocolCategory>,
    subtype: Option<AssemblySubtype>,
) -> Result<ResolvedType> {
    match (category, subtype) {
        (Some(ProtocolCategory::Assembly), Some(sub)) => Ok(ResolvedType {
            category: ProtocolCategory::Assembly,
            subtype: Some(sub),
            source: TypeSource::Explicit,
        }),
        (Some(ProtocolCategory::Assembly), None) => {
            let (detected, sub) = detect::detect(document)?;
            if detected != ProtocolCategory::Assembly {
                tracing::warn!(%detected, "document looks like a different protocol type");
            }
            Ok(ResolvedType {
                category: ProtocolCategory::Assembly,
                subtype: sub,
                source: TypeSource::SubtypeInferred,
            })
        }
        (Some(category), sub) => {
            if let Some(sub) = sub {
                tracing::warn!(%sub, %category, "--assembly-type ignored for non-assembly protocol");
            }
            Ok(ResolvedType {
                category,
                subtype: None,
                source: TypeSource::Explicit,
            })
        }
        (None, sub) => {
            if let Some(sub) = sub {
                tracing::warn!(%sub, "--assembly-type ignored without --protocol-type assembly");
            }
            let (category, subtype) = detect::detect(document)?;
            Ok(ResolvedType {
                category,
                subtype,
                source: TypeSource::Detected,
            })
        }
    }
}

/// Runs the assembler for an already resolved type.
pub fn generate(request: &ProtocolRequest, resolved: &ResolvedType) -> Result<GeneratedProtocol> {
    let kind = ProtocolKind::resolve(resolved.category, resolved.subtype)?;
    tracing::debug!(?kind, params = request.params.len(), "assembling protocol");

    let text = assemble::assemble(
        &request.data,
        &request.params,
        &request.metadata,
        resolved.category,
        resolved.subtype,
    )?;

    Ok(GeneratedProtocol {
        kind,
        text,
        param_count: request.params.len(),
    })
}
