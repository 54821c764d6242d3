//! Output side: literal rendering and persisting the artifact.
pub mod python;

use std::path::Path;

use crate::error::{GeneratorError, Result};
use crate::model::GeneratedProtocol;

/// Write the generated program in one go; nothing is created until the
/// text is complete.
pub fn emit(protocol: &GeneratedProtocol, path: &Path) -> Result<()> {
    std::fs::write(path, &protocol.text).map_err(|source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = protocol.text.len(), "protocol written");
    Ok(())
}
