use crate::error::ExportError;
use crate::model::ExtractionResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the result as pretty-printed JSON.
///
/// The document is rendered before the file is created, so a serialization
/// failure leaves `path` untouched.
pub fn export_json<P: AsRef<Path>>(result: &ExtractionResult, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = to_json(result)?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

/// Renders the result as pretty-printed JSON, non-ASCII text kept as is.
pub fn to_json(result: &ExtractionResult) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(result)?)
}
