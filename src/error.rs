//! Error types for IFC quantity extraction.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::UnitKind;

/// Errors that can occur when loading IFC files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exceeds the configured size limit.
    #[error("file '{path}' is {size_mb} MB, maximum is {max_mb} MB")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },
}

/// Errors reported by the model access layer.
///
/// `UnknownEntityType` and `UnitNotDeclared` describe expected absences;
/// callers decide whether they are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// The entity type does not exist in the active schema version.
    #[error("entity type '{tag}' does not exist in schema {schema}")]
    UnknownEntityType { tag: String, schema: String },

    /// A reference points to an entity that is not in the model.
    #[error("entity #{id} is not in the model")]
    MissingEntity { id: u64 },

    /// An entity does not have the shape the traversal expected.
    #[error("entity #{id} is {found}, expected {expected}")]
    UnexpectedShape {
        id: u64,
        expected: &'static str,
        found: String,
    },

    /// The model declares no unit of this kind.
    #[error("no {kind} unit declared in the model")]
    UnitNotDeclared { kind: UnitKind },
}

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The model could not be loaded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The model access layer failed in a way the extractors do not anticipate.
    #[error("model access failed: {0}")]
    Access(#[from] AccessError),
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },
}
