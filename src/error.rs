//! Error types for metadata parsing and extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for metadata operations.
pub type MetaResult<T> = Result<T, MetaError>;

#[derive(Error, Debug)]
pub enum MetaError {
    /// A close line named a scope other than the innermost open one
    #[error("line {line}: END closes {actual:?} but the open scope is {}", .expected.as_deref().unwrap_or("<none>"))]
    StructuralMismatch {
        expected: Option<String>,
        actual: String,
        line: usize,
    },

    /// A key along a fixed extraction path is absent
    #[error("missing metadata field: {path}")]
    MissingField { path: String },

    /// A field exists but does not hold the expected kind of value
    #[error("metadata field {path} is not {expected}")]
    FieldType {
        path: String,
        expected: &'static str,
    },

    /// A key or value cannot be written in the line grammar
    #[error("cannot render {key:?}: {reason}")]
    Unrepresentable { key: String, reason: &'static str },

    /// The file has no metadata item with the requested name
    #[error("{} has no {attribute} metadata item; GDAL may have split it into flattened items, read a text dump of the attribute instead", .file.display())]
    MissingAttribute { file: PathBuf, attribute: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}
