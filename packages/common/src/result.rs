use crate::error::DocumentError;

/// Result type for document reading and validation
pub type DocumentResult<T> = Result<T, DocumentError>;
