//! Error types for page-builder operations.

use thiserror::Error;

use crate::ComponentId;

/// Result type for document mutations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur when mutating a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// No template exists for the requested kind name.
    #[error("Unknown component kind: {0}")]
    UnknownKind(String),

    /// The referenced component is not in the document.
    #[error("Component not found: {0}")]
    NotFound(ComponentId),

    /// Requested geometry is not representable (non-positive or non-finite).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Style key would produce a malformed attribute.
    #[error("Invalid style key: {0:?}")]
    InvalidStyleKey(String),
}

/// Errors that can occur when loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Two components share the same identifier.
    #[error("Duplicate component id: {0}")]
    DuplicateId(ComponentId),

    /// A component has geometry or style that mutations would reject.
    #[error("Invalid component {id}: {source}")]
    InvalidComponent {
        /// The offending component.
        id: ComponentId,
        /// What is wrong with it.
        #[source]
        source: MutationError,
    },
}
