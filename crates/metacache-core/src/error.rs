//! Error types for metacache

use thiserror::Error;

/// Core error type for metacache operations.
///
/// Every variant is fatal to the `get_objects`/`refresh` call that raised
/// it and propagates to the caller unmodified. Nothing is retried
/// internally; retry is the caller's responsibility via a fresh `refresh`.
#[derive(Error, Debug)]
pub enum MetaCacheError {
    /// The row source failed to prepare, bind, or execute the query.
    #[error("Query execution error: {0}")]
    QueryExecution(String),

    /// No registered constructor matched after the full lineage walk.
    #[error("No matching constructor for object type '{0}'")]
    ConstructionUnresolved(String),

    /// A matching constructor was found but failed while building an
    /// individual object. The underlying cause is chained as the source.
    #[error("Error creating cache object")]
    ObjectConstruction(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Cancelled")]
    Cancelled,
}

/// Result type alias for metacache operations
pub type Result<T> = std::result::Result<T, MetaCacheError>;
