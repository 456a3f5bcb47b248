//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Failures inside the template substitution pipeline.
///
/// These never reach callers of [`crate::render::render_post`]; they select
/// the fallback document instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Annotation comment opened at byte {offset} is never closed")]
    UnterminatedAnnotation { offset: usize },

    #[error("Template has no content")]
    EmptyTemplate,
}
