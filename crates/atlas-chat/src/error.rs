//! Error types for the question-answering interface.

use atlas_core::error::AtlasError;

/// Errors from the assistant.
///
/// Each pipeline stage wraps the underlying [`AtlasError`] in its own
/// variant so callers can tell which collaborator failed.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("question cannot be empty")]
    EmptyQuestion,
    #[error("question exceeds maximum length of {0} characters")]
    QuestionTooLong(usize),
    #[error("knowledge base update failed: {0}")]
    KnowledgeBase(AtlasError),
    #[error("retrieval failed: {0}")]
    Retrieval(AtlasError),
    #[error("generation failed: {0}")]
    Generation(AtlasError),
}
