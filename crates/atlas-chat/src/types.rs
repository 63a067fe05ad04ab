//! Request and response types for the assistant.

use serde::{Deserialize, Serialize};

use atlas_vector::store::{RetrievedDocument, DEFAULT_TOP_K};

/// Options controlling a single `ask` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskOptions {
    /// Number of documents to retrieve as context.
    pub top_k: usize,
    /// Maximum length of the generated answer.
    pub max_answer_length: usize,
    /// Whether the outcome should carry the context string and the raw
    /// retrieval results.
    pub return_context: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_answer_length: 256,
            return_context: false,
        }
    }
}

/// Result of a single `ask` call.
///
/// `context` and `retrieved` are populated only when
/// [`AskOptions::return_context`] was set; `context` stays `None` when no
/// documents were retrieved, which is distinct from an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskOutcome {
    pub question: String,
    pub answer: String,
    pub context: Option<String>,
    pub retrieved: Option<Vec<RetrievedDocument>>,
}

/// Statistics about the loaded knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseInfo {
    pub num_documents: usize,
    pub embedding_dimensions: usize,
}
