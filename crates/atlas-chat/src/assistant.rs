//! Assistant orchestrator: retrieval composed with answer generation.
//!
//! The assistant owns the document store and a generation backend. Each
//! question is validated, embedded and matched against the store, and the
//! retrieved documents are passed as context to the generator.

use tracing::{debug, info};

use atlas_vector::store::DocumentStore;

use crate::error::ChatError;
use crate::generation::{AnswerGenerator, DynAnswerGenerator};
use crate::types::{AskOptions, AskOutcome, KnowledgeBaseInfo};

/// Maximum question length in characters.
pub const MAX_QUESTION_LENGTH: usize = 2000;

/// Separator between document texts in the context string.
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Question-answering assistant over a document store.
///
/// Uses dynamic dispatch for the generation backend so production code can
/// supply a model adapter while tests use `MockGenerator`.
pub struct Assistant {
    retriever: DocumentStore,
    generator: Box<dyn DynAnswerGenerator>,
}

impl Assistant {
    /// Create an assistant from a document store and a generation backend.
    pub fn new(retriever: DocumentStore, generator: impl AnswerGenerator + 'static) -> Self {
        Self {
            retriever,
            generator: Box::new(generator),
        }
    }

    /// Create an assistant from a pre-boxed dynamic generation backend.
    pub fn new_dyn(retriever: DocumentStore, generator: Box<dyn DynAnswerGenerator>) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    /// Embed and store a batch of documents as the knowledge base.
    ///
    /// May be called repeatedly; batches append in order.
    pub async fn load_knowledge_base(&self, documents: &[String]) -> Result<(), ChatError> {
        self.retriever
            .add_documents(documents)
            .await
            .map_err(ChatError::KnowledgeBase)?;
        info!(
            loaded = documents.len(),
            total = self.retriever.len(),
            "Knowledge base updated"
        );
        Ok(())
    }

    /// Answer a question using retrieved documents as context.
    ///
    /// Empty and whitespace-only questions are rejected. When the store
    /// yields no documents the generator is invoked without a context
    /// section rather than with an empty one. All collaborator failures
    /// propagate; nothing is retried or replaced with a fallback answer.
    pub async fn ask(&self, question: &str, options: &AskOptions) -> Result<AskOutcome, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        if question.len() > MAX_QUESTION_LENGTH {
            return Err(ChatError::QuestionTooLong(MAX_QUESTION_LENGTH));
        }

        let retrieved = self
            .retriever
            .retrieve(question, options.top_k)
            .await
            .map_err(ChatError::Retrieval)?;

        let context = if retrieved.is_empty() {
            None
        } else {
            Some(
                retrieved
                    .iter()
                    .map(|doc| doc.text.as_str())
                    .collect::<Vec<_>>()
                    .join(CONTEXT_SEPARATOR),
            )
        };

        debug!(
            retrieved = retrieved.len(),
            has_context = context.is_some(),
            "Generating answer"
        );

        let answer = self
            .generator
            .answer_question_boxed(question, context.as_deref(), options.max_answer_length)
            .await
            .map_err(ChatError::Generation)?;

        let (context, retrieved) = if options.return_context {
            (context, Some(retrieved))
        } else {
            (None, None)
        };

        Ok(AskOutcome {
            question: question.to_string(),
            answer,
            context,
            retrieved,
        })
    }

    /// Statistics about the loaded knowledge base.
    pub fn knowledge_base_info(&self) -> KnowledgeBaseInfo {
        KnowledgeBaseInfo {
            num_documents: self.retriever.len(),
            embedding_dimensions: self.retriever.provider_dimensions(),
        }
    }

    /// Remove every document from the knowledge base. Idempotent.
    pub fn clear_knowledge_base(&self) {
        self.retriever.clear();
    }

    /// Access the underlying document store.
    pub fn retriever(&self) -> &DocumentStore {
        &self.retriever
    }
}
