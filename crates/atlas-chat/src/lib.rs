//! Question-answering interface for Atlas.
//!
//! Composes document retrieval with answer generation: the assistant embeds
//! a question, pulls the most similar documents from the store, and feeds
//! them as context to a generation backend.

pub mod assistant;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod types;

pub use assistant::Assistant;
pub use error::ChatError;
pub use generation::{AnswerGenerator, DynAnswerGenerator, ExtractiveGenerator, MockGenerator};
pub use prompt::answer_prompt;
pub use types::{AskOptions, AskOutcome, KnowledgeBaseInfo};
