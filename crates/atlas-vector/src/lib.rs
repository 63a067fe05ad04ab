//! Atlas vector crate - embedding providers, similarity ranking, and the
//! document store.
//!
//! Provides an embedding-provider trait with an ONNX sentence-transformer
//! backend and a deterministic mock, a brute-force cosine-similarity ranker,
//! and the in-memory document store that answers retrieval queries.

pub mod embedding;
pub mod ranker;
pub mod store;

pub use embedding::{DynEmbeddingProvider, EmbeddingProvider, MockEmbedding, OnnxEmbeddingProvider};
pub use ranker::{rank, RankedHit, EPSILON};
pub use store::{DocumentStore, RetrievedDocument, DEFAULT_TOP_K};
