//! In-memory document store and retriever.
//!
//! Owns the document texts and their embedding rows as index-aligned
//! parallel sequences behind a single `RwLock`, so every read observes both
//! sequences at one point in time. Appends are staged: all embeddings for a
//! batch are computed and validated before either sequence is touched, so a
//! failed batch leaves the store unchanged.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use atlas_core::error::{AtlasError, Result};

use crate::embedding::{DynEmbeddingProvider, EmbeddingProvider};
use crate::ranker::rank;

/// Default number of documents returned per retrieval query.
pub const DEFAULT_TOP_K: usize = 3;

/// A single retrieval result: a fresh copy of the document text, its
/// similarity score, and its insertion index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    pub score: f64,
    pub index: usize,
}

#[derive(Debug, Default)]
struct StoreInner {
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    /// Fixed by the first committed batch; `None` while the store is empty.
    dimensions: Option<usize>,
}

/// Document store answering retrieval queries by cosine similarity.
///
/// Uses dynamic dispatch (`Box<dyn DynEmbeddingProvider>`) so that
/// production code can supply `OnnxEmbeddingProvider` while tests use
/// `MockEmbedding`. Both sequences live under one lock: a reader can never
/// observe a document without its embedding row or vice versa.
pub struct DocumentStore {
    inner: Arc<RwLock<StoreInner>>,
    embedder: Box<dyn DynEmbeddingProvider>,
}

impl DocumentStore {
    /// Create an empty store backed by the given embedding provider.
    pub fn new(embedder: impl EmbeddingProvider + 'static) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            embedder: Box::new(embedder),
        }
    }

    /// Create an empty store from a pre-boxed dynamic embedding provider.
    pub fn new_dyn(embedder: Box<dyn DynEmbeddingProvider>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            embedder,
        }
    }

    /// Embed and append a batch of documents.
    ///
    /// One batched provider call per invocation; an empty batch is a no-op
    /// that never reaches the provider. All rows are validated (count and
    /// dimensional consistency, including against the store's established
    /// dimension) before anything is committed, so on any failure the store
    /// is left exactly as it was.
    pub async fn add_documents(&self, texts: &[String]) -> Result<()> {
        if texts.is_empty() {
            return Ok(());
        }

        let rows = self.embedder.embed_batch_boxed(texts).await?;

        if rows.len() != texts.len() {
            return Err(AtlasError::EmbeddingProvider(format!(
                "provider returned {} rows for {} texts",
                rows.len(),
                texts.len()
            )));
        }

        let batch_dim = rows[0].len();
        if batch_dim == 0 {
            return Err(AtlasError::EmbeddingProvider(
                "provider returned a zero-dimensional embedding".to_string(),
            ));
        }
        for row in &rows {
            if row.len() != batch_dim {
                return Err(AtlasError::DimensionMismatch {
                    expected: batch_dim,
                    actual: row.len(),
                });
            }
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|e| AtlasError::Store(format!("lock poisoned: {}", e)))?;

        if let Some(expected) = inner.dimensions {
            if batch_dim != expected {
                return Err(AtlasError::DimensionMismatch {
                    expected,
                    actual: batch_dim,
                });
            }
        } else {
            inner.dimensions = Some(batch_dim);
        }

        inner.documents.extend(texts.iter().cloned());
        inner.embeddings.extend(rows);

        debug!(
            added = texts.len(),
            total = inner.documents.len(),
            "Documents added to store"
        );
        Ok(())
    }

    /// Retrieve the documents most similar to `query`.
    ///
    /// An empty store returns an empty sequence without calling the
    /// provider. Otherwise the query is embedded once and ranked against the
    /// full stored matrix; results arrive in non-increasing score order,
    /// exactly `min(top_k, len)` of them.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed_boxed(query).await?;

        let inner = self
            .inner
            .read()
            .map_err(|e| AtlasError::Store(format!("lock poisoned: {}", e)))?;

        let hits = rank(&query_vec, &inner.embeddings, top_k)?;

        Ok(hits
            .into_iter()
            .map(|hit| RetrievedDocument {
                text: inner.documents[hit.index].clone(),
                score: hit.score,
                index: hit.index,
            })
            .collect())
    }

    /// Return a snapshot copy of all documents in insertion order.
    pub fn get_all_documents(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.documents.clone())
            .unwrap_or_default()
    }

    /// Empty both sequences. Idempotent; the embedding dimension is
    /// re-established by the next append.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.documents.clear();
            inner.embeddings.clear();
            inner.dimensions = None;
            debug!("Document store cleared");
        }
    }

    /// Return the number of stored documents.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.documents.len()).unwrap_or(0)
    }

    /// Return true if the store contains no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The embedding dimension fixed by the first committed batch, if any.
    pub fn dimensions(&self) -> Option<usize> {
        self.inner.read().map(|inner| inner.dimensions).unwrap_or(None)
    }

    /// The dimensionality advertised by the backing provider.
    pub fn provider_dimensions(&self) -> usize {
        self.embedder.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbedding;
    use std::collections::HashMap;

    /// Provider with hand-set vectors per known text; unknown text errors.
    struct FixtureEmbedding {
        vectors: HashMap<String, Vec<f32>>,
        dims: usize,
    }

    impl FixtureEmbedding {
        fn new(entries: &[(&str, &[f32])]) -> Self {
            let dims = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.to_vec()))
                    .collect(),
                dims,
            }
        }
    }

    impl EmbeddingProvider for FixtureEmbedding {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            texts
                .iter()
                .map(|t| {
                    self.vectors.get(t).cloned().ok_or_else(|| {
                        AtlasError::EmbeddingProvider(format!("no fixture vector for {:?}", t))
                    })
                })
                .collect()
        }

        fn dimensions(&self) -> usize {
            self.dims
        }
    }

    /// Provider that always fails; proves certain paths never embed.
    struct FailingEmbedding;

    impl EmbeddingProvider for FailingEmbedding {
        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(AtlasError::EmbeddingProvider(
                "model unreachable".to_string(),
            ))
        }

        fn dimensions(&self) -> usize {
            384
        }
    }

    /// Provider that drops the last row of every batch.
    struct ShortBatchEmbedding;

    impl EmbeddingProvider for ShortBatchEmbedding {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let n = texts.len().saturating_sub(1);
            Ok(vec![vec![1.0f32, 0.0]; n])
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    fn owned(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_and_retrieve() {
        let store = DocumentStore::new(MockEmbedding::new());
        let docs = owned(&["alpha document", "beta document"]);
        store.add_documents(&docs).await.unwrap();

        assert_eq!(store.len(), 2);

        let results = store.retrieve("alpha document", 5).await.unwrap();
        assert_eq!(results.len(), 2);
        // Exact text match ranks first with score ~1.0.
        assert_eq!(results[0].text, "alpha document");
        assert_eq!(results[0].index, 0);
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_retrieve_empty_store_returns_empty() {
        let store = DocumentStore::new(MockEmbedding::new());
        let results = store.retrieve("anything", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_empty_store_never_embeds() {
        // FailingEmbedding errors on every call, so an Ok result proves the
        // provider was not invoked.
        let store = DocumentStore::new(FailingEmbedding);
        let results = store.retrieve("anything", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_add_empty_batch_is_noop() {
        let store = DocumentStore::new(FailingEmbedding);
        store.add_documents(&[]).await.unwrap();
        assert_eq!(store.len(), 0);
        assert_eq!(store.dimensions(), None);
    }

    #[tokio::test]
    async fn test_add_failure_leaves_store_unchanged() {
        let store = DocumentStore::new(FailingEmbedding);
        let result = store.add_documents(&owned(&["doc"])).await;
        assert!(matches!(
            result.unwrap_err(),
            AtlasError::EmbeddingProvider(_)
        ));
        assert_eq!(store.len(), 0);
        assert!(store.get_all_documents().is_empty());
    }

    #[tokio::test]
    async fn test_add_wrong_row_count_leaves_store_unchanged() {
        let store = DocumentStore::new(ShortBatchEmbedding);
        let result = store.add_documents(&owned(&["one", "two"])).await;
        assert!(matches!(
            result.unwrap_err(),
            AtlasError::EmbeddingProvider(_)
        ));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_add_inconsistent_batch_dimensions() {
        let provider = FixtureEmbedding::new(&[
            ("a", &[1.0, 0.0][..]),
            ("b", &[1.0, 0.0, 0.0][..]),
        ]);
        let store = DocumentStore::new(provider);
        let result = store.add_documents(&owned(&["a", "b"])).await;
        assert!(matches!(
            result.unwrap_err(),
            AtlasError::DimensionMismatch { .. }
        ));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_dimension_fixed_by_first_batch() {
        let provider = FixtureEmbedding::new(&[
            ("short", &[1.0, 0.0][..]),
            ("long", &[1.0, 0.0, 0.0][..]),
        ]);
        let store = DocumentStore::new(provider);

        store.add_documents(&owned(&["short"])).await.unwrap();
        assert_eq!(store.dimensions(), Some(2));

        let result = store.add_documents(&owned(&["long"])).await;
        match result.unwrap_err() {
            AtlasError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected DimensionMismatch, got {:?}", other),
        }
        // First batch survives, failed batch left no trace.
        assert_eq!(store.len(), 1);
        assert_eq!(store.dimensions(), Some(2));
    }

    #[tokio::test]
    async fn test_query_dimension_mismatch_surfaces() {
        let provider = FixtureEmbedding::new(&[
            ("doc", &[1.0, 0.0][..]),
            ("query", &[1.0, 0.0, 0.0][..]),
        ]);
        let store = DocumentStore::new(provider);
        store.add_documents(&owned(&["doc"])).await.unwrap();

        let result = store.retrieve("query", 1).await;
        assert!(matches!(
            result.unwrap_err(),
            AtlasError::DimensionMismatch { .. }
        ));
    }

    #[tokio::test]
    async fn test_append_order_and_index_offsets() {
        let store = DocumentStore::new(MockEmbedding::new());
        let first = owned(&["d1a", "d1b"]);
        let second = owned(&["d2a", "d2b"]);

        store.add_documents(&first).await.unwrap();
        store.add_documents(&second).await.unwrap();

        let all = store.get_all_documents();
        assert_eq!(all, owned(&["d1a", "d1b", "d2a", "d2b"]));

        // A document from the second batch keeps its offset index.
        let results = store.retrieve("d2a", 1).await.unwrap();
        assert_eq!(results[0].index, 2);
        assert_eq!(results[0].text, "d2a");
    }

    #[tokio::test]
    async fn test_retrieve_returns_min_of_top_k_and_len() {
        let store = DocumentStore::new(MockEmbedding::new());
        store
            .add_documents(&owned(&["a", "b", "c", "d"]))
            .await
            .unwrap();

        assert_eq!(store.retrieve("a", 2).await.unwrap().len(), 2);
        assert_eq!(store.retrieve("a", 4).await.unwrap().len(), 4);
        assert_eq!(store.retrieve("a", 100).await.unwrap().len(), 4);
        assert!(store.retrieve("a", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_scores_non_increasing() {
        let store = DocumentStore::new(MockEmbedding::new());
        let docs: Vec<String> = (0..10).map(|i| format!("document number {}", i)).collect();
        store.add_documents(&docs).await.unwrap();

        let results = store.retrieve("document number 3", 10).await.unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_retrieve_is_idempotent() {
        let store = DocumentStore::new(MockEmbedding::new());
        store
            .add_documents(&owned(&["one", "two", "three"]))
            .await
            .unwrap();

        let first = store.retrieve("two", 3).await.unwrap();
        let second = store.retrieve("two", 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = DocumentStore::new(MockEmbedding::new());
        store.add_documents(&owned(&["doc"])).await.unwrap();
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
        assert!(store.get_all_documents().is_empty());
        assert_eq!(store.dimensions(), None);
        assert!(store.retrieve("doc", 3).await.unwrap().is_empty());

        store.clear();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_documents_is_a_snapshot() {
        let store = DocumentStore::new(MockEmbedding::new());
        store.add_documents(&owned(&["doc"])).await.unwrap();

        let mut snapshot = store.get_all_documents();
        snapshot.push("tampered".to_string());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all_documents(), owned(&["doc"]));
    }

    #[tokio::test]
    async fn test_desert_query_outranks_ocean() {
        // Hand-set geometry: the query vector points toward the desert
        // document's region of the space.
        let provider = FixtureEmbedding::new(&[
            ("A desert is hot and dry.", &[1.0, 0.2, 0.0][..]),
            ("The ocean is deep and salty.", &[0.0, 1.0, 0.1][..]),
            ("Tell me about heat and sand", &[0.9, 0.1, 0.0][..]),
        ]);
        let store = DocumentStore::new(provider);
        store
            .add_documents(&owned(&[
                "A desert is hot and dry.",
                "The ocean is deep and salty.",
            ]))
            .await
            .unwrap();

        let results = store
            .retrieve("Tell me about heat and sand", 2)
            .await
            .unwrap();
        assert_eq!(results[0].text, "A desert is hot and dry.");
        assert_eq!(results[0].index, 0);
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_provider_dimensions_exposed() {
        let store = DocumentStore::new(MockEmbedding::new());
        assert_eq!(store.provider_dimensions(), 384);
    }

    #[tokio::test]
    async fn test_default_top_k_constant() {
        assert_eq!(DEFAULT_TOP_K, 3);
    }
}
