//! Embedding provider trait and implementations.
//!
//! - `OnnxEmbeddingProvider` loads a sentence-transformer ONNX model (e.g.
//!   all-MiniLM-L6-v2) via ort and tokenizes with the HuggingFace tokenizers
//!   crate. This is the production embedding backend.
//! - `MockEmbedding` provides deterministic hash-based vectors for testing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::{Arc, Mutex};

use atlas_core::error::AtlasError;
use ort::session::Session;
use ort::value::TensorRef;
use tokenizers::Tokenizer;
use tracing::info;

/// Provider of text embeddings.
///
/// Implementations convert text into fixed-dimensional vectors that capture
/// semantic meaning. The batch form is the primary operation: output row
/// order preserves input order, and exactly one row is produced per input.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts in one call, preserving input order.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, AtlasError>> + Send;

    /// Return the dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;

    /// Embed a single text, returning one vector rather than a one-row matrix.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, AtlasError>> + Send {
        let texts = vec![text.to_string()];
        async move {
            let mut rows = self.embed_batch(&texts).await?;
            if rows.len() != 1 {
                return Err(AtlasError::EmbeddingProvider(format!(
                    "expected 1 embedding row, got {}",
                    rows.len()
                )));
            }
            Ok(rows.remove(0))
        }
    }
}

/// Object-safe version of [`EmbeddingProvider`] for dynamic dispatch.
///
/// Because the `EmbeddingProvider` methods return `impl Future` they are not
/// object-safe. This trait uses boxed futures instead, allowing
/// `Box<dyn DynEmbeddingProvider>` to be stored in structs without generics.
///
/// A blanket implementation is provided so that every `EmbeddingProvider`
/// automatically implements `DynEmbeddingProvider`.
pub trait DynEmbeddingProvider: Send + Sync {
    /// Embed a single text (boxed future).
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, AtlasError>> + Send + 'a>,
    >;

    /// Embed a batch of texts (boxed future), preserving input order.
    fn embed_batch_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<Vec<f32>>, AtlasError>> + Send + 'a>,
    >;

    /// Return the dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;
}

/// Blanket impl: any `EmbeddingProvider` automatically implements
/// `DynEmbeddingProvider`.
impl<T: EmbeddingProvider> DynEmbeddingProvider for T {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, AtlasError>> + Send + 'a>,
    > {
        Box::pin(self.embed(text))
    }

    fn embed_batch_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<Vec<f32>>, AtlasError>> + Send + 'a>,
    > {
        Box::pin(self.embed_batch(texts))
    }

    fn dimensions(&self) -> usize {
        EmbeddingProvider::dimensions(self)
    }
}

// ---------------------------------------------------------------------------
// OnnxEmbeddingProvider - real ONNX Runtime inference
// ---------------------------------------------------------------------------

/// ONNX Runtime-backed embedding provider using a sentence-transformer model.
///
/// Expects a model directory containing:
/// - `model.onnx`  — the sentence-transformer ONNX export
/// - `tokenizer.json` — the HuggingFace fast-tokenizer file
///
/// The model should accept `input_ids`, `attention_mask`, and
/// `token_type_ids` as i64 inputs and produce token-level embeddings.
/// Masked mean pooling followed by L2 normalization yields one unit vector
/// per input. Construction is the single point where model-loading failure
/// is reported.
pub struct OnnxEmbeddingProvider {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    dimensions: usize,
}

// ort::Session is Send + Sync internally (uses Arc<SharedSessionInner>).
unsafe impl Send for OnnxEmbeddingProvider {}
unsafe impl Sync for OnnxEmbeddingProvider {}

impl std::fmt::Debug for OnnxEmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingProvider")
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl OnnxEmbeddingProvider {
    /// Load a sentence-transformer model from the given directory.
    ///
    /// The directory must contain `model.onnx` and `tokenizer.json`.
    pub fn from_directory(model_dir: &Path) -> Result<Self, AtlasError> {
        Self::from_files(
            &model_dir.join("model.onnx"),
            &model_dir.join("tokenizer.json"),
        )
    }

    /// Load from explicit model and tokenizer file paths.
    pub fn from_files(model_path: &Path, tokenizer_path: &Path) -> Result<Self, AtlasError> {
        if !model_path.exists() {
            return Err(AtlasError::EmbeddingProvider(format!(
                "ONNX model not found at {}",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(AtlasError::EmbeddingProvider(format!(
                "Tokenizer not found at {}",
                tokenizer_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| AtlasError::EmbeddingProvider(format!("ONNX session builder: {}", e)))?
            .with_intra_threads(1)
            .map_err(|e| AtlasError::EmbeddingProvider(format!("ONNX set threads: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| AtlasError::EmbeddingProvider(format!("ONNX load model: {}", e)))?;

        // Detect output dimensions from the model output type.
        // Sentence-transformer output is typically [batch, seq_len, hidden_dim].
        let dimensions = session
            .outputs()
            .first()
            .and_then(|out| out.dtype().tensor_shape())
            .and_then(|shape| shape.last().copied())
            .map(|d| if d > 0 { d as usize } else { 384 })
            .unwrap_or(384);

        let tokenizer = Tokenizer::from_file(tokenizer_path).map_err(|e| {
            AtlasError::EmbeddingProvider(format!("Failed to load tokenizer: {}", e))
        })?;

        info!(
            model = %model_path.display(),
            dimensions,
            "Loaded ONNX embedding model"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            dimensions,
        })
    }

    /// Tokenize one text, run inference, mean-pool, and L2-normalize.
    fn embed_sync(&self, text: &str) -> Result<Vec<f32>, AtlasError> {
        if text.is_empty() {
            return Err(AtlasError::EmbeddingProvider(
                "Cannot embed empty text".to_string(),
            ));
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| AtlasError::EmbeddingProvider(format!("Tokenization failed: {}", e)))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| t as i64)
            .collect();

        let seq_len = input_ids.len();

        // ndarray views with shape [1, seq_len] for batch size 1.
        let ids_array = ndarray::Array2::from_shape_vec((1, seq_len), input_ids)
            .map_err(|e| AtlasError::EmbeddingProvider(format!("input_ids array: {}", e)))?;
        let mask_array = ndarray::Array2::from_shape_vec((1, seq_len), attention_mask.clone())
            .map_err(|e| AtlasError::EmbeddingProvider(format!("attention_mask array: {}", e)))?;
        let type_array = ndarray::Array2::from_shape_vec((1, seq_len), token_type_ids)
            .map_err(|e| AtlasError::EmbeddingProvider(format!("token_type_ids array: {}", e)))?;

        let ids_ref = TensorRef::from_array_view(&ids_array)
            .map_err(|e| AtlasError::EmbeddingProvider(format!("TensorRef input_ids: {}", e)))?;
        let mask_ref = TensorRef::from_array_view(&mask_array).map_err(|e| {
            AtlasError::EmbeddingProvider(format!("TensorRef attention_mask: {}", e))
        })?;
        let type_ref = TensorRef::from_array_view(&type_array).map_err(|e| {
            AtlasError::EmbeddingProvider(format!("TensorRef token_type_ids: {}", e))
        })?;

        // Run inference: input_ids, attention_mask, token_type_ids
        let mut session = self
            .session
            .lock()
            .map_err(|e| AtlasError::EmbeddingProvider(format!("Session lock poisoned: {}", e)))?;
        let outputs = session
            .run(ort::inputs![ids_ref, mask_ref, type_ref])
            .map_err(|e| AtlasError::EmbeddingProvider(format!("ONNX inference failed: {}", e)))?;

        // Extract token embeddings as flat slice: [1, seq_len, hidden_dim].
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| AtlasError::EmbeddingProvider(format!("Extract embeddings: {}", e)))?;

        let shape_dims: Vec<i64> = shape.iter().copied().collect();
        if shape_dims.len() < 2 {
            return Err(AtlasError::EmbeddingProvider(format!(
                "Unexpected output shape: {:?}",
                shape_dims
            )));
        }

        let hidden_dim = *shape_dims.last().unwrap() as usize;

        // Mean pooling over the sequence dimension, masked by attention_mask.
        let mut pooled = vec![0.0f32; hidden_dim];
        let mut count = 0.0f32;

        for (tok_idx, &mask_val) in attention_mask.iter().enumerate() {
            if mask_val > 0 {
                let offset = tok_idx * hidden_dim;
                for dim in 0..hidden_dim {
                    pooled[dim] += data[offset + dim];
                }
                count += 1.0;
            }
        }

        if count > 0.0 {
            for val in &mut pooled {
                *val /= count;
            }
        }

        // L2-normalize the embedding.
        let norm: f32 = pooled.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut pooled {
                *val /= norm;
            }
        }

        Ok(pooled)
    }
}

impl EmbeddingProvider for OnnxEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AtlasError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // ONNX Runtime inference is CPU-bound; run the whole batch on a
        // blocking thread. Row order follows input order.
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let dims = self.dimensions;
        let texts_owned: Vec<String> = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let provider = OnnxEmbeddingProvider {
                session,
                tokenizer,
                dimensions: dims,
            };
            let mut rows = Vec::with_capacity(texts_owned.len());
            for text in &texts_owned {
                rows.push(provider.embed_sync(text)?);
            }
            Ok(rows)
        })
        .await
        .map_err(|e| AtlasError::EmbeddingProvider(format!("Embedding task panicked: {}", e)))?
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// MockEmbedding - deterministic hash-based vectors for testing
// ---------------------------------------------------------------------------

/// Mock embedding provider that returns deterministic 384-dimensional unit
/// vectors.
///
/// Each component is derived from a hash of the input text and the component
/// index, so identical inputs always produce identical outputs and distinct
/// inputs almost surely differ. Vectors are L2-normalized to match the ONNX
/// backend's output.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedding;

/// Dimensionality of [`MockEmbedding`] vectors.
const MOCK_DIMENSIONS: usize = 384;

impl MockEmbedding {
    pub fn new() -> Self {
        Self
    }

    fn hash_to_vector(text: &str) -> Vec<f32> {
        let mut result = Vec::with_capacity(MOCK_DIMENSIONS);
        for i in 0..MOCK_DIMENSIONS {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            i.hash(&mut hasher);
            let h = hasher.finish();
            let val = ((h as f64) / (u64::MAX as f64)) * 2.0 - 1.0;
            result.push(val as f32);
        }

        let norm: f32 = result.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut result {
                *val /= norm;
            }
        }

        result
    }
}

impl EmbeddingProvider for MockEmbedding {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AtlasError> {
        let mut rows = Vec::with_capacity(texts.len());
        for text in texts {
            if text.is_empty() {
                return Err(AtlasError::EmbeddingProvider(
                    "Cannot embed empty text".to_string(),
                ));
            }
            rows.push(Self::hash_to_vector(text));
        }
        Ok(rows)
    }

    fn dimensions(&self) -> usize {
        MOCK_DIMENSIONS
    }
}
