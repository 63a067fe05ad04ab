//! Brute-force cosine-similarity ranking.
//!
//! Pure functions over a query vector and a document matrix. Ranking is a
//! linear scan: O(n·d) per query, which is the intended design for the
//! moderate corpus sizes this store targets.

use serde::{Deserialize, Serialize};

use atlas_core::error::{AtlasError, Result};

/// Stabilizing constant added to every Euclidean norm before division.
pub const EPSILON: f64 = 1e-10;

/// A single ranked entry: the document's insertion index and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    pub index: usize,
    pub score: f64,
}

/// Compute ε-stabilized cosine similarity between two equal-length vectors.
///
/// Each vector is divided by its own Euclidean norm plus [`EPSILON`]. For
/// vectors whose true norm is below ~1e-10 this is NOT exact cosine
/// similarity: degenerate near-zero vectors score near zero instead of
/// producing NaN or Inf. Callers must have validated the lengths.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    dot / ((norm_a.sqrt() + EPSILON) * (norm_b.sqrt() + EPSILON))
}

/// Rank `documents` against `query` by descending cosine similarity.
///
/// Returns at most `top_k` hits. Ties are broken by ascending insertion
/// index (stable sort), so the ranking is deterministic and reproducible.
/// An empty document matrix yields an empty ranking; a document row whose
/// length differs from the query's is a `DimensionMismatch` error.
pub fn rank(query: &[f32], documents: &[Vec<f32>], top_k: usize) -> Result<Vec<RankedHit>> {
    if query.is_empty() {
        return Err(AtlasError::InvalidArgument(
            "query vector is empty".to_string(),
        ));
    }

    if documents.is_empty() {
        return Ok(Vec::new());
    }

    for row in documents {
        if row.len() != query.len() {
            return Err(AtlasError::DimensionMismatch {
                expected: query.len(),
                actual: row.len(),
            });
        }
    }

    let mut hits: Vec<RankedHit> = documents
        .iter()
        .enumerate()
        .map(|(index, row)| RankedHit {
            index,
            score: cosine_similarity(query, row),
        })
        .collect();

    // Stable sort by descending score; equal scores keep insertion order.
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(top_k);

    Ok(hits)
}
