//! Answer generator trait and implementations.
//!
//! - `ExtractiveGenerator` composes answers by selecting the context
//!   sentences most relevant to the question. No model required.
//! - `MockGenerator` deterministically echoes the prompt for testing.
//!
//! Wiring to a real pretrained generation model is a thin adapter behind
//! [`AnswerGenerator`] and lives outside this crate.

use atlas_core::error::AtlasError;

use crate::prompt::answer_prompt;

/// Generator of answer text from a prompt.
///
/// `max_length` caps the generated answer in the backend's native unit
/// (characters for the backends in this crate, tokens for model backends).
pub trait AnswerGenerator: Send + Sync {
    /// Complete the given prompt.
    fn generate(
        &self,
        prompt: &str,
        max_length: usize,
    ) -> impl std::future::Future<Output = Result<String, AtlasError>> + Send;

    /// Answer a question, optionally grounded in context.
    ///
    /// The default formats the prompt via [`answer_prompt`] and delegates to
    /// [`generate`](AnswerGenerator::generate); backends that work directly
    /// on (question, context) pairs may override it.
    fn answer_question(
        &self,
        question: &str,
        context: Option<&str>,
        max_length: usize,
    ) -> impl std::future::Future<Output = Result<String, AtlasError>> + Send {
        let prompt = answer_prompt(question, context);
        async move { self.generate(&prompt, max_length).await }
    }
}

/// Object-safe version of [`AnswerGenerator`] for dynamic dispatch.
///
/// A blanket implementation is provided so that every `AnswerGenerator`
/// automatically implements `DynAnswerGenerator`.
pub trait DynAnswerGenerator: Send + Sync {
    /// Complete the given prompt (boxed future).
    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
        max_length: usize,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, AtlasError>> + Send + 'a>>;

    /// Answer a question with optional context (boxed future).
    fn answer_question_boxed<'a>(
        &'a self,
        question: &'a str,
        context: Option<&'a str>,
        max_length: usize,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, AtlasError>> + Send + 'a>>;
}

/// Blanket impl: any `AnswerGenerator` automatically implements
/// `DynAnswerGenerator`.
impl<T: AnswerGenerator> DynAnswerGenerator for T {
    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
        max_length: usize,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, AtlasError>> + Send + 'a>>
    {
        Box::pin(self.generate(prompt, max_length))
    }

    fn answer_question_boxed<'a>(
        &'a self,
        question: &'a str,
        context: Option<&'a str>,
        max_length: usize,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, AtlasError>> + Send + 'a>>
    {
        Box::pin(self.answer_question(question, context, max_length))
    }
}

/// Truncate a string to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// ExtractiveGenerator - model-free sentence selection
// ---------------------------------------------------------------------------

/// Answer returned when no context is available to extract from.
const NO_CONTEXT_ANSWER: &str =
    "I don't have enough information to answer that question.";

/// Model-free generator that answers by extracting the context sentences
/// with the highest term overlap against the question.
///
/// Deterministic: identical inputs always select the same sentences in the
/// same order.
#[derive(Debug, Clone)]
pub struct ExtractiveGenerator {
    max_sentences: usize,
}

impl ExtractiveGenerator {
    /// Create a generator selecting at most `max_sentences` sentences.
    pub fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences: max_sentences.max(1),
        }
    }
}

impl Default for ExtractiveGenerator {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Split text into sentences on `.` `!` `?` followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, c) in text.char_indices() {
        if (c == '.' || c == '!' || c == '?') && i + 1 < text.len() {
            let next = bytes.get(i + 1).copied().unwrap_or(0);
            if next == b' ' || next == b'\n' {
                result.push(&text[start..=i]);
                start = i + 1;
            }
        }
    }
    if start < text.len() {
        result.push(&text[start..]);
    }
    result
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extract lowercase terms of at least three characters.
fn terms(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() >= 3)
        .collect()
}

/// Count how many distinct question terms occur in the sentence.
fn overlap_score(sentence: &str, question_terms: &[String]) -> usize {
    let sentence_terms: std::collections::HashSet<String> =
        terms(sentence).into_iter().collect();
    question_terms
        .iter()
        .filter(|t| sentence_terms.contains(*t))
        .count()
}

impl AnswerGenerator for ExtractiveGenerator {
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<String, AtlasError> {
        if prompt.is_empty() {
            return Err(AtlasError::GenerationProvider(
                "Cannot generate from an empty prompt".to_string(),
            ));
        }

        // Without a (question, context) split, fall back to ranking the
        // prompt's own sentences by informativeness: unique terms weighted
        // by sentence length.
        let sentences = split_sentences(prompt);
        let mut scored: Vec<(f64, &str)> = sentences
            .iter()
            .map(|sent| {
                let words: Vec<&str> = sent.split_whitespace().collect();
                let unique: std::collections::HashSet<&str> = words.iter().copied().collect();
                let score = (unique.len() as f64) * (words.len() as f64).sqrt();
                (score, *sent)
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let answer = scored
            .into_iter()
            .take(self.max_sentences)
            .map(|(_, s)| s)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(truncate_chars(&answer, max_length))
    }

    async fn answer_question(
        &self,
        question: &str,
        context: Option<&str>,
        max_length: usize,
    ) -> Result<String, AtlasError> {
        let context = match context {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Ok(truncate_chars(NO_CONTEXT_ANSWER, max_length)),
        };

        let question_terms = terms(question);
        let sentences = split_sentences(context);

        let mut scored: Vec<(usize, &str)> = sentences
            .iter()
            .map(|sent| (overlap_score(sent, &question_terms), *sent))
            .collect();
        // Stable sort: ties keep context order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let selected: Vec<&str> = if scored.first().map(|(score, _)| *score).unwrap_or(0) > 0 {
            scored
                .into_iter()
                .filter(|(score, _)| *score > 0)
                .take(self.max_sentences)
                .map(|(_, s)| s)
                .collect()
        } else {
            // No term overlap at all: lead with the opening sentences.
            sentences.iter().take(self.max_sentences).copied().collect()
        };

        Ok(truncate_chars(&selected.join(" "), max_length))
    }
}

// ---------------------------------------------------------------------------
// MockGenerator - deterministic echo for testing
// ---------------------------------------------------------------------------

/// Mock generator that echoes the prompt, truncated to `max_length` chars.
///
/// Lets tests assert exactly what the orchestrator fed the backend.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl AnswerGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<String, AtlasError> {
        if prompt.is_empty() {
            return Err(AtlasError::GenerationProvider(
                "Cannot generate from an empty prompt".to_string(),
            ));
        }
        Ok(truncate_chars(prompt, max_length))
    }
}
