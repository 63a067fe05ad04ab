//! Prompt templates for answer generation.
//!
//! These strings are a collaborator contract: generation backends are
//! prompted with exactly this layout, so the templates must not drift.

/// Format the generation prompt for a question, embedding the context when
/// one is present.
pub fn answer_prompt(question: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!(
            "Answer the following question based on the context provided.\n\nContext: {}\n\nQuestion: {}\n\nAnswer:",
            context, question
        ),
        None => format!("Question: {}\n\nAnswer:", question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_context() {
        let prompt = answer_prompt("What is a monsoon?", Some("Monsoons are seasonal winds."));
        assert_eq!(
            prompt,
            "Answer the following question based on the context provided.\n\n\
             Context: Monsoons are seasonal winds.\n\n\
             Question: What is a monsoon?\n\n\
             Answer:"
        );
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = answer_prompt("What is a monsoon?", None);
        assert_eq!(prompt, "Question: What is a monsoon?\n\nAnswer:");
    }

    #[test]
    fn test_prompt_with_multi_document_context() {
        let context = "First document.\n\nSecond document.";
        let prompt = answer_prompt("q", Some(context));
        assert!(prompt.contains("Context: First document.\n\nSecond document."));
        assert!(prompt.ends_with("Question: q\n\nAnswer:"));
    }

    #[test]
    fn test_empty_context_is_distinct_from_absent() {
        // An empty string still renders a Context section; only `None`
        // produces the context-free template.
        let with_empty = answer_prompt("q", Some(""));
        assert!(with_empty.contains("Context: "));
        let without = answer_prompt("q", None);
        assert!(!without.contains("Context"));
    }
}
