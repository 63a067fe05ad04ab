//! Atlas demo binary - composition root.
//!
//! Ties the Atlas crates together into a single executable:
//! 1. Load configuration from TOML
//! 2. Build the embedding provider (ONNX sentence-transformer, or mock)
//! 3. Assemble the assistant (document store + extractive answer backend)
//! 4. Load the built-in geography/climate dataset
//! 5. Answer the demo questions (or a single `--question`) and print results
//!
//! Failures surface verbatim; there are no fallback answers.

mod cli;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use atlas_chat::{AskOptions, Assistant, ExtractiveGenerator};
use atlas_core::config::AtlasConfig;
use atlas_core::dataset::{dataset, dataset_info};
use atlas_vector::embedding::{MockEmbedding, OnnxEmbeddingProvider};
use atlas_vector::store::DocumentStore;

use cli::CliArgs;

/// Demo questions, answered in order when no `--question` is given.
const DEMO_QUESTIONS: [&str; 4] = [
    "What is the highest mountain in the world?",
    "Which is the largest ocean on Earth?",
    "How much have global temperatures increased?",
    "What is special about the Amazon rainforest?",
];

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = AtlasConfig::load_or_default(&args.resolve_config_path());

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(args, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: CliArgs, config: AtlasConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = if args.mock {
        tracing::info!("Using deterministic mock embedding provider");
        DocumentStore::new(MockEmbedding::new())
    } else {
        let model_dir = expand_home(&config.embedding.model_dir);
        let provider = OnnxEmbeddingProvider::from_directory(&model_dir)?;
        DocumentStore::new(provider)
    };

    let assistant = Assistant::new(
        store,
        ExtractiveGenerator::new(config.generation.max_sentences),
    );

    let info = dataset_info();
    println!(
        "Loading {} documents across {} topics into the knowledge base...",
        info.num_documents,
        info.topics.len()
    );
    assistant.load_knowledge_base(&dataset()).await?;

    let kb = assistant.knowledge_base_info();
    println!(
        "Knowledge base ready: {} documents, {}-dimensional embeddings\n",
        kb.num_documents, kb.embedding_dimensions
    );

    let options = AskOptions {
        top_k: args.resolve_top_k(config.retrieval.top_k),
        max_answer_length: config.generation.max_answer_length,
        return_context: false,
    };

    let questions: Vec<String> = match args.question {
        Some(q) => vec![q],
        None => DEMO_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    };

    for question in &questions {
        let outcome = assistant.ask(question, &options).await?;
        println!("Q: {}", outcome.question);
        println!("A: {}\n", outcome.answer);
    }

    Ok(())
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
        if let Ok(home) = std::env::var("USERPROFILE") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
