//! CLI argument definitions for the Atlas demo binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Atlas — a retrieval-augmented assistant for geography and climate questions.
#[derive(Parser, Debug)]
#[command(name = "atlas", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Use the deterministic mock embedding provider instead of the ONNX model.
    #[arg(long = "mock")]
    pub mock: bool,

    /// Ask a single question instead of running the canned demo.
    #[arg(short = 'q', long = "question")]
    pub question: Option<String>,

    /// Number of documents to retrieve per question.
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > ATLAS_CONFIG env var > ~/.atlas/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("ATLAS_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the retrieval depth.
    ///
    /// Priority: --top-k flag > config file value.
    pub fn resolve_top_k(&self, config_top_k: usize) -> usize {
        self.top_k.unwrap_or(config_top_k)
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".atlas").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".atlas").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_level_prefers_flag() {
        let args = CliArgs {
            config: None,
            log_level: Some("debug".to_string()),
            mock: false,
            question: None,
            top_k: None,
        };
        assert_eq!(args.resolve_log_level("info"), "debug");
    }

    #[test]
    fn test_resolve_log_level_falls_back_to_config() {
        let args = CliArgs {
            config: None,
            log_level: None,
            mock: false,
            question: None,
            top_k: None,
        };
        assert_eq!(args.resolve_log_level("warn"), "warn");
    }

    #[test]
    fn test_resolve_top_k_prefers_flag() {
        let args = CliArgs {
            config: None,
            log_level: None,
            mock: false,
            question: None,
            top_k: Some(7),
        };
        assert_eq!(args.resolve_top_k(3), 7);
        let args = CliArgs { top_k: None, ..args };
        assert_eq!(args.resolve_top_k(3), 3);
    }

    #[test]
    fn test_resolve_config_path_prefers_flag() {
        let args = CliArgs {
            config: Some(PathBuf::from("/tmp/custom.toml")),
            log_level: None,
            mock: false,
            question: None,
            top_k: None,
        };
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/custom.toml"));
    }
}
