//! # Refmark CLI
//!
//! Ask a chat model a question grounded in retrieved excerpts and print
//! the answer with inline citation annotations.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! refmark --chunks ./chunks.json "What is the capital of France?"
//! ```
//!
//! The chunks file is a JSON array of excerpt records:
//!
//! ```json
//! [
//!   {
//!     "text": "Paris is the capital of France.",
//!     "uuid": "03b994bc-2fae-4e1e-a4cd-f0f3e6db2d90",
//!     "render_name": "doc1.pdf",
//!     "source_data": {"page": "3"}
//!   }
//! ]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use refmark::config::{load_config, Config};
use refmark::generate::generate_with_config;
use refmark::models::Chunk;

/// Answer a question from retrieved excerpts, with inline citations.
#[derive(Parser)]
#[command(
    name = "refmark",
    about = "Generate chat-model answers with inline citations resolved against retrieved excerpts",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a JSON file holding the retrieved chunks.
    #[arg(long)]
    chunks: PathBuf,

    /// System prompt sent as the first conversational turn.
    #[arg(long, default_value = "You are a helpful assistant.")]
    system: String,

    /// The question to answer.
    query: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let raw = std::fs::read_to_string(&cli.chunks)
        .with_context(|| format!("Failed to read chunks file: {}", cli.chunks.display()))?;
    let chunks: Vec<Chunk> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse chunks file: {}", cli.chunks.display()))?;

    let answer = generate_with_config(&chunks, &cli.system, &cli.query, &config.chat).await?;
    println!("{}", answer);

    Ok(())
}
