//! # Refmark
//!
//! Generate chat-model answers with inline citations resolved against
//! retrieved excerpts.
//!
//! Refmark takes a user query plus a set of retrieved text excerpts
//! ("chunks"), asks a chat model to answer the query, and post-processes
//! the raw output: inline `$REF: <id>$` markers emitted by the model are
//! rewritten into `<InTextCitation ...>` annotations carrying the full
//! provenance of the cited excerpt. Unknown identifiers are removed;
//! malformed markers pass through untouched.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────┐   ┌─────────┐   ┌───────────┐   ┌──────────┐
//! │ Chunks │──▶│ Prompt   │──▶│ ChatModel │──▶│ Citation │──▶ final text
//! │ + query│   │ Composer │   │ (awaited) │   │ Rewriter │
//! └────────┘   └─────────┘   └───────────┘   └──────────┘
//!                                  ▲
//!                    injectable — defaults to OpenAI
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use refmark::generate::generate_cited_response;
//! use refmark::models::Chunk;
//!
//! # async fn run(chunks: Vec<Chunk>) -> anyhow::Result<()> {
//! let answer = generate_cited_response(
//!     &chunks,
//!     "You are a helpful assistant.",
//!     "What is the capital of France?",
//!     None, // use the default OpenAI-backed model
//! )
//! .await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Chunk record and per-call reference index |
//! | [`prompt`] | Context block and three-turn message composition |
//! | [`chat`] | Chat model trait and OpenAI-backed default |
//! | [`citation`] | Marker parsing and annotation rewriting |
//! | [`generate`] | End-to-end orchestration |
//! | [`config`] | TOML configuration for the default model |

pub mod chat;
pub mod citation;
pub mod config;
pub mod generate;
pub mod models;
pub mod prompt;
