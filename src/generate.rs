//! Cited response generation pipeline.
//!
//! Sequences the whole flow for one call: build the reference index,
//! compose the three-turn prompt, await the model, rewrite citation
//! markers in its output, return the final text. Each call is stateless
//! and independent — the index is rebuilt per call and nothing is cached,
//! so concurrent calls need no coordination.

use anyhow::Result;

use crate::chat::{ChatModel, OpenAiChat};
use crate::citation::rewrite_citations;
use crate::config::ChatConfig;
use crate::models::{build_ref_index, Chunk};
use crate::prompt::compose_messages;

/// Generate an answer to `query` grounded in `chunks`, with citation
/// markers rewritten into inline annotations.
///
/// When `model` is `None`, a default OpenAI-backed model is built from
/// [`ChatConfig::default`] and the `OPENAI_API_KEY` environment variable;
/// a missing or malformed key fails before any network interaction.
/// Model invocation failures propagate as-is — no retries, no fallback
/// text, no partial rewriting.
pub async fn generate_cited_response(
    chunks: &[Chunk],
    system_prompt: &str,
    query: &str,
    model: Option<&dyn ChatModel>,
) -> Result<String> {
    let default_model;
    let model: &dyn ChatModel = match model {
        Some(model) => model,
        None => {
            default_model = OpenAiChat::from_env(&ChatConfig::default())?;
            &default_model
        }
    };

    let index = build_ref_index(chunks);
    let messages = compose_messages(chunks, system_prompt, query);
    let answer = model.invoke(&messages).await?;
    Ok(rewrite_citations(&answer, &index))
}

/// Like [`generate_cited_response`] with the default collaborator, but
/// honoring an explicit [`ChatConfig`] (model name, API base, timeout).
pub async fn generate_with_config(
    chunks: &[Chunk],
    system_prompt: &str,
    query: &str,
    config: &ChatConfig,
) -> Result<String> {
    let model = OpenAiChat::from_env(config)?;
    generate_cited_response(chunks, system_prompt, query, Some(&model)).await
}
