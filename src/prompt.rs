//! Prompt composition for the citation protocol.
//!
//! Renders retrieved chunks into an `**ID:** / **Text:**` context block and
//! embeds it in the fixed task instructions that teach the model the
//! `$REF: <id>$` marker format. The composed message is its own
//! conversational turn, sent between the system prompt and the raw user
//! query — three turns total, in that order.

use crate::chat::ChatMessage;
use crate::models::Chunk;

/// Task instructions wrapped around the context block. The marker format
/// promised here is what [`crate::citation`] parses back out.
const INSTRUCTIONS: &str = r#"
I am going to ask a question in my next message. Here are some excerpts uniquely identified by an ID that may or may not be relevant.

You need to perform 2 tasks:
    1) Generate a response to answer the question. If these excerpts relate to my question, use them in your response. If not, ignore them, and rely on our conversation context.
    2) If any excerpt is used, generate in-text citation using the excerpt ID as follows - $REF: ID$. The formatting must be strictly followed. For example, if excerpt corresponding to ID 03b994bc-2fae-4e1e-a4cd-f0f3e6db2d90 is used in generating the response, source attribution must be -
    $REF: 03b994bc-2fae-4e1e-a4cd-f0f3e6db2d90$

Strictly follow the instructions of the above tasks.

Do not mention whether the content or previous context was used or not; respond seamlessly. Avoid phrases like "the provided content" or similar.

Take into account everything we've discussed so far, without assuming everything is relevant unless it clearly supports your answer.

-----

"#;

/// Render the context block: one `**ID:**/**Text:**` section per chunk,
/// joined by `---` separator lines. An empty chunk list yields an empty
/// string, not a separator-only one.
pub fn compose_context(chunks: &[Chunk]) -> String {
    let blocks: Vec<String> = chunks
        .iter()
        .map(|chunk| format!("**ID:** {}\n**Text:** {}\n", chunk.uuid, chunk.text))
        .collect();
    blocks.join("\n---\n\n")
}

/// Embed the rendered context block in the instruction template.
pub fn compose_instructions(chunks: &[Chunk]) -> String {
    format!("{}{}\n", INSTRUCTIONS, compose_context(chunks))
}

/// Build the three-turn message sequence for one generation call:
/// system prompt, instructions plus context, then the raw user query.
pub fn compose_messages(chunks: &[Chunk], system_prompt: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(compose_instructions(chunks)),
        ChatMessage::user(query),
    ]
}
