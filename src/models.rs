//! Core data models for cited response generation.
//!
//! These types represent the retrieved excerpts that flow into prompt
//! composition and back out as resolved citation annotations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A retrieved text excerpt supplied as model context.
///
/// `uuid` is the reference identifier the model echoes back in citation
/// markers; it is expected to look like a UUID but is not validated here.
/// `source_data` carries open-ended provenance fields (page numbers, titles,
/// URLs) that get folded into the rendered annotation in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub uuid: String,
    pub render_name: String,
    #[serde(default)]
    pub source_data: Map<String, Value>,
}

/// Per-call lookup table from excerpt identifier to its full chunk record.
pub type RefIndex = HashMap<String, Chunk>;

/// Build the reference index for one generation call.
///
/// Chunks are copied so later mutation of caller-owned data cannot leak
/// into outputs. When two chunks share a `uuid`, the last one in input
/// order wins. An empty input yields an empty index.
pub fn build_ref_index(chunks: &[Chunk]) -> RefIndex {
    let mut index = RefIndex::with_capacity(chunks.len());
    for chunk in chunks {
        index.insert(chunk.uuid.clone(), chunk.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunk(uuid: &str, text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            uuid: uuid.to_string(),
            render_name: "doc.pdf".to_string(),
            source_data: Map::new(),
        }
    }

    #[test]
    fn test_empty_input_empty_index() {
        let index = build_ref_index(&[]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_one_entry_per_distinct_uuid() {
        let chunks = vec![chunk("aaa", "first"), chunk("bbb", "second")];
        let index = build_ref_index(&chunks);
        assert_eq!(index.len(), 2);
        assert_eq!(index["aaa"].text, "first");
        assert_eq!(index["bbb"].text, "second");
    }

    #[test]
    fn test_duplicate_uuid_last_wins() {
        let chunks = vec![chunk("aaa", "first"), chunk("aaa", "second")];
        let index = build_ref_index(&chunks);
        assert_eq!(index.len(), 1);
        assert_eq!(index["aaa"].text, "second");
    }

    #[test]
    fn test_chunk_deserialization_preserves_source_data_order() {
        let raw = r#"{
            "text": "body",
            "uuid": "abc",
            "render_name": "doc.pdf",
            "source_data": {"zebra": "1", "alpha": 2, "mango": true}
        }"#;
        let chunk: Chunk = serde_json::from_str(raw).unwrap();
        let keys: Vec<&str> = chunk.source_data.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zebra", "alpha", "mango"]);
        assert_eq!(chunk.source_data["alpha"], json!(2));
    }

    #[test]
    fn test_source_data_defaults_to_empty() {
        let raw = r#"{"text": "body", "uuid": "abc", "render_name": "doc.pdf"}"#;
        let chunk: Chunk = serde_json::from_str(raw).unwrap();
        assert!(chunk.source_data.is_empty());
    }
}
