//! Citation marker parsing and rewriting.
//!
//! The model signals excerpt usage with inline markers of the form
//! `$REF: <id>$`, where `<id>` is one or more characters from `[a-f0-9-]`.
//! This module scans raw model output for those markers and rewrites them:
//! - a marker whose identifier resolves in the reference index becomes an
//!   `<InTextCitation ...>` annotation carrying the chunk's provenance,
//! - a marker with an unknown identifier is removed (the model may
//!   hallucinate identifiers that were never supplied),
//! - anything that does not match the marker grammar — uppercase hex,
//!   disallowed characters, missing delimiters — is left verbatim.
//!
//! Replacement is substring-based over the full marker text, so every
//! literal occurrence of the same marker resolves identically.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

use crate::models::{Chunk, RefIndex};

/// Marker grammar: literal `$REF: `, one or more `[a-f0-9-]`, literal `$`.
/// Case-sensitive.
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$REF: ([a-f0-9-]+)\$").expect("marker pattern is valid"));

/// Encoding set for annotation attribute values: unreserved characters
/// (`[A-Za-z0-9_.~-]`) and `/` pass through, everything else is
/// percent-encoded (space becomes `%20`, `&` becomes `%26`).
const ATTR_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'-')
    .remove(b'/');

/// Scan `text` left to right for citation markers, yielding
/// `(full_match, identifier)` pairs in order of first occurrence.
/// Matches are non-overlapping; malformed markers are skipped entirely.
pub fn find_markers(text: &str) -> impl Iterator<Item = (&str, &str)> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| match (caps.get(0), caps.get(1)) {
            (Some(full), Some(id)) => Some((full.as_str(), id.as_str())),
            _ => None,
        })
}

/// Rewrite model output against the reference index.
///
/// Every marker found in the original `text` is resolved: known
/// identifiers are replaced by a rendered annotation, unknown ones by the
/// empty string. Replacement applies to every literal occurrence of the
/// matched marker substring, and each unique marker is processed once.
/// All other text passes through byte-identical.
pub fn rewrite_citations(text: &str, index: &RefIndex) -> String {
    let mut rewritten = text.to_string();
    let mut seen: HashSet<&str> = HashSet::new();

    for (marker, id) in find_markers(text) {
        if !seen.insert(marker) {
            continue;
        }
        match index.get(id) {
            Some(chunk) => rewritten = rewritten.replace(marker, &render_annotation(chunk)),
            None => rewritten = rewritten.replace(marker, ""),
        }
    }

    rewritten
}

/// Render the inline annotation for a resolved chunk, preceded by a
/// newline. Attribute order is `chunkId`, `renderName`, then the
/// `source_data` keys in insertion order; every value is percent-encoded.
fn render_annotation(chunk: &Chunk) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(2 + chunk.source_data.len());
    pairs.push(("chunkId", chunk.uuid.clone()));
    pairs.push(("renderName", chunk.render_name.clone()));
    for (key, value) in &chunk.source_data {
        pairs.push((key.as_str(), scalar_text(value)));
    }

    let attrs: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, utf8_percent_encode(value, ATTR_VALUE)))
        .collect();

    format!("\n<InTextCitation {}></InTextCitation>", attrs.join(" "))
}

/// String form of a `source_data` scalar: JSON strings render bare,
/// other scalars use their JSON text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
