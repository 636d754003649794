//! Content hashes and conditional-request matching.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::EngineResult;

/// Quoted hex SHA-256 of the serialized payload.
///
/// `serde_json` objects keep their keys sorted, so equal values always
/// serialize to equal bytes.
pub fn compute_etag(value: &Value) -> EngineResult<String> {
    let bytes = serde_json::to_vec(value)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("\"{}\"", hex::encode(digest)))
}

/// Returns true if an `If-None-Match` header value matches `etag`.
///
/// Accepts `*`, comma-separated lists and weak (`W/`) validators. Comparison
/// is weak: the opaque tags are compared with any `W/` prefix removed.
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let wanted = opaque_tag(etag);
    if_none_match
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| candidate == "*" || opaque_tag(candidate) == wanted)
}

fn opaque_tag(tag: &str) -> &str {
    let tag = tag.trim();
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    tag.trim_matches('"')
}
