//! Snapshot cache keys.

use crate::query::ResolvedQuery;

/// Builds the cache key `investor:from_to:base:v{version}`.
///
/// The schema version lets a payload change invalidate every stored entry
/// without touching the store.
pub fn snapshot_key(query: &ResolvedQuery, schema_version: u32) -> String {
    format!(
        "{}:{}:{}:v{}",
        query.investor_id, query.range, query.base_currency, schema_version
    )
}
