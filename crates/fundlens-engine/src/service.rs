//! Cache-aside snapshot service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fundlens_core::dates::default_range_start;
use fundlens_core::{Contact, DateRange};
use fundlens_portfolio::aggregate::{aggregate_portfolio, PortfolioInputs};
use fundlens_traits::{CachedSnapshot, ContactQuery, PortfolioDataSource, SnapshotStore};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::etag::{compute_etag, etag_matches};
use crate::key::snapshot_key;
use crate::payload::{InvestorIdentity, SnapshotPayload};
use crate::query::{ResolvedQuery, SnapshotQuery};

/// Whether a fresh response came from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the snapshot store.
    Hit,
    /// Computed on this request.
    Miss,
}

impl CacheStatus {
    /// Header-friendly label.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Result of a snapshot request.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotOutcome {
    /// The client's `If-None-Match` matched the current ETag.
    NotModified {
        /// Current ETag.
        etag: String,
    },
    /// The payload and its ETag.
    Fresh {
        /// Serialized payload.
        value: Value,
        /// Quoted content hash of `value`.
        etag: String,
        /// Hit or miss.
        cache: CacheStatus,
    },
}

impl SnapshotOutcome {
    /// The ETag in either case.
    pub fn etag(&self) -> &str {
        match self {
            SnapshotOutcome::NotModified { etag } | SnapshotOutcome::Fresh { etag, .. } => etag,
        }
    }
}

/// Serves investor snapshots through a cache-aside store.
///
/// On a miss, reads every collaborator concurrently, aggregates, reduces the
/// summary to a [`SnapshotPayload`], hashes it and writes it back. Store
/// failures are logged and treated as a miss or a skipped write; data-source
/// failures propagate.
pub struct SnapshotService {
    source: Arc<dyn PortfolioDataSource>,
    store: Arc<dyn SnapshotStore>,
    config: EngineConfig,
}

impl SnapshotService {
    /// Creates a service over the given capabilities.
    pub fn new(
        source: Arc<dyn PortfolioDataSource>,
        store: Arc<dyn SnapshotStore>,
        config: EngineConfig,
    ) -> Self {
        info!(
            source = source.source_name(),
            store = store.backend_name(),
            ttl_seconds = config.ttl_seconds,
            schema_version = config.schema_version,
            "snapshot service configured"
        );
        Self {
            source,
            store,
            config,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the snapshot for `query`, defaulting the range end to today (UTC).
    pub async fn snapshot(
        &self,
        query: &SnapshotQuery,
        if_none_match: Option<&str>,
    ) -> EngineResult<SnapshotOutcome> {
        self.snapshot_on(query, if_none_match, Utc::now().date_naive())
            .await
    }

    /// Returns the snapshot for `query` as seen on `today`.
    pub async fn snapshot_on(
        &self,
        query: &SnapshotQuery,
        if_none_match: Option<&str>,
        today: NaiveDate,
    ) -> EngineResult<SnapshotOutcome> {
        let resolved = query.resolve(today)?;
        let key = snapshot_key(&resolved, self.config.schema_version);

        if let Some(cached) = self.lookup(&key).await {
            debug!(key = %key, "snapshot cache hit");
            return Ok(respond(cached.value, cached.etag, CacheStatus::Hit, if_none_match));
        }

        debug!(key = %key, "snapshot cache miss");
        let payload = self.compute_payload(&resolved).await?;
        let value = serde_json::to_value(&payload)?;
        let etag = compute_etag(&value)?;

        self.store_snapshot(&key, CachedSnapshot::new(value.clone(), etag.clone()))
            .await;

        Ok(respond(value, etag, CacheStatus::Miss, if_none_match))
    }

    /// Drops the cached snapshot for `query`.
    pub async fn invalidate(&self, query: &SnapshotQuery, today: NaiveDate) -> EngineResult<()> {
        let resolved = query.resolve(today)?;
        let key = snapshot_key(&resolved, self.config.schema_version);
        self.store.del(&key).await.map_err(EngineError::Cache)?;
        info!(key = %key, "snapshot invalidated");
        Ok(())
    }

    /// Computes the payload for a validated query, bypassing the store.
    pub async fn compute_payload(&self, query: &ResolvedQuery) -> EngineResult<SnapshotPayload> {
        let (contact, inputs) = self.load_inputs(query).await?;

        let summary = aggregate_portfolio(
            query.investor_id,
            query.range,
            &query.base_currency,
            &inputs,
        );
        info!(
            investor = %query.investor_id,
            range = %query.range,
            funds = summary.investments_count,
            "portfolio aggregated"
        );

        let identity = InvestorIdentity::from_contact(query.investor_id, contact.as_ref());
        Ok(SnapshotPayload::from_summary(summary, identity))
    }

    async fn load_inputs(
        &self,
        query: &ResolvedQuery,
    ) -> EngineResult<(Option<Contact>, PortfolioInputs)> {
        let investor = query.investor_id.value();
        let contact_query = ContactQuery::by_id(investor);
        // Statements before `from` can still be the latest as of `to`.
        let statement_window =
            DateRange::new(default_range_start().min(query.range.from), query.range.to);

        let (contacts, account_contacts, commitments, cashflows, statements, funds, assets) =
            tokio::try_join!(
                self.source.contacts(&contact_query),
                self.source.account_contacts(Some(investor)),
                self.source.commitments(None),
                self.source.cashflows(query.range, None),
                self.source.financial_statements(statement_window, None),
                self.source.funds(),
                self.source.assets(),
            )?;

        debug!(
            source = self.source.source_name(),
            cashflows = cashflows.len(),
            statements = statements.len(),
            "collaborator records loaded"
        );

        let contact = contacts.into_iter().find(|c| contact_query.matches(c));
        let inputs = PortfolioInputs {
            account_contacts,
            commitments,
            cashflows,
            statements,
            funds,
            assets,
        };
        Ok((contact, inputs))
    }

    async fn lookup(&self, key: &str) -> Option<CachedSnapshot> {
        match self.store.get(key).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, backend = self.store.backend_name(), error = %e, "snapshot read failed");
                None
            }
        }
    }

    async fn store_snapshot(&self, key: &str, snapshot: CachedSnapshot) {
        if let Err(e) = self
            .store
            .set(key, &snapshot, self.config.ttl_seconds)
            .await
        {
            warn!(key, backend = self.store.backend_name(), error = %e, "snapshot write failed");
        }
    }
}

fn respond(
    value: Value,
    etag: String,
    cache: CacheStatus,
    if_none_match: Option<&str>,
) -> SnapshotOutcome {
    if if_none_match.is_some_and(|header| etag_matches(header, &etag)) {
        SnapshotOutcome::NotModified { etag }
    } else {
        SnapshotOutcome::Fresh { value, etag, cache }
    }
}
