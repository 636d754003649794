//! Snapshot service tests over an in-memory data source and store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use fundlens_core::prelude::*;
use fundlens_engine::{
    CacheStatus, EngineConfig, EngineError, SnapshotOutcome, SnapshotQuery, SnapshotService,
};
use fundlens_storage::MemorySnapshotStore;
use fundlens_traits::{
    CachedSnapshot, ContactQuery, PortfolioDataSource, SnapshotStore, TraitError,
};
use rust_decimal_macros::dec;

// =============================================================================
// TEST DOUBLES
// =============================================================================

const INVESTOR: u64 = 42;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 6, 30)
}

/// Data source that counts cashflow reads and can be told to fail.
#[derive(Default)]
struct CountingSource {
    cashflow_reads: AtomicUsize,
    fail: bool,
}

impl CountingSource {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn reads(&self) -> usize {
        self.cashflow_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioDataSource for CountingSource {
    async fn contacts(&self, _query: &ContactQuery) -> Result<Vec<Contact>, TraitError> {
        Ok(vec![
            Contact {
                id: 7,
                name: Some("Someone Else".into()),
                email: None,
            },
            Contact {
                id: INVESTOR,
                name: Some("Ada Lovelace".into()),
                email: Some("ada@example.com".into()),
            },
        ])
    }

    async fn account_contacts(
        &self,
        _contact_id: Option<u64>,
    ) -> Result<Vec<AccountContact>, TraitError> {
        Ok(vec![AccountContact {
            account_id: AccountId::new("ACC-1"),
            contact_id: INVESTOR,
            fund_id: Some(FundId::new("FUND-A")),
        }])
    }

    async fn commitments(&self, _fund_id: Option<&FundId>) -> Result<Vec<Commitment>, TraitError> {
        Ok(vec![Commitment {
            account_id: AccountId::new("ACC-1"),
            fund_id: FundId::new("FUND-A"),
            amount: Some(dec!(150000)),
            market_value: None,
        }])
    }

    async fn cashflows(
        &self,
        _window: DateRange,
        _fund_id: Option<&FundId>,
    ) -> Result<Vec<RawCashflow>, TraitError> {
        self.cashflow_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TraitError::Upstream {
                status: 503,
                message: "ledger offline".into(),
            });
        }
        Ok(vec![
            RawCashflow::new("FUND-A", "ACC-1", date(2023, 1, 15), dec!(100000), "Capital Call"),
            RawCashflow::new("FUND-A", "ACC-1", date(2023, 6, 30), dec!(20000), "Distribution"),
            RawCashflow::new("FUND-A", "ACC-1", date(2023, 9, 1), dec!(500), "Equalisation"),
        ])
    }

    async fn financial_statements(
        &self,
        _window: DateRange,
        _fund_id: Option<&FundId>,
    ) -> Result<Vec<FinancialStatement>, TraitError> {
        Ok(vec![FinancialStatement::new(
            "FUND-A",
            date(2023, 12, 31),
            MetricsBag::new().with("nav", dec!(95000)),
        )])
    }

    async fn funds(&self) -> Result<Vec<Fund>, TraitError> {
        Ok(vec![Fund::new("FUND-A", "Alpha Real Estate")])
    }

    async fn assets(&self) -> Result<Vec<Asset>, TraitError> {
        Ok(Vec::new())
    }

    fn source_name(&self) -> &'static str {
        "counting"
    }
}

/// Store whose every operation fails.
struct BrokenStore;

#[async_trait]
impl SnapshotStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<CachedSnapshot>, TraitError> {
        Err(TraitError::CacheError("down".into()))
    }

    async fn set(
        &self,
        _key: &str,
        _snapshot: &CachedSnapshot,
        _ttl_seconds: u64,
    ) -> Result<(), TraitError> {
        Err(TraitError::CacheError("down".into()))
    }

    async fn del(&self, _key: &str) -> Result<(), TraitError> {
        Err(TraitError::CacheError("down".into()))
    }

    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

fn service_with(source: Arc<CountingSource>, config: EngineConfig) -> SnapshotService {
    SnapshotService::new(source, Arc::new(MemorySnapshotStore::new()), config)
}

fn query_2023() -> SnapshotQuery {
    SnapshotQuery::for_investor(INVESTOR).with_range("2023-01-01", "2023-12-31")
}

fn expect_fresh(outcome: SnapshotOutcome) -> (serde_json::Value, String, CacheStatus) {
    match outcome {
        SnapshotOutcome::Fresh { value, etag, cache } => (value, etag, cache),
        other => panic!("expected fresh snapshot, got {other:?}"),
    }
}

// =============================================================================
// CACHE-ASIDE
// =============================================================================

#[tokio::test]
async fn test_cache_hit_suppresses_recomputation() {
    let source = Arc::new(CountingSource::default());
    let service = service_with(source.clone(), EngineConfig::default());

    let (first, etag1, status1) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());
    let (second, etag2, status2) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());

    assert_eq!(source.reads(), 1);
    assert_eq!(status1, CacheStatus::Miss);
    assert_eq!(status2, CacheStatus::Hit);
    assert_eq!(first, second);
    assert_eq!(etag1, etag2);
}

#[tokio::test]
async fn test_if_none_match_on_hit_is_not_modified() {
    let source = Arc::new(CountingSource::default());
    let service = service_with(source.clone(), EngineConfig::default());

    let (_, etag, _) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());
    let outcome = service
        .snapshot_on(&query_2023(), Some(&format!("W/{etag}")), today())
        .await
        .unwrap();

    assert_eq!(outcome, SnapshotOutcome::NotModified { etag });
    assert_eq!(source.reads(), 1);
}

#[tokio::test]
async fn test_stale_if_none_match_gets_payload() {
    let service = service_with(Arc::new(CountingSource::default()), EngineConfig::default());

    let outcome = service
        .snapshot_on(&query_2023(), Some("\"not-the-etag\""), today())
        .await
        .unwrap();
    assert!(matches!(outcome, SnapshotOutcome::Fresh { .. }));
}

#[tokio::test]
async fn test_zero_ttl_always_recomputes() {
    let source = Arc::new(CountingSource::default());
    let service = service_with(source.clone(), EngineConfig::default().with_ttl_seconds(0));

    let (_, etag1, _) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());
    let (_, etag2, status) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());

    assert_eq!(source.reads(), 2);
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(etag1, etag2);
}

#[tokio::test]
async fn test_invalidate_forces_miss() {
    let source = Arc::new(CountingSource::default());
    let service = service_with(source.clone(), EngineConfig::default());

    service.snapshot_on(&query_2023(), None, today()).await.unwrap();
    service.invalidate(&query_2023(), today()).await.unwrap();
    let (_, _, status) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());

    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(source.reads(), 2);
}

#[tokio::test]
async fn test_schema_version_partitions_cache() {
    let source = Arc::new(CountingSource::default());
    let store = Arc::new(MemorySnapshotStore::new());
    let v1 = SnapshotService::new(source.clone(), store.clone(), EngineConfig::default());
    let v2 = SnapshotService::new(
        source.clone(),
        store.clone(),
        EngineConfig::default().with_schema_version(2),
    );

    v1.snapshot_on(&query_2023(), None, today()).await.unwrap();
    let (_, _, status) = expect_fresh(v2.snapshot_on(&query_2023(), None, today()).await.unwrap());

    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_broken_store_still_serves() {
    let source = Arc::new(CountingSource::default());
    let service =
        SnapshotService::new(source.clone(), Arc::new(BrokenStore), EngineConfig::default());

    let (value, _, status) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(value["investmentsCount"], 1);

    assert!(matches!(
        service.invalidate(&query_2023(), today()).await,
        Err(EngineError::Cache(_))
    ));
}

// =============================================================================
// ERRORS
// =============================================================================

#[tokio::test]
async fn test_source_failure_propagates() {
    let service = service_with(Arc::new(CountingSource::failing()), EngineConfig::default());

    let err = service
        .snapshot_on(&query_2023(), None, today())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Source(TraitError::Upstream { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_invalid_query_skips_source() {
    let source = Arc::new(CountingSource::default());
    let service = service_with(source.clone(), EngineConfig::default());

    let err = service
        .snapshot_on(&SnapshotQuery::for_investor(0), None, today())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuery(_)));
    assert_eq!(source.reads(), 0);
}

// =============================================================================
// PAYLOAD
// =============================================================================

#[tokio::test]
async fn test_payload_contents() {
    let service = service_with(Arc::new(CountingSource::default()), EngineConfig::default());

    let (value, etag, _) =
        expect_fresh(service.snapshot_on(&query_2023(), None, today()).await.unwrap());

    assert!(etag.starts_with('"'));
    assert_eq!(value["investor"]["id"], INVESTOR);
    assert_eq!(value["investor"]["name"], "Ada Lovelace");
    assert_eq!(value["baseCurrency"], "USD");
    assert_eq!(value["range"]["from"], "2023-01-01");
    assert_eq!(value["kpis"]["contributions"].as_f64(), Some(100000.0));
    assert_eq!(value["kpis"]["distributions"].as_f64(), Some(20000.0));
    assert_eq!(value["kpis"]["nav"].as_f64(), Some(95000.0));
    assert_eq!(value["funds"][0]["name"], "Alpha Real Estate");
    assert_eq!(value["funds"][0]["unfunded"].as_f64(), Some(50000.0));
    assert_eq!(value["warnings"]["unmappedTypes"][0], "equalisation");
}

#[tokio::test]
async fn test_unknown_investor_gets_empty_snapshot() {
    let service = service_with(Arc::new(CountingSource::default()), EngineConfig::default());

    let query = SnapshotQuery::for_investor(999).with_range("2023-01-01", "2023-12-31");
    let (value, _, _) = expect_fresh(service.snapshot_on(&query, None, today()).await.unwrap());

    assert_eq!(value["investmentsCount"], 0);
    assert!(value["investor"]["name"].is_null());
    assert!(value["funds"].as_array().unwrap().is_empty());
}
