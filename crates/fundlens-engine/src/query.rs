//! Inbound snapshot queries.

use chrono::NaiveDate;
use fundlens_core::{DateRange, InvestorId};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Base currency used when the query names none.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// A snapshot request as received, before validation.
///
/// Dates are ISO `YYYY-MM-DD` strings; missing dates default to the start of
/// the reporting history and today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotQuery {
    /// Investor (contact) id. Must be positive.
    pub investor_id: u64,
    /// Range start.
    #[serde(default)]
    pub from: Option<String>,
    /// Range end.
    #[serde(default)]
    pub to: Option<String>,
    /// Three-letter currency code.
    #[serde(default)]
    pub base_currency: Option<String>,
}

/// A validated query with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Investor id.
    pub investor_id: InvestorId,
    /// Inclusive range, swap-normalized.
    pub range: DateRange,
    /// Upper-cased currency code.
    pub base_currency: String,
}

impl SnapshotQuery {
    /// Query for `investor_id` with every other field defaulted.
    pub fn for_investor(investor_id: u64) -> Self {
        Self {
            investor_id,
            ..Self::default()
        }
    }

    /// Sets the range bounds.
    #[must_use]
    pub fn with_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self.to = Some(to.into());
        self
    }

    /// Sets the base currency.
    #[must_use]
    pub fn with_base_currency(mut self, code: impl Into<String>) -> Self {
        self.base_currency = Some(code.into());
        self
    }

    /// Validates the query against `today`.
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<ResolvedQuery> {
        if self.investor_id == 0 {
            return Err(EngineError::invalid_query("investorId must be positive"));
        }

        let from = parse_date("from", self.from.as_deref())?;
        let to = parse_date("to", self.to.as_deref())?;

        Ok(ResolvedQuery {
            investor_id: InvestorId::new(self.investor_id),
            range: DateRange::resolve(from, to, today),
            base_currency: normalize_currency(self.base_currency.as_deref())?,
        })
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> EngineResult<Option<NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| EngineError::invalid_query(format!("{field} is not an ISO date: {s}"))),
    }
}

fn normalize_currency(raw: Option<&str>) -> EngineResult<String> {
    let code = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => return Ok(DEFAULT_BASE_CURRENCY.to_string()),
        Some(code) => code,
    };
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EngineError::invalid_query(format!(
            "baseCurrency must be a 3-letter code: {code}"
        )));
    }
    Ok(code.to_ascii_uppercase())
}
