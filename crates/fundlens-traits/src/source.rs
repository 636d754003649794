//! Upstream data source traits.
//!
//! [`PortfolioDataSource`] is the read side of the accounting system. It
//! returns flat record lists; callers filter, deduplicate and join them.
//! Implementations are EXTENSIONS (fixture files, paged HTTP APIs).

use async_trait::async_trait;
use fundlens_core::{
    AccountContact, Asset, Commitment, Contact, DateRange, FinancialStatement, Fund, FundId,
    RawCashflow,
};
use serde::{Deserialize, Serialize};

use crate::error::TraitError;

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Contact lookup criteria. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    /// Exact contact id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Case-insensitive email match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Case-insensitive substring of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ContactQuery {
    /// Query for a single contact id.
    pub fn by_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Query by email.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Returns true if `contact` satisfies every set criterion.
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(id) = self.id {
            if contact.id != id {
                return false;
            }
        }
        if let Some(email) = &self.email {
            let matched = contact
                .email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(email));
            if !matched {
                return false;
            }
        }
        if let Some(name) = &self.name {
            let needle = name.to_lowercase();
            let matched = contact
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !matched {
                return false;
            }
        }
        true
    }
}

/// One page of a paginated upstream listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this page
    pub items: Vec<T>,
    /// Total number of items across all pages, when the upstream reports it
    #[serde(default)]
    pub total: Option<u64>,
    /// Offset of the first item, as echoed by the upstream (often omitted)
    #[serde(default)]
    pub offset: usize,
}

impl<T> Page<T> {
    /// Check if there are more pages after this one, given the offset that
    /// was requested for it.
    ///
    /// The echoed `offset` is ignored. Without a reported total, a short
    /// page marks the end.
    pub fn has_more(&self, requested_offset: usize, limit: usize) -> bool {
        match self.total {
            Some(total) => ((requested_offset + self.items.len()) as u64) < total,
            None => self.items.len() >= limit && limit > 0,
        }
    }
}

// =============================================================================
// DATA SOURCE TRAIT
// =============================================================================

/// Read access to the accounting system.
///
/// Every method may return records outside the requested filter; callers
/// must tolerate duplicates and out-of-range rows.
#[async_trait]
pub trait PortfolioDataSource: Send + Sync {
    /// Contacts matching `query`.
    async fn contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>, TraitError>;

    /// Account-contact mappings, optionally for one contact.
    async fn account_contacts(
        &self,
        contact_id: Option<u64>,
    ) -> Result<Vec<AccountContact>, TraitError>;

    /// Commitments, optionally for one fund.
    async fn commitments(&self, fund_id: Option<&FundId>) -> Result<Vec<Commitment>, TraitError>;

    /// Cashflows dated within `window`, optionally for one fund.
    async fn cashflows(
        &self,
        window: DateRange,
        fund_id: Option<&FundId>,
    ) -> Result<Vec<RawCashflow>, TraitError>;

    /// Financial statements reported within `window`, optionally for one fund.
    async fn financial_statements(
        &self,
        window: DateRange,
        fund_id: Option<&FundId>,
    ) -> Result<Vec<FinancialStatement>, TraitError>;

    /// All fund master records.
    async fn funds(&self) -> Result<Vec<Fund>, TraitError>;

    /// All asset records.
    async fn assets(&self) -> Result<Vec<Asset>, TraitError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
