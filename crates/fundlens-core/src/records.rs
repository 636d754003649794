//! Flat records delivered by the upstream accounting system.
//!
//! Every field except identifiers and dates is optional. Records may be
//! duplicated or fall outside the requested range; consumers filter them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, FundId};
use crate::metrics::MetricsBag;

/// One transaction as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCashflow {
    /// Fund the transaction belongs to.
    pub fund_id: FundId,
    /// Investor account the transaction was booked against.
    pub account_id: AccountId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Amount in the transaction's native currency, signed or unsigned.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Amount converted to the base currency. Authoritative when present.
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    /// Free-text transaction type label (`"Capital Call"`, `"ROC"`, ...).
    #[serde(default)]
    pub transaction_type: Option<String>,
}

impl RawCashflow {
    /// Creates a cashflow with a native amount and type label.
    pub fn new(
        fund_id: impl Into<FundId>,
        account_id: impl Into<AccountId>,
        date: NaiveDate,
        amount: Decimal,
        transaction_type: impl Into<String>,
    ) -> Self {
        Self {
            fund_id: fund_id.into(),
            account_id: account_id.into(),
            date,
            amount: Some(amount),
            base_amount: None,
            transaction_type: Some(transaction_type.into()),
        }
    }

    /// Sets the base-currency amount.
    #[must_use]
    pub fn with_base_amount(mut self, base_amount: Decimal) -> Self {
        self.base_amount = Some(base_amount);
        self
    }

    /// The authoritative amount: base currency when present, else native, else zero.
    pub fn effective_amount(&self) -> Decimal {
        self.base_amount.or(self.amount).unwrap_or(Decimal::ZERO)
    }
}

/// A contact (investor) in the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact id; investors are identified by it.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Links a ledger account to a contact and, optionally, to a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountContact {
    /// Ledger account.
    pub account_id: AccountId,
    /// Owning contact.
    pub contact_id: u64,
    /// Fund the account invests in, when the mapping table records it.
    #[serde(default)]
    pub fund_id: Option<FundId>,
}

/// An investor account's commitment to a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    /// Committing account.
    pub account_id: AccountId,
    /// Fund committed to.
    pub fund_id: FundId,
    /// Committed capital.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Current value of the account's position, if the ledger tracks it.
    #[serde(default)]
    pub market_value: Option<Decimal>,
}

/// Fund master record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    /// Fund id.
    pub id: FundId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Fund-level sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Fund-level region.
    #[serde(default)]
    pub region: Option<String>,
    /// Investment strategy, used as a last-resort sector label.
    #[serde(default)]
    pub strategy: Option<String>,
}

impl Fund {
    /// Creates a fund with only an id and name.
    pub fn new(id: impl Into<FundId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            sector: None,
            region: None,
            strategy: None,
        }
    }
}

/// A physical asset held by a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Asset id.
    pub id: String,
    /// Owning fund.
    pub fund_id: FundId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Asset sector (e.g. "Industrial", "Multifamily").
    #[serde(default)]
    pub sector: Option<String>,
    /// Country of the asset.
    #[serde(default)]
    pub country: Option<String>,
    /// Region of the asset.
    #[serde(default)]
    pub region: Option<String>,
}

/// A fund's point-in-time reported financials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    /// Reporting fund.
    pub fund_id: FundId,
    /// Report date.
    pub report_date: NaiveDate,
    /// Open metric bag (NAV, NOI actual/budget under varying keys).
    #[serde(default)]
    pub financial_metrics: MetricsBag,
}

impl FinancialStatement {
    /// Creates a statement.
    pub fn new(fund_id: impl Into<FundId>, report_date: NaiveDate, metrics: MetricsBag) -> Self {
        Self {
            fund_id: fund_id.into(),
            report_date,
            financial_metrics: metrics,
        }
    }
}
