//! JSON fixture data source.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fundlens_core::{
    AccountContact, Asset, Commitment, Contact, DateRange, FinancialStatement, Fund, FundId,
    RawCashflow,
};
use fundlens_traits::{ContactQuery, PortfolioDataSource, TraitError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Every upstream record list, as stored in a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixture {
    /// Contacts.
    pub contacts: Vec<Contact>,
    /// Account-contact mappings.
    pub account_contacts: Vec<AccountContact>,
    /// Commitments.
    pub commitments: Vec<Commitment>,
    /// Ledger cashflows.
    pub cashflows: Vec<RawCashflow>,
    /// Financial statements.
    pub financial_statements: Vec<FinancialStatement>,
    /// Fund master records.
    pub funds: Vec<Fund>,
    /// Asset records.
    pub assets: Vec<Asset>,
}

/// Data source serving records from a [`Fixture`].
pub struct FixtureDataSource {
    file_path: Option<PathBuf>,
    data: RwLock<Arc<Fixture>>,
}

impl FixtureDataSource {
    /// Loads a fixture file. A missing file yields an empty source.
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: Some(file_path.as_ref().to_path_buf()),
            data: RwLock::new(Arc::new(Fixture::default())),
        };
        source.reload()?;
        Ok(source)
    }

    /// Serves an in-memory fixture.
    pub fn from_fixture(fixture: Fixture) -> Self {
        Self {
            file_path: None,
            data: RwLock::new(Arc::new(fixture)),
        }
    }

    /// Re-reads the fixture file. A source built from memory is left untouched.
    pub fn reload(&self) -> Result<(), TraitError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };

        if !path.exists() {
            warn!(path = %path.display(), "fixture file not found; serving no records");
            return Ok(()); // Empty source
        }

        let content = std::fs::read_to_string(path)?;
        let fixture: Fixture =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        info!(
            path = %path.display(),
            cashflows = fixture.cashflows.len(),
            funds = fixture.funds.len(),
            "loaded fixture"
        );

        *self.data.write() = Arc::new(fixture);
        Ok(())
    }

    fn current(&self) -> Arc<Fixture> {
        Arc::clone(&self.data.read())
    }
}

fn fund_matches(filter: Option<&FundId>, fund_id: &FundId) -> bool {
    filter.map_or(true, |f| f == fund_id)
}

#[async_trait]
impl PortfolioDataSource for FixtureDataSource {
    async fn contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>, TraitError> {
        Ok(self
            .current()
            .contacts
            .iter()
            .filter(|c| query.matches(c))
            .cloned()
            .collect())
    }

    async fn account_contacts(
        &self,
        contact_id: Option<u64>,
    ) -> Result<Vec<AccountContact>, TraitError> {
        Ok(self
            .current()
            .account_contacts
            .iter()
            .filter(|m| contact_id.map_or(true, |id| m.contact_id == id))
            .cloned()
            .collect())
    }

    async fn commitments(&self, fund_id: Option<&FundId>) -> Result<Vec<Commitment>, TraitError> {
        Ok(self
            .current()
            .commitments
            .iter()
            .filter(|c| fund_matches(fund_id, &c.fund_id))
            .cloned()
            .collect())
    }

    async fn cashflows(
        &self,
        window: DateRange,
        fund_id: Option<&FundId>,
    ) -> Result<Vec<RawCashflow>, TraitError> {
        Ok(self
            .current()
            .cashflows
            .iter()
            .filter(|c| window.contains(c.date) && fund_matches(fund_id, &c.fund_id))
            .cloned()
            .collect())
    }

    async fn financial_statements(
        &self,
        window: DateRange,
        fund_id: Option<&FundId>,
    ) -> Result<Vec<FinancialStatement>, TraitError> {
        Ok(self
            .current()
            .financial_statements
            .iter()
            .filter(|s| window.contains(s.report_date) && fund_matches(fund_id, &s.fund_id))
            .cloned()
            .collect())
    }

    async fn funds(&self) -> Result<Vec<Fund>, TraitError> {
        Ok(self.current().funds.clone())
    }

    async fn assets(&self) -> Result<Vec<Asset>, TraitError> {
        Ok(self.current().assets.clone())
    }

    fn source_name(&self) -> &'static str {
        "fixture"
    }
}
