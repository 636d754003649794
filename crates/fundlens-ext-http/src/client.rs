//! Paged REST client.

use std::time::Duration;

use async_trait::async_trait;
use fundlens_core::{
    AccountContact, Asset, Commitment, Contact, DateRange, FinancialStatement, Fund, FundId,
    RawCashflow,
};
use fundlens_traits::{ContactQuery, Page, PortfolioDataSource, TraitError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Connection settings for [`HttpDataSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// API root, e.g. `https://erp.example.com/api`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_token: Option<String>,
    /// Records per page.
    pub page_size: usize,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpSourceConfig {
    /// Settings for `base_url` with default paging and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Data source reading the accounting system's REST API.
pub struct HttpDataSource {
    client: reqwest::Client,
    config: HttpSourceConfig,
}

impl HttpDataSource {
    /// Builds the HTTP client.
    pub fn new(config: HttpSourceConfig) -> Result<Self, TraitError> {
        if config.page_size == 0 {
            return Err(TraitError::InvalidInput("page_size must be positive".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TraitError::Internal(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetches every page of `path`.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, TraitError> {
        let limit = self.config.page_size;
        let mut items = Vec::new();
        let mut offset = 0usize;

        loop {
            let mut request = self
                .client
                .get(self.url(path))
                .query(params)
                .query(&[("offset", offset), ("limit", limit)]);
            if let Some(token) = &self.config.api_token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(map_reqwest_error)?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(map_status(status, message));
            }

            let page: Page<T> = response.json().await.map_err(map_reqwest_error)?;
            let received = page.items.len();
            let more = page.has_more(offset, limit);
            items.extend(page.items);

            debug!(path, offset, received, "fetched page");

            if !more || received == 0 {
                break;
            }
            offset += received;
        }

        Ok(items)
    }
}

fn window_params(window: DateRange, fund_id: Option<&FundId>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("from", window.from.to_string()),
        ("to", window.to.to_string()),
    ];
    if let Some(fund) = fund_id {
        params.push(("fundId", fund.to_string()));
    }
    params
}

fn map_reqwest_error(e: reqwest::Error) -> TraitError {
    if e.is_timeout() {
        TraitError::Timeout
    } else if e.is_connect() {
        TraitError::ConnectionFailed(e.to_string())
    } else if e.is_decode() {
        TraitError::ParseError(e.to_string())
    } else {
        TraitError::Internal(e.to_string())
    }
}

fn map_status(status: StatusCode, message: String) -> TraitError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TraitError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => TraitError::NotFound(message),
        _ => TraitError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl PortfolioDataSource for HttpDataSource {
    async fn contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>, TraitError> {
        let mut params = Vec::new();
        if let Some(id) = query.id {
            params.push(("id", id.to_string()));
        }
        if let Some(email) = &query.email {
            params.push(("email", email.clone()));
        }
        if let Some(name) = &query.name {
            params.push(("name", name.clone()));
        }
        self.fetch_all("contacts", &params).await
    }

    async fn account_contacts(
        &self,
        contact_id: Option<u64>,
    ) -> Result<Vec<AccountContact>, TraitError> {
        let params: Vec<_> = contact_id
            .map(|id| ("contactId", id.to_string()))
            .into_iter()
            .collect();
        self.fetch_all("account-contacts", &params).await
    }

    async fn commitments(&self, fund_id: Option<&FundId>) -> Result<Vec<Commitment>, TraitError> {
        let params: Vec<_> = fund_id
            .map(|f| ("fundId", f.to_string()))
            .into_iter()
            .collect();
        self.fetch_all("commitments", &params).await
    }

    async fn cashflows(
        &self,
        window: DateRange,
        fund_id: Option<&FundId>,
    ) -> Result<Vec<RawCashflow>, TraitError> {
        self.fetch_all("cashflows", &window_params(window, fund_id))
            .await
    }

    async fn financial_statements(
        &self,
        window: DateRange,
        fund_id: Option<&FundId>,
    ) -> Result<Vec<FinancialStatement>, TraitError> {
        self.fetch_all("financial-statements", &window_params(window, fund_id))
            .await
    }

    async fn funds(&self) -> Result<Vec<Fund>, TraitError> {
        self.fetch_all("funds", &[]).await
    }

    async fn assets(&self) -> Result<Vec<Asset>, TraitError> {
        self.fetch_all("assets", &[]).await
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
