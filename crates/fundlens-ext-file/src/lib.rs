//! # FundLens Ext File
//!
//! Fixture-backed implementation of
//! [`PortfolioDataSource`](fundlens_traits::PortfolioDataSource).
//!
//! A fixture is one JSON document holding every upstream record list:
//!
//! ```json
//! {
//!   "contacts": [{"id": 42, "name": "Ada Lovelace"}],
//!   "accountContacts": [{"accountId": "ACC-1", "contactId": 42, "fundId": "FUND-A"}],
//!   "commitments": [],
//!   "cashflows": [],
//!   "financialStatements": [],
//!   "funds": [],
//!   "assets": []
//! }
//! ```
//!
//! Used for local development, demos and tests. For the accounting system's
//! live API use `fundlens-ext-http`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod fixture;

pub use fixture::*;
