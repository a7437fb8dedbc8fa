//! Pulls marketing email stats from the HubSpot API and flattens them into
//! report rows, one per distribution list per email.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod report;

pub use api::MarketingApi;
pub use api::client::HubspotClient;
pub use domain::row::{OutputRow, SsoStatus};
pub use error::{MalformedRecordError, ReportError, TransportError};
pub use report::{ReportSettings, RunReport, run_report};
