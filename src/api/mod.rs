pub mod client;

use serde::de::DeserializeOwned;

use crate::domain::email::{EmailDetail, EmailPage, ListLookup};
use crate::error::{MalformedRecordError, ReportError, Result};

/// Map a JSON body onto a payload type. A type mismatch is reported against
/// the dotted path of the offending field.
pub fn decode_payload<T: DeserializeOwned>(value: serde_json::Value, record: &str) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let field = if path == "." { "payload".to_string() } else { path };
        ReportError::from(
            MalformedRecordError::new(record, field).with_detail(e.into_inner().to_string()),
        )
    })
}

/// The three read endpoints the report needs.
pub trait MarketingApi {
    /// One page of emails created after `created_after_ms` (epoch millis).
    /// `after` is the cursor from the previous page, `None` for the first.
    fn list_emails_page(&self, created_after_ms: i64, after: Option<&str>) -> Result<EmailPage>;

    /// Full detail for one email, including engagement stats.
    fn get_email_detail(&self, id: &str) -> Result<EmailDetail>;

    /// CRM list lookup by id.
    fn get_list(&self, list_id: &str) -> Result<ListLookup>;
}
