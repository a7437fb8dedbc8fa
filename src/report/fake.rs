//! In-memory `MarketingApi` for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{MarketingApi, decode_payload};
use crate::domain::email::{EmailDetail, EmailPage, ListLookup};
use crate::error::{ReportError, Result, TransportError};

/// Page `n` is served for cursor `"p{n}"`; page 0 for no cursor.
#[derive(Default)]
pub struct FakeApi {
    pub pages: Vec<Value>,
    pub details: HashMap<String, Value>,
    pub lists: HashMap<String, Value>,
    pub page_calls: RefCell<Vec<Option<String>>>,
    pub detail_calls: RefCell<Vec<String>>,
    pub list_calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_list(mut self, id: &str, name: &str) -> Self {
        self.lists
            .insert(id.to_string(), serde_json::json!({"list": {"name": name}}));
        self
    }

    pub fn with_detail(mut self, id: &str, detail: Value) -> Self {
        self.details.insert(id.to_string(), detail);
        self
    }

    pub fn list_calls_for(&self, id: &str) -> usize {
        self.list_calls.borrow().iter().filter(|c| *c == id).count()
    }
}

fn not_found(url: String) -> ReportError {
    TransportError::Status { url, status: 404 }.into()
}

fn decode<T: DeserializeOwned>(value: &Value, record: &str) -> Result<T> {
    decode_payload(value.clone(), record)
}

impl MarketingApi for FakeApi {
    fn list_emails_page(&self, _created_after_ms: i64, after: Option<&str>) -> Result<EmailPage> {
        self.page_calls.borrow_mut().push(after.map(str::to_owned));
        let index = match after {
            None => 0,
            Some(cursor) => cursor
                .strip_prefix('p')
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| not_found(format!("emails?after={cursor}")))?,
        };
        let page = self
            .pages
            .get(index)
            .ok_or_else(|| not_found(format!("emails page {index}")))?;
        decode(page, "email listing")
    }

    fn get_email_detail(&self, id: &str) -> Result<EmailDetail> {
        self.detail_calls.borrow_mut().push(id.to_string());
        let detail = self
            .details
            .get(id)
            .ok_or_else(|| not_found(format!("emails/{id}")))?;
        decode(detail, id)
    }

    fn get_list(&self, list_id: &str) -> Result<ListLookup> {
        self.list_calls.borrow_mut().push(list_id.to_string());
        let list = self
            .lists
            .get(list_id)
            .ok_or_else(|| not_found(format!("lists/{list_id}")))?;
        decode(list, list_id)
    }
}
