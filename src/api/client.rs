use anyhow::anyhow;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{MarketingApi, decode_payload};
use crate::domain::email::{EmailDetail, EmailPage, ListLookup};
use crate::error::{Result, TransportError};

pub const DEFAULT_API_BASE: &str = "https://api.hubapi.com";

const EMAILS_PATH: [&str; 3] = ["marketing", "v3", "emails"];
const LISTS_PATH: [&str; 3] = ["crm", "v3", "lists"];

/// Blocking client for the marketing REST API.
///
/// The bearer token goes into the default headers once, at construction, and
/// is never touched again.
pub struct HubspotClient {
    http: Client,
    base: Url,
}

impl HubspotClient {
    pub fn new(base: &str, token: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base).map_err(|e| anyhow!("Invalid api_base '{base}': {e}"))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("api_base must be an http(s) URL: {base}"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| anyhow!("API token contains characters not allowed in a header"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, prefix: &[&str], tail: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(prefix);
            if let Some(t) = tail {
                segments.push(t);
            }
        }
        url
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, record: &str) -> Result<T> {
        let shown = url.to_string();
        debug!("GET {shown}");

        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|source| TransportError::Request {
                url: shown.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: shown,
                status: status.as_u16(),
            }
            .into());
        }

        let body = resp.text().map_err(|source| TransportError::Request {
            url: shown.clone(),
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|source| TransportError::Decode {
                url: shown.clone(),
                source,
            })?;

        decode_payload(value, record)
    }
}

impl MarketingApi for HubspotClient {
    fn list_emails_page(&self, created_after_ms: i64, after: Option<&str>) -> Result<EmailPage> {
        let mut url = self.endpoint(&EMAILS_PATH, None);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("createdAfter", &created_after_ms.to_string());
            if let Some(cursor) = after {
                query.append_pair("after", cursor);
            }
        }
        self.get_json(url, "email listing")
    }

    fn get_email_detail(&self, id: &str) -> Result<EmailDetail> {
        let mut url = self.endpoint(&EMAILS_PATH, Some(id));
        url.query_pairs_mut().append_pair("includeStats", "true");
        self.get_json(url, id)
    }

    fn get_list(&self, list_id: &str) -> Result<ListLookup> {
        let url = self.endpoint(&LISTS_PATH, Some(list_id));
        self.get_json(url, list_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_joined_under_base() {
        let client = HubspotClient::new("https://api.example.test", "tok").unwrap();
        assert_eq!(
            client.endpoint(&EMAILS_PATH, Some("77")).as_str(),
            "https://api.example.test/marketing/v3/emails/77"
        );

        let nested = HubspotClient::new("http://127.0.0.1:9/proxy/", "tok").unwrap();
        assert_eq!(
            nested.endpoint(&LISTS_PATH, Some("6922")).as_str(),
            "http://127.0.0.1:9/proxy/crm/v3/lists/6922"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(HubspotClient::new("not a url", "tok").is_err());
        assert!(HubspotClient::new("mailto:someone@example.com", "tok").is_err());
    }
}
