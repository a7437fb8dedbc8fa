use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::api::MarketingApi;
use crate::domain::email::EmailSummary;
use crate::error::Result;

/// Walks the email listing one page at a time.
///
/// Each `next()` is one request. After an error the iterator is exhausted, so
/// callers that want partial results just keep what they collected so far.
pub struct Paginator<'a> {
    api: &'a dyn MarketingApi,
    created_after_ms: i64,
    cursor: Option<String>,
    pages: usize,
    done: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(api: &'a dyn MarketingApi, cutoff: DateTime<Utc>) -> Self {
        Self {
            api,
            created_after_ms: cutoff.timestamp_millis(),
            cursor: None,
            pages: 0,
            done: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages
    }
}

impl Iterator for Paginator<'_> {
    type Item = Result<Vec<EmailSummary>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let page = match self
            .api
            .list_emails_page(self.created_after_ms, self.cursor.as_deref())
        {
            Ok(p) => p,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        self.pages += 1;

        let next = page
            .next_after()
            .filter(|c| !c.is_empty())
            .map(str::to_owned);
        match next {
            Some(ref c) if self.cursor.as_ref() == Some(c) => {
                warn!("Listing returned cursor {c} twice; stopping pagination");
                self.done = true;
            }
            Some(_) => {}
            None => self.done = true,
        }
        self.cursor = next;

        let summaries = page.into_summaries();
        debug!("Listing page {}: {} emails", self.pages, summaries.len());
        Some(Ok(summaries))
    }
}

/// All emails created after `cutoff`, in server order, pages concatenated.
pub fn list_emails(api: &dyn MarketingApi, cutoff: DateTime<Utc>) -> Result<Vec<EmailSummary>> {
    let mut pager = Paginator::new(api, cutoff);
    let mut emails = Vec::new();
    for page in pager.by_ref() {
        emails.extend(page?);
    }
    info!(
        "Listed {} emails across {} pages",
        emails.len(),
        pager.pages_fetched()
    );
    Ok(emails)
}
