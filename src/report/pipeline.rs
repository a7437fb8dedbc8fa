use std::fmt;

use log::{info, warn};

use crate::api::MarketingApi;
use crate::domain::email::{EmailId, ListId};
use crate::domain::row::OutputRow;
use crate::error::ReportError;
use crate::report::ReportSettings;
use crate::report::lister::Paginator;
use crate::report::lookup::{ListNameResolver, get_detail};
use crate::report::rows::build_rows;

/// Something that went wrong for one email or one list. The run carries on.
#[derive(Debug)]
pub struct Failure {
    /// `None` when the listing itself failed.
    pub email_id: Option<EmailId>,
    pub list_id: Option<ListId>,
    pub error: ReportError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.email_id, &self.list_id) {
            (Some(e), Some(l)) => write!(f, "email {e}, list {l}: {}", self.error),
            (Some(e), None) => write!(f, "email {e}: {}", self.error),
            _ => write!(f, "listing: {}", self.error),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    /// Grouped by email, emails in listing order.
    pub rows: Vec<OutputRow>,
    pub failures: Vec<Failure>,
    pub emails_seen: usize,
}

impl RunReport {
    /// The listing failed and nothing was built, so the rows say nothing
    /// about the period. Writing them out would look like an empty report.
    pub fn is_unusable(&self) -> bool {
        self.rows.is_empty() && self.failures.iter().any(|f| f.email_id.is_none())
    }

    fn fail(&mut self, email_id: Option<&str>, list_id: Option<&str>, error: ReportError) {
        let failure = Failure {
            email_id: email_id.map(str::to_owned),
            list_id: list_id.map(str::to_owned),
            error,
        };
        warn!("{failure}");
        self.failures.push(failure);
    }
}

/// List every email since the cutoff, fetch each one's detail, build rows.
///
/// Strictly sequential. Nothing here aborts the run: a failed email, list or
/// listing page is recorded in [`RunReport::failures`] and skipped.
pub fn run_report(api: &dyn MarketingApi, settings: &ReportSettings) -> RunReport {
    let mut report = RunReport::default();
    let mut resolver = ListNameResolver::new(api, settings.cache_list_names);

    info!("Listing emails created after {}", settings.created_after);
    let mut emails = Vec::new();
    for page in Paginator::new(api, settings.created_after) {
        match page {
            Ok(mut items) => emails.append(&mut items),
            Err(e) => report.fail(None, None, e),
        }
    }

    for email in &emails {
        report.emails_seen += 1;

        let detail = match get_detail(api, &email.id) {
            Ok(d) => d,
            Err(e) => {
                report.fail(Some(email.id.as_str()), None, e);
                continue;
            }
        };

        match build_rows(&detail, &mut resolver, &settings.sso) {
            Ok(built) => {
                for (list_id, e) in built.skipped_lists {
                    report.fail(Some(email.id.as_str()), Some(list_id.as_str()), e);
                }
                report.rows.extend(built.rows);
            }
            Err(e) => report.fail(Some(email.id.as_str()), None, e),
        }
    }

    info!(
        "Report done: {} emails, {} rows, {} failures",
        report.emails_seen,
        report.rows.len(),
        report.failures.len()
    );
    report
}
