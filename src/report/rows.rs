use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};

use crate::domain::email::{EmailDetail, ListId, NO_SUBJECT};
use crate::domain::row::OutputRow;
use crate::error::{ReportError, Result};
use crate::report::lookup::ListNameResolver;
use crate::report::sso::{SsoRules, sso_status};

/// Lists with this exact name never get a row.
pub const STAFF_LIST: &str = "Staff";
/// Only lists whose name contains this produce rows.
pub const DISTRO_MARKER: &str = "Distro List";

/// Rows for one email plus the lists that had to be skipped on the way.
#[derive(Debug, Default)]
pub struct BuiltRows {
    pub rows: Vec<OutputRow>,
    pub skipped_lists: Vec<(ListId, ReportError)>,
}

/// Split a UTC publish timestamp into ISO date and time strings.
///
/// `2024-11-15T14:30:00Z` is the documented shape; other RFC 3339 forms are
/// accepted and any fractional seconds are dropped.
pub fn split_publish_date(raw: &str) -> Option<(String, String)> {
    let ts = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).naive_utc())
        })?;

    Some((
        ts.date().format("%Y-%m-%d").to_string(),
        ts.time().format("%H:%M:%S").to_string(),
    ))
}

/// Turn one email's detail into report rows.
///
/// Unpublished emails give no rows. Any missing field the row needs makes the
/// whole email fail before a single list is resolved. A list that cannot be
/// resolved is skipped and reported in [`BuiltRows::skipped_lists`].
pub fn build_rows(
    detail: &EmailDetail,
    resolver: &mut ListNameResolver<'_>,
    sso: &SsoRules,
) -> Result<BuiltRows> {
    let email_id = detail.id.clone().unwrap_or_default();
    let malformed = |field: &str| ReportError::malformed(email_id.as_str(), field);

    match detail.is_published {
        Some(true) => {}
        Some(false) => {
            debug!("Email {email_id} is not published; no rows");
            return Ok(BuiltRows::default());
        }
        None => return Err(malformed("isPublished")),
    }

    let (date, time) = detail
        .publish_date
        .as_deref()
        .and_then(split_publish_date)
        .ok_or_else(|| malformed("publishDate"))?;

    let subject = detail
        .subject
        .clone()
        .unwrap_or_else(|| NO_SUBJECT.to_string());

    let counters = detail
        .stats
        .as_ref()
        .and_then(|s| s.counters.as_ref())
        .ok_or_else(|| malformed("stats.counters"))?;
    let delivered = counters
        .delivered
        .as_ref()
        .ok_or_else(|| malformed("stats.counters.delivered"))?
        .to_string();
    let opens = counters
        .open
        .as_ref()
        .ok_or_else(|| malformed("stats.counters.open"))?
        .to_string();

    let lists = detail
        .to
        .as_ref()
        .and_then(|t| t.contact_ils_lists.as_ref())
        .ok_or_else(|| malformed("to.contactIlsLists"))?;
    let include = lists
        .include
        .as_ref()
        .ok_or_else(|| malformed("to.contactIlsLists.include"))?;
    let exclude = lists
        .exclude
        .as_ref()
        .ok_or_else(|| malformed("to.contactIlsLists.exclude"))?;
    let status = sso_status(exclude, sso);

    let mut built = BuiltRows::default();
    for list_id in include {
        let name = match resolver.resolve(list_id) {
            Ok(n) => n,
            Err(e) => {
                warn!("Email {email_id}: skipping list {list_id}: {e}");
                built.skipped_lists.push((list_id.clone(), e));
                continue;
            }
        };

        if name == STAFF_LIST {
            debug!("Email {email_id}: skipping staff list {list_id}");
            continue;
        }
        if !name.contains(DISTRO_MARKER) {
            debug!("Email {email_id}: list {list_id} ({name}) is not a distro list");
            continue;
        }

        built.rows.push(OutputRow {
            email_id: email_id.clone(),
            subject: subject.clone(),
            date: date.clone(),
            time: time.clone(),
            reserved1: String::new(),
            reserved2: String::new(),
            total_delivers: delivered.clone(),
            total_opens: opens.clone(),
            list_name: name,
            sso_status: status,
        });
    }

    Ok(built)
}
