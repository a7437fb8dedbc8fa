//! The report pipeline: list emails, fetch details, build rows.

#[cfg(test)]
pub(crate) mod fake;
pub mod lister;
pub mod lookup;
pub mod pipeline;
pub mod rows;
pub mod sso;

use chrono::{DateTime, TimeZone, Utc};

pub use lister::{Paginator, list_emails};
pub use lookup::{ListNameResolver, get_detail, resolve_list_name};
pub use pipeline::{Failure, RunReport, run_report};
pub use rows::{BuiltRows, build_rows, split_publish_date};
pub use sso::{NO_SSO_LIST_ID, SSO_LIST_ID, SsoPolicy, SsoRules, sso_status};

/// November 1, 2024, 00:00 UTC.
pub fn default_cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Knobs for one run. Built once from the config and never changed.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub created_after: DateTime<Utc>,
    pub sso: SsoRules,
    pub cache_list_names: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            created_after: default_cutoff(),
            sso: SsoRules::default(),
            cache_list_names: false,
        }
    }
}
