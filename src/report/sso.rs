use serde::{Deserialize, Serialize};

use crate::domain::email::ListId;
use crate::domain::row::SsoStatus;

pub const SSO_LIST_ID: &str = "6922";
pub const NO_SSO_LIST_ID: &str = "6927";

/// How the excluded lists are matched against the two marker lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SsoPolicy {
    /// The exclusion set must be exactly one marker list and nothing else.
    #[default]
    Exact,
    /// A marker list anywhere in the exclusion set counts, as long as the
    /// other marker is not also present.
    Membership,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoRules {
    pub sso_list_id: ListId,
    pub no_sso_list_id: ListId,
    pub policy: SsoPolicy,
}

impl Default for SsoRules {
    fn default() -> Self {
        Self {
            sso_list_id: SSO_LIST_ID.to_string(),
            no_sso_list_id: NO_SSO_LIST_ID.to_string(),
            policy: SsoPolicy::Exact,
        }
    }
}

pub fn sso_status(excluded: &[ListId], rules: &SsoRules) -> SsoStatus {
    match rules.policy {
        SsoPolicy::Exact => match excluded {
            [only] if *only == rules.sso_list_id => SsoStatus::Sso,
            [only] if *only == rules.no_sso_list_id => SsoStatus::NoSso,
            _ => SsoStatus::Unknown,
        },
        SsoPolicy::Membership => {
            let sso = excluded.iter().any(|id| *id == rules.sso_list_id);
            let no_sso = excluded.iter().any(|id| *id == rules.no_sso_list_id);
            match (sso, no_sso) {
                (true, false) => SsoStatus::Sso,
                (false, true) => SsoStatus::NoSso,
                _ => SsoStatus::Unknown,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ListId> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_only_for_single_marker() {
        let rules = SsoRules::default();
        assert_eq!(sso_status(&ids(&["6922"]), &rules), SsoStatus::Sso);
        assert_eq!(sso_status(&ids(&["6927"]), &rules), SsoStatus::NoSso);

        for other in [
            ids(&[]),
            ids(&["6922", "6927"]),
            ids(&["6922", "9999"]),
            ids(&["9999", "6927"]),
            ids(&["6922", "6922"]),
            ids(&["1234"]),
        ] {
            assert_eq!(sso_status(&other, &rules), SsoStatus::Unknown, "{other:?}");
        }
    }

    #[test]
    fn membership_policy_tolerates_extra_lists() {
        let rules = SsoRules {
            policy: SsoPolicy::Membership,
            ..SsoRules::default()
        };
        assert_eq!(sso_status(&ids(&["6922", "9999"]), &rules), SsoStatus::Sso);
        assert_eq!(sso_status(&ids(&["1", "6927"]), &rules), SsoStatus::NoSso);
        assert_eq!(sso_status(&ids(&["6922", "6927"]), &rules), SsoStatus::Unknown);
        assert_eq!(sso_status(&ids(&[]), &rules), SsoStatus::Unknown);
    }

    #[test]
    fn marker_ids_are_configurable() {
        let rules = SsoRules {
            sso_list_id: "1".into(),
            no_sso_list_id: "2".into(),
            policy: SsoPolicy::Exact,
        };
        assert_eq!(sso_status(&ids(&["1"]), &rules), SsoStatus::Sso);
        assert_eq!(sso_status(&ids(&["6922"]), &rules), SsoStatus::Unknown);
    }

    #[test]
    fn renders_report_strings() {
        assert_eq!(SsoStatus::Sso.to_string(), "SSO");
        assert_eq!(SsoStatus::NoSso.to_string(), "noSSO");
        assert_eq!(SsoStatus::Unknown.to_string(), "");
    }
}
