//! Typed views of the marketing API payloads.
//!
//! Every field the remote side might omit is an `Option`; deciding which
//! absences are fatal happens in `report::rows`, not here.

use serde::{Deserialize, Deserializer};

pub type EmailId = String;
pub type ListId = String;

/// Subject used when the listing endpoint leaves it out.
pub const NO_SUBJECT: &str = "No subject";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSummary {
    pub id: EmailId,
    pub subject: String,
}

/// One page of `GET /marketing/v3/emails`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailPage {
    pub results: Option<Vec<EmailListItem>>,
    pub paging: Option<Paging>,
}

impl EmailPage {
    /// Cursor for the following page, if the server announced one.
    pub fn next_after(&self) -> Option<&str> {
        self.paging.as_ref()?.next.as_ref()?.after.as_deref()
    }

    pub fn into_summaries(self) -> Vec<EmailSummary> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(|item| EmailSummary {
                id: item.id,
                subject: item.subject.unwrap_or_else(|| NO_SUBJECT.to_string()),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailListItem {
    #[serde(deserialize_with = "id_string")]
    pub id: EmailId,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextPage {
    pub after: Option<String>,
}

/// `GET /marketing/v3/emails/{id}?includeStats=true`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDetail {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub id: Option<EmailId>,
    pub is_published: Option<bool>,
    pub publish_date: Option<String>,
    pub subject: Option<String>,
    pub stats: Option<Stats>,
    pub to: Option<Recipients>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stats {
    pub counters: Option<Counters>,
}

/// Engagement counters. Kept as JSON numbers so they print exactly as sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Counters {
    pub delivered: Option<serde_json::Number>,
    pub open: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipients {
    pub contact_ils_lists: Option<ContactLists>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactLists {
    #[serde(default, deserialize_with = "opt_id_list")]
    pub include: Option<Vec<ListId>>,
    #[serde(default, deserialize_with = "opt_id_list")]
    pub exclude: Option<Vec<ListId>>,
}

/// `GET /crm/v3/lists/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListLookup {
    pub list: Option<CrmList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrmList {
    pub name: Option<String>,
}

// The API is inconsistent about ids: sometimes "6922", sometimes 6922.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(RawId::into_string)
}

fn opt_id_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(d)?.map(RawId::into_string))
}

fn opt_id_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<Vec<RawId>>::deserialize(d)?
        .map(|ids| ids.into_iter().map(RawId::into_string).collect()))
}
