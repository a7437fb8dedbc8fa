use serde::{Serialize, Serializer};

/// Column names, in output order. The two `reserved` columns are filled in by
/// whoever consumes the rows.
pub const COLUMNS: [&str; 10] = [
    "email_id",
    "subject",
    "date",
    "time",
    "reserved1",
    "reserved2",
    "total_delivers",
    "total_opens",
    "list_name",
    "sso_status",
];

/// Derived from an email's excluded lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SsoStatus {
    Sso,
    NoSso,
    #[default]
    Unknown,
}

impl SsoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SsoStatus::Sso => "SSO",
            SsoStatus::NoSso => "noSSO",
            SsoStatus::Unknown => "",
        }
    }
}

impl std::fmt::Display for SsoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SsoStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One report line: one email sent to one distribution list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub email_id: String,
    pub subject: String,
    pub date: String,
    pub time: String,
    pub reserved1: String,
    pub reserved2: String,
    pub total_delivers: String,
    pub total_opens: String,
    pub list_name: String,
    pub sso_status: SsoStatus,
}

impl OutputRow {
    pub fn fields(&self) -> [String; 10] {
        [
            self.email_id.clone(),
            self.subject.clone(),
            self.date.clone(),
            self.time.clone(),
            self.reserved1.clone(),
            self.reserved2.clone(),
            self.total_delivers.clone(),
            self.total_opens.clone(),
            self.list_name.clone(),
            self.sso_status.as_str().to_string(),
        ]
    }
}
