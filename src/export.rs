//! Writers for handing rows to a spreadsheet or file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::row::{COLUMNS, OutputRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

pub fn write_rows<W: Write>(rows: &[OutputRow], format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(rows, out),
        OutputFormat::Json => write_json(rows, out),
    }
}

/// CSV with a header line; every field quoted only when needed.
pub fn write_csv<W: Write>(rows: &[OutputRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pretty JSON array of objects keyed by column name.
pub fn write_json<W: Write>(rows: &[OutputRow], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::row::SsoStatus;

    fn row() -> OutputRow {
        OutputRow {
            email_id: "900".into(),
            subject: "Hello, world".into(),
            date: "2024-11-15".into(),
            time: "14:30:00".into(),
            reserved1: String::new(),
            reserved2: String::new(),
            total_delivers: "250".into(),
            total_opens: "80".into(),
            list_name: "Q1 Distro List".into(),
            sso_status: SsoStatus::NoSso,
        }
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let mut buf = Vec::new();
        write_csv(&[row()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "email_id,subject,date,time,reserved1,reserved2,total_delivers,total_opens,list_name,sso_status"
            )
        );
        assert_eq!(
            lines.next(),
            Some("900,\"Hello, world\",2024-11-15,14:30:00,,,250,80,Q1 Distro List,noSSO")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_uses_column_names_and_status_strings() {
        let mut buf = Vec::new();
        write_json(&[row()], &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["list_name"], "Q1 Distro List");
        assert_eq!(value[0]["sso_status"], "noSSO");
        assert_eq!(value[0]["reserved2"], "");
    }
}
