use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::client::DEFAULT_API_BASE;
use crate::export::OutputFormat;
use crate::report::{NO_SSO_LIST_ID, ReportSettings, SSO_LIST_ID, SsoPolicy, SsoRules};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub api_base: Option<String>,
    /// RFC 3339 cutoff; only emails created after it are reported.
    pub created_after: Option<String>,
    pub sso_list_id: Option<String>,
    pub no_sso_list_id: Option<String>,
    pub sso_policy: Option<SsoPolicy>,
    pub cache_list_names: Option<bool>,
    pub output_format: Option<OutputFormat>,
}

impl Config {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Resolve the run settings. `since` overrides `created_after`.
    pub fn report_settings(&self, since: Option<&str>) -> Result<ReportSettings> {
        let defaults = ReportSettings::default();

        let created_after = match since.or(self.created_after.as_deref()) {
            Some(raw) => parse_cutoff(raw)?,
            None => defaults.created_after,
        };

        Ok(ReportSettings {
            created_after,
            sso: SsoRules {
                sso_list_id: self
                    .sso_list_id
                    .clone()
                    .unwrap_or_else(|| SSO_LIST_ID.to_string()),
                no_sso_list_id: self
                    .no_sso_list_id
                    .clone()
                    .unwrap_or_else(|| NO_SSO_LIST_ID.to_string()),
                policy: self.sso_policy.unwrap_or_default(),
            },
            cache_list_names: self.cache_list_names.unwrap_or(defaults.cache_list_names),
        })
    }
}

fn parse_cutoff(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Invalid cutoff '{raw}' (expected RFC 3339): {e}"))
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("hubspot_report"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        // create a template config for users to edit
        let sample = Config {
            api_base: Some(DEFAULT_API_BASE.to_string()),
            created_after: Some("2024-11-01T00:00:00Z".to_string()),
            sso_list_id: Some(SSO_LIST_ID.to_string()),
            no_sso_list_id: Some(NO_SSO_LIST_ID.to_string()),
            sso_policy: Some(SsoPolicy::Exact),
            cache_list_names: Some(false),
            output_format: Some(OutputFormat::Csv),
        };
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(&path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {}, edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}
