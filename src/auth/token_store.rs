use anyhow::{Result, anyhow};
use keyring::{Entry, Error as KeyringError};
use log::debug;

const SERVICE: &str = "hubspot_report";
const ACCOUNT: &str = "api_token";

/// Environment fallback when the keyring has nothing.
pub const TOKEN_ENV: &str = "HUBSPOT_API_KEY";

/// Save the private-app bearer token into the OS keyring
pub fn save_api_token(token: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, ACCOUNT);
    entry?
        .set_password(token)
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(())
}

/// Load the bearer token from the keyring
pub fn load_api_token() -> Result<Option<String>> {
    let entry = Entry::new(SERVICE, ACCOUNT);
    match entry?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(KeyringError::NoEntry) => Ok(None),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

/// Keyring first, then `HUBSPOT_API_KEY`.
pub fn resolve_api_token() -> Result<String> {
    let stored = match load_api_token() {
        Ok(t) => t,
        Err(e) => {
            // headless boxes often have no secret service at all
            debug!("Keyring unavailable: {e}");
            None
        }
    };
    pick_token(stored, std::env::var(TOKEN_ENV).ok())
}

fn pick_token(stored: Option<String>, env: Option<String>) -> Result<String> {
    stored
        .or(env)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            anyhow!("No API token: run `hubspot_report set-token` or set {TOKEN_ENV}")
        })
}
