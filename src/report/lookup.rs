use std::collections::HashMap;

use log::debug;

use crate::api::MarketingApi;
use crate::domain::email::{EmailDetail, ListId};
use crate::error::{ReportError, Result};

/// Fetch one email's detail with stats. The requested id is filled in when
/// the payload does not echo it back.
pub fn get_detail(api: &dyn MarketingApi, id: &str) -> Result<EmailDetail> {
    let mut detail = api.get_email_detail(id)?;
    detail.id.get_or_insert_with(|| id.to_string());
    Ok(detail)
}

/// Human-readable name of a CRM list (`list.name`).
pub fn resolve_list_name(api: &dyn MarketingApi, list_id: &str) -> Result<String> {
    api.get_list(list_id)?
        .list
        .and_then(|l| l.name)
        .ok_or_else(|| ReportError::malformed(list_id, "list.name"))
}

/// Resolves list names for one run, optionally remembering them.
pub struct ListNameResolver<'a> {
    api: &'a dyn MarketingApi,
    cache: Option<HashMap<ListId, String>>,
}

impl<'a> ListNameResolver<'a> {
    pub fn new(api: &'a dyn MarketingApi, memoize: bool) -> Self {
        Self {
            api,
            cache: memoize.then(HashMap::new),
        }
    }

    pub fn resolve(&mut self, list_id: &str) -> Result<String> {
        let Some(cache) = self.cache.as_mut() else {
            return resolve_list_name(self.api, list_id);
        };
        if let Some(name) = cache.get(list_id) {
            debug!("List {list_id} resolved from cache");
            return Ok(name.clone());
        }
        let name = resolve_list_name(self.api, list_id)?;
        cache.insert(list_id.to_string(), name.clone());
        Ok(name)
    }
}
