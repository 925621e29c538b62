//! Asset search: resolve a user, department or location by name, then list
//! every asset assigned to it.
//!
//! Name resolution issues a `query="name:'X'"` (or first/last name) filter
//! against the directory endpoint and takes the first match; the asset list
//! is fetched through the paginated `assets?query="..."` filter and sorted
//! by display id ascending.

use crate::application::use_cases::enrichment::{
    department_name, lookup_name, string_field,
};
use crate::ports::outbound::RemoteClient;
use crate::shared::{InventoryError, Result};
use serde_json::{Map, Value};

pub struct SearchAssetsUseCase<'a, C> {
    client: &'a C,
}

impl<'a, C: RemoteClient> SearchAssetsUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Assets assigned to the named user. The name must carry both a first
    /// and a last part; the first matching requester wins.
    ///
    /// # Returns
    /// `Ok(None)` when no requester matches the name.
    ///
    /// # Errors
    /// A name without a last part is a user error and fails before any
    /// request is made.
    pub fn by_user(&self, full_name: &str) -> Result<Option<Vec<Map<String, Value>>>> {
        let Some((first, last)) = full_name.trim().split_once(' ') else {
            return Err(InventoryError::IncompleteFullName {
                input: full_name.to_string(),
            }
            .into());
        };

        let endpoint = format!(
            "requesters?query=\"first_name:'{}'\"&query=\"last_name:'{}'\"",
            urlencoding::encode(first.trim()),
            urlencoding::encode(last.trim()),
        );
        let Some(user_id) = self
            .client
            .get_json(&endpoint)
            .and_then(|body| body.get("requesters")?.get(0)?.get("id")?.as_i64())
        else {
            return Ok(None);
        };

        Ok(Some(self.assets_matching("user_id", user_id, true, true)))
    }

    /// Assets in the named department, or `None` when the name does not
    /// resolve. The department itself is omitted from the rows.
    pub fn by_department(&self, name: &str) -> Option<Vec<Map<String, Value>>> {
        let id = self.resolve_id("departments", name)?;
        Some(self.assets_matching("department_id", id, false, true))
    }

    /// Assets at the named location, or `None` when the name does not
    /// resolve. The location itself is omitted from the rows.
    pub fn by_location(&self, name: &str) -> Option<Vec<Map<String, Value>>> {
        let id = self.resolve_id("locations", name)?;
        Some(self.assets_matching("location_id", id, true, false))
    }

    /// First directory record whose name matches, via
    /// `{endpoint}/?query="name:'X'"`.
    fn resolve_id(&self, endpoint: &str, name: &str) -> Option<i64> {
        let query = format!(
            "{endpoint}/?query=\"name:'{}'\"",
            urlencoding::encode(name.trim())
        );
        self.client
            .get_json(&query)
            .and_then(|body| body.get(endpoint)?.get(0)?.get("id")?.as_i64())
    }

    fn assets_matching(
        &self,
        filter_key: &str,
        id: i64,
        with_department: bool,
        with_location: bool,
    ) -> Vec<Map<String, Value>> {
        let mut records = self
            .client
            .fetch_paginated("assets", &format!("?query=\"{filter_key}:{id}\""));
        records.sort_by_key(|a| a.get("display_id").and_then(Value::as_i64).unwrap_or(0));

        records
            .iter()
            .map(|asset| {
                let mut row = Map::new();
                row.insert(
                    "display_id".into(),
                    asset.get("display_id").cloned().unwrap_or(Value::Null),
                );
                row.insert("name".into(), string_field(asset, "name"));
                if with_department {
                    row.insert("department".into(), department_name(self.client, asset));
                }
                if with_location {
                    row.insert(
                        "location".into(),
                        lookup_name(self.client, asset, "location_id", "locations", "location"),
                    );
                }
                row.insert(
                    "asset_type".into(),
                    lookup_name(self.client, asset, "asset_type_id", "asset_types", "asset_type"),
                );
                row.insert("state".into(), string_field(asset, "asset_state"));
                row
            })
            .collect()
    }
}
