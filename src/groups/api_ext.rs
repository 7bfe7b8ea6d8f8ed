use crate::{
    api::Api,
    codec::{RawRecord, from_raw_records},
    error::Error as TenableError,
    groups::Group,
    lookup::{Selector, find_record},
};
use anyhow::{Context, bail};
use reqwest::Method;

/// API to look up user groups.
pub struct GroupsApi<'a> {
    api: &'a Api,
}

impl<'a> GroupsApi<'a> {
    /// Creates Groups API.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Retrieves all user groups, in the order returned by the server.
    pub async fn list_groups(&self) -> anyhow::Result<Vec<Group>> {
        let client = &self.api.client;
        let raw_groups: Vec<RawRecord> = client
            .execute(client.build_request(Method::GET, "groups")?)
            .await
            .context("Cannot list groups.")?;
        Ok(from_raw_records(raw_groups))
    }

    /// Finds the group matching the selector.
    pub async fn find_group(&self, selector: &Selector) -> anyhow::Result<Group> {
        let groups = self
            .list_groups()
            .await
            .with_context(|| format!("Cannot look up group ({selector})."))?;
        match find_record(groups, selector) {
            Some(group) => Ok(group),
            None => bail!(TenableError::not_found(format!(
                "No group was found with {selector}."
            ))),
        }
    }
}

impl Api {
    /// Returns an API to look up user groups.
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi::new(self)
    }
}
