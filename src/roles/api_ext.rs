use crate::{
    api::Api,
    codec::{RawRecord, from_raw_records},
    error::Error as TenableError,
    lookup::{Selector, find_record},
    roles::Role,
};
use anyhow::{Context, bail};
use reqwest::Method;

/// API to look up roles.
pub struct RolesApi<'a> {
    api: &'a Api,
}

impl<'a> RolesApi<'a> {
    /// Creates Roles API.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Retrieves all roles, in the order returned by the server.
    pub async fn list_roles(&self) -> anyhow::Result<Vec<Role>> {
        let client = &self.api.client;
        let raw_roles: Vec<RawRecord> = client
            .execute(client.build_request(Method::GET, "roles")?)
            .await
            .context("Cannot list roles.")?;
        Ok(from_raw_records(raw_roles))
    }

    /// Finds the role matching the selector.
    pub async fn find_role(&self, selector: &Selector) -> anyhow::Result<Role> {
        let roles = self
            .list_roles()
            .await
            .with_context(|| format!("Cannot look up role ({selector})."))?;
        match find_record(roles, selector) {
            Some(role) => Ok(role),
            None => bail!(TenableError::not_found(format!(
                "No role was found with {selector}."
            ))),
        }
    }
}

impl Api {
    /// Returns an API to look up roles.
    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(self)
    }
}
