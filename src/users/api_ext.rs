use crate::{
    api::Api,
    codec::{FromRawRecord, RawRecord, from_raw_records},
    error::Error as TenableError,
    lookup::{Selector, find_record},
    users::{User, UserId},
};
use anyhow::{Context, bail};
use reqwest::Method;

/// API to look up users.
pub struct UsersApi<'a> {
    api: &'a Api,
}

impl<'a> UsersApi<'a> {
    /// Creates Users API.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Retrieves all users, in the order returned by the server. Depending on the privileges of
    /// the caller, the server may omit some of the fields.
    pub async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let client = &self.api.client;
        let raw_users: Vec<RawRecord> = client
            .execute(client.build_request(Method::GET, "users")?)
            .await
            .context("Cannot list users.")?;
        Ok(from_raw_records(raw_users))
    }

    /// Retrieves the user with the specified ID.
    pub async fn get_user(&self, id: UserId) -> anyhow::Result<User> {
        let client = &self.api.client;
        let raw_user: RawRecord = client
            .execute(client.build_request(Method::GET, &format!("users/{id}"))?)
            .await
            .with_context(|| format!("Cannot retrieve user ({id})."))?;
        Ok(User::from_raw(raw_user))
    }

    /// Finds the user matching the selector, names are matched against usernames.
    pub async fn find_user(&self, selector: &Selector) -> anyhow::Result<User> {
        let users = self
            .list_users()
            .await
            .with_context(|| format!("Cannot look up user ({selector})."))?;
        match find_record(users, selector) {
            Some(user) => Ok(user),
            None => bail!(TenableError::not_found(format!(
                "No user was found with {selector}."
            ))),
        }
    }
}

impl Api {
    /// Returns an API to look up users.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }
}
