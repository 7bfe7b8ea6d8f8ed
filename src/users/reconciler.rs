use crate::{
    api::Api,
    codec::{FromRawRecord, RawRecord},
    error::Error as TenableError,
    users::{User, UserId, UserPlan, UserSpec, UserUpdate},
};
use anyhow::{Context, bail};
use reqwest::{Method, StatusCode};
use serde_derive::Serialize;
use tracing::{debug, info};

#[derive(Serialize)]
struct UserCreatePayload<'s> {
    username: &'s str,
    password: &'s str,
    permissions: i64,
    #[serde(rename = "type")]
    account_type: &'s str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'s str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'s str>,
}

#[derive(Serialize)]
struct UserEnabledPayload {
    enabled: bool,
}

/// Converges the remote user towards the desired state. This is the only API that changes
/// remote state.
pub struct UserReconciler<'a> {
    api: &'a Api,
}

impl<'a> UserReconciler<'a> {
    /// Creates User reconciler.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Creates a new user and makes sure its enabled state matches the requested one.
    pub async fn create(&self, spec: &UserSpec) -> anyhow::Result<User> {
        let user = self.create_remote(spec).await?;
        self.reconcile_enabled(user, spec.enabled).await
    }

    /// Creates a new user without correcting its enabled state. If the server doesn't report
    /// the enabled state, the user is assumed to be enabled.
    pub async fn create_remote(&self, spec: &UserSpec) -> anyhow::Result<User> {
        let payload = UserCreatePayload {
            username: &spec.username,
            password: spec.password.as_deref().unwrap_or_default(),
            permissions: spec.permissions,
            account_type: &spec.account_type,
            name: spec.name.as_deref().filter(|name| !name.is_empty()),
            email: spec.email.as_deref().filter(|email| !email.is_empty()),
        };

        let client = &self.api.client;
        let raw_user: RawRecord = client
            .execute(client.build_json_request(Method::POST, "users", &payload)?)
            .await
            .with_context(|| format!("Cannot create user ({}).", spec.username))?;

        let enabled_reported = raw_user.contains_key("enabled");
        let account_type_reported = raw_user.contains_key("type");
        let mut user = User::from_raw(raw_user);
        if !enabled_reported {
            user.enabled = true;
        }
        if !account_type_reported {
            user.account_type = spec.account_type.clone();
        }

        if *user.id == 0 {
            bail!(TenableError::decode(format!(
                "User ({}) was created, but the server didn't report its id.",
                spec.username
            )));
        }

        info!(
            user = ?user.log_context(),
            permissions = user.permissions,
            account_type = %user.account_type,
            enabled = user.enabled,
            "Created user."
        );

        Ok(user)
    }

    /// Brings the enabled state of the just created user to the requested value. The user
    /// already exists remotely at this point, so the failure is reported as partially applied
    /// creation.
    pub async fn reconcile_enabled(&self, mut user: User, requested: bool) -> anyhow::Result<User> {
        if user.enabled == requested {
            return Ok(user);
        }

        if let Err(err) = self.set_enabled(user.id, requested).await {
            bail!(TenableError::partially_applied(err.context(format!(
                "User ({}) was created, but its enabled state couldn't be changed to {requested}.",
                user.id
            ))));
        }

        user.enabled = requested;
        Ok(user)
    }

    /// Retrieves the user, `None` means the user no longer exists.
    pub async fn read(&self, id: UserId) -> anyhow::Result<Option<User>> {
        match self.api.users().get_user(id).await {
            Ok(user) => Ok(Some(user)),
            Err(err) if TenableError::status_of(&err) == Some(StatusCode::NOT_FOUND) => {
                info!(user.id = *id, "User doesn't exist, it was removed remotely.");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Updates mutable fields of the user. The full set of mutable fields is sent, unchanged
    /// fields keep their current values. Returns the state re-read after the update.
    pub async fn update(&self, id: UserId, update: &UserUpdate) -> anyhow::Result<User> {
        let current = self
            .read(id)
            .await?
            .ok_or_else(|| TenableError::not_found(format!("User ({id}) doesn't exist.")))?;

        let client = &self.api.client;
        client
            .execute_empty(client.build_json_request(
                Method::PUT,
                &format!("users/{id}"),
                &update.merge(&current),
            )?)
            .await
            .with_context(|| format!("Cannot update user ({id})."))?;

        info!(
            user = ?current.log_context(),
            permissions_changed = update.permissions.is_some(),
            name_changed = update.name.is_some(),
            email_changed = update.email.is_some(),
            enabled_changed = update.enabled.is_some(),
            "Updated user."
        );

        self.read(id).await?.ok_or_else(|| {
            TenableError::not_found(format!("User ({id}) doesn't exist after update.")).into()
        })
    }

    /// Removes the user. Removing the user that doesn't exist fails with the server error.
    pub async fn delete(&self, id: UserId) -> anyhow::Result<()> {
        let client = &self.api.client;
        client
            .execute_empty(client.build_request(Method::DELETE, &format!("users/{id}"))?)
            .await
            .with_context(|| format!("Cannot delete user ({id})."))?;

        info!(user.id = *id, "Deleted user.");

        Ok(())
    }

    /// Enables or disables the user through the dedicated endpoint.
    pub async fn set_enabled(&self, id: UserId, enabled: bool) -> anyhow::Result<()> {
        let client = &self.api.client;
        client
            .execute_empty(client.build_json_request(
                Method::PUT,
                &format!("users/{id}/enabled"),
                &UserEnabledPayload { enabled },
            )?)
            .await
            .with_context(|| format!("Cannot change enabled state of user ({id})."))?;

        info!(user.id = *id, enabled, "Changed user enabled state.");

        Ok(())
    }

    /// Converges the user with the optional known id towards the desired state: creates it if
    /// it doesn't exist, replaces it if a write-once field changed, or updates it in place.
    pub async fn apply(&self, id: Option<UserId>, desired: &UserSpec) -> anyhow::Result<User> {
        let current = match id {
            Some(id) => self.read(id).await?,
            None => None,
        };

        let plan = UserPlan::new(current.as_ref(), desired);
        debug!(user.id = id.map(|id| *id), plan = ?plan, "Planned user changes.");

        match (plan, current) {
            (UserPlan::Create, _) | (_, None) => self.create(desired).await,
            (UserPlan::Replace, Some(current)) => {
                self.delete(current.id).await?;
                self.create(desired).await
            }
            (UserPlan::Update(update), Some(current)) => self.update(current.id, &update).await,
            (UserPlan::Unchanged, Some(current)) => Ok(current),
        }
    }
}

impl Api {
    /// Returns a reconciler to manage users.
    pub fn user_reconciler(&self) -> UserReconciler<'_> {
        UserReconciler::new(self)
    }
}
