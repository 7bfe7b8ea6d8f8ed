use crate::users::{User, UserSpec};
use serde_derive::Serialize;

/// In-place changes to the mutable user fields. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub permissions: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub enabled: Option<bool>,
}

/// Complete representation of the mutable fields, the API doesn't support partial updates.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserUpdatePayload {
    pub permissions: i64,
    pub enabled: bool,
    pub email: String,
    pub name: String,
}

impl UserUpdate {
    /// Collects the fields whose effective value differs between the last known and the desired
    /// state. Absent name or email is the same as an empty one.
    pub fn between(current: &User, desired: &UserSpec) -> Self {
        Self {
            permissions: (current.permissions != desired.permissions)
                .then_some(desired.permissions),
            name: changed_text(current.name.as_deref(), desired.name.as_deref()),
            email: changed_text(current.email.as_deref(), desired.email.as_deref()),
            enabled: (current.enabled != desired.enabled).then_some(desired.enabled),
        }
    }

    /// Checks whether there is nothing to change.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.enabled.is_none()
    }

    /// Applies changes on top of the current user state.
    pub fn merge(&self, current: &User) -> UserUpdatePayload {
        UserUpdatePayload {
            permissions: self.permissions.unwrap_or(current.permissions),
            enabled: self.enabled.unwrap_or(current.enabled),
            email: self
                .email
                .clone()
                .or_else(|| current.email.clone())
                .unwrap_or_default(),
            name: self
                .name
                .clone()
                .or_else(|| current.name.clone())
                .unwrap_or_default(),
        }
    }
}

fn changed_text(current: Option<&str>, desired: Option<&str>) -> Option<String> {
    let desired = desired.unwrap_or_default();
    (current.unwrap_or_default() != desired).then(|| desired.to_string())
}

#[cfg(test)]
mod tests {
    use crate::{
        codec::{FromRawRecord, tests::raw_record},
        users::{User, UserSpec, UserUpdate, UserUpdatePayload},
    };
    use serde_json::json;

    fn mock_current_user() -> User {
        User::from_raw(raw_record(json!({
            "id": 1,
            "username": "alice",
            "name": "Alice",
            "email": "a@x.com",
            "permissions": 16,
            "enabled": true
        })))
    }

    #[test]
    fn detects_changed_fields() {
        let current = mock_current_user();

        let desired = UserSpec {
            name: Some("Alice".to_string()),
            email: Some("a@x.com".to_string()),
            ..UserSpec::new("alice", 16)
        };
        assert!(UserUpdate::between(&current, &desired).is_empty());

        let desired = UserSpec {
            name: Some("Alice".to_string()),
            email: Some("a@x.com".to_string()),
            enabled: false,
            ..UserSpec::new("alice", 32)
        };
        assert_eq!(
            UserUpdate::between(&current, &desired),
            UserUpdate {
                permissions: Some(32),
                enabled: Some(false),
                ..Default::default()
            }
        );

        // Unset name and email clear the current values.
        let desired = UserSpec::new("alice", 16);
        assert_eq!(
            UserUpdate::between(&current, &desired),
            UserUpdate {
                name: Some(String::new()),
                email: Some(String::new()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn treats_absent_and_empty_text_as_equal() {
        let current = User::from_raw(raw_record(json!({
            "id": 1,
            "username": "alice",
            "name": "",
            "permissions": 16,
            "enabled": true
        })));

        let desired = UserSpec {
            email: Some(String::new()),
            ..UserSpec::new("alice", 16)
        };
        assert!(UserUpdate::between(&current, &desired).is_empty());
    }

    #[test]
    fn merges_changes_with_current_state() {
        let current = mock_current_user();

        let update = UserUpdate {
            permissions: Some(32),
            ..Default::default()
        };
        assert_eq!(
            update.merge(&current),
            UserUpdatePayload {
                permissions: 32,
                enabled: true,
                email: "a@x.com".to_string(),
                name: "Alice".to_string(),
            }
        );

        let update = UserUpdate {
            name: Some("Alice Smith".to_string()),
            email: Some(String::new()),
            enabled: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(update.merge(&current)).unwrap(),
            json!({
                "permissions": 16,
                "enabled": false,
                "email": "",
                "name": "Alice Smith"
            })
        );
    }
}
